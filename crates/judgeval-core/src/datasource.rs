use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};

use judgeval_types::Example;

use crate::error::{JudgmentError, Result};

/// Where the examples of an evaluation come from.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Example>>;
}

pub struct VecDataSource {
    examples: Vec<Example>,
}

impl VecDataSource {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }
}

#[async_trait]
impl DataSource for VecDataSource {
    async fn load(&self) -> Result<Vec<Example>> {
        Ok(self.examples.clone())
    }
}

/// Reads JSONL where each line is an object of example fields, e.g.
/// `{"input": "...", "actual_output": "...", "name": "optional"}`.
///
/// `example_id` and `created_at` are kept when present and generated
/// otherwise.
pub struct JsonlDataSource {
    path: PathBuf,
}

impl JsonlDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataSource for JsonlDataSource {
    async fn load(&self) -> Result<Vec<Example>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            JudgmentError::runtime_with(format!("Failed to read {:?}", self.path), e)
        })?;
        let examples = parse_jsonl(&content)?;
        tracing::debug!(path = ?self.path, count = examples.len(), "loaded examples");
        Ok(examples)
    }
}

pub fn parse_jsonl(content: &str) -> Result<Vec<Example>> {
    let mut examples = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| {
            JudgmentError::runtime_with(format!("Invalid JSON on line {}", idx + 1), e)
        })?;
        let Value::Object(fields) = value else {
            return Err(JudgmentError::runtime(format!("Line {}: expected object", idx + 1)));
        };
        examples.push(example_from_fields(fields, idx + 1)?);
    }
    Ok(examples)
}

fn example_from_fields(mut fields: Map<String, Value>, line: usize) -> Result<Example> {
    let mut example = Example::new();

    if let Some(id) = take_string(&mut fields, "example_id", line)? {
        example.example_id = id;
    }
    if let Some(created_at) = take_string(&mut fields, "created_at", line)? {
        example.created_at = created_at;
    }
    example.name = take_string(&mut fields, "name", line)?;
    example.properties = fields;
    Ok(example)
}

fn take_string(fields: &mut Map<String, Value>, key: &str, line: usize) -> Result<Option<String>> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(JudgmentError::runtime(format!(
            "Line {}: '{}' must be a string",
            line, key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_jsonl_lines() {
        let content = r#"
{"input": "What is 2+2?", "actual_output": "4", "name": "math"}

{"example_id": "fixed", "input": "Capital of France?", "actual_output": "Paris"}
"#;
        let examples = parse_jsonl(content).unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].name.as_deref(), Some("math"));
        assert_eq!(examples[0].property("actual_output"), Some(&json!("4")));
        assert!(examples[0].property("name").is_none());
        assert_eq!(examples[1].example_id, "fixed");
        assert!(examples[1].name.is_none());
    }

    #[test]
    fn test_parse_jsonl_reports_line() {
        let err = parse_jsonl("{\"input\": 1}\n[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "Line 2: expected object");

        let err = parse_jsonl("{not json").unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON on line 1");
    }

    #[test]
    fn test_non_string_name_is_rejected() {
        let err = parse_jsonl(r#"{"name": 7, "input": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("'name' must be a string"));
    }

    #[tokio::test]
    async fn test_vec_data_source() {
        let example = Example::builder().property("input", "hi").build();
        let loaded = VecDataSource::new(vec![example.clone()]).load().await.unwrap();
        assert_eq!(loaded, vec![example]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = JsonlDataSource::new("/definitely/not/here.jsonl");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, JudgmentError::Runtime { .. }));
    }
}
