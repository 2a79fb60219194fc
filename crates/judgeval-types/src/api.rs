use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body of `/save_scorer/`.
///
/// Equality is field-wise; `options` is a sorted map so insertion order
/// never matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePromptScorerRequest {
    pub name: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SavePromptScorerRequest {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            threshold: None,
            options: None,
            model: None,
            is_trace: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePromptScorerResponse {
    #[serde(default)]
    pub scorer_response: Option<PromptScorerModel>,
}

/// A prompt scorer as stored on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptScorerModel {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub prompt: String,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_trace: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchPromptScorersRequest {
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trace: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchPromptScorersResponse {
    #[serde(default)]
    pub scorers: Vec<PromptScorerModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerExistsRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalResultsFetch {
    pub experiment_run_id: String,
    pub project_name: String,
}

/// Response of `/get_evaluation_status/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationStatus {
    #[serde(default)]
    pub status: Option<String>,
}

impl EvaluationStatus {
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some("completed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(pairs: &[(&str, f64)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), json!(v))).collect()
    }

    fn request(options: Map<String, Value>) -> SavePromptScorerRequest {
        SavePromptScorerRequest {
            threshold: Some(0.7),
            options: Some(options),
            ..SavePromptScorerRequest::new("tone", "Is the reply polite?")
        }
    }

    #[test]
    fn test_save_request_equality_ignores_option_order() {
        let a = request(options(&[("yes", 1.0), ("no", 0.0)]));
        let b = request(options(&[("no", 0.0), ("yes", 1.0)]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_save_request_differs_by_any_field() {
        let base = request(options(&[("yes", 1.0)]));

        let mut other = base.clone();
        other.name = "tone-v2".to_string();
        assert_ne!(base, other);

        let mut other = base.clone();
        other.prompt = "Is the reply rude?".to_string();
        assert_ne!(base, other);

        let mut other = base.clone();
        other.threshold = Some(0.8);
        assert_ne!(base, other);

        let mut other = base.clone();
        other.options = None;
        assert_ne!(base, other);
    }

    #[test]
    fn test_save_request_skips_unset_fields() {
        let value = serde_json::to_value(SavePromptScorerRequest::new("a", "b")).unwrap();
        assert_eq!(value, json!({"name": "a", "prompt": "b"}));
    }

    #[test]
    fn test_evaluation_status_completed() {
        let done: EvaluationStatus = serde_json::from_value(json!({"status": "completed"})).unwrap();
        let pending: EvaluationStatus = serde_json::from_value(json!({"status": "running"})).unwrap();
        let empty: EvaluationStatus = serde_json::from_value(json!({})).unwrap();

        assert!(done.is_completed());
        assert!(!pending.is_completed());
        assert!(!empty.is_completed());
    }
}
