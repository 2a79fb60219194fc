use serde::{Deserialize, Serialize};

use crate::example::Example;
use crate::scorer::{BaseScorer, ScorerConfig};

/// Evaluation run over a batch of examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleEvaluationRun {
    pub id: String,
    pub project_name: String,
    pub eval_name: String,
    #[serde(default)]
    pub custom_scorers: Vec<BaseScorer>,
    #[serde(default)]
    pub judgment_scorers: Vec<ScorerConfig>,
    pub model: String,
    pub created_at: String,
    pub examples: Vec<Example>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_span_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Evaluation run over previously recorded trace spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvaluationRun {
    pub id: String,
    pub project_name: String,
    pub eval_name: String,
    #[serde(default)]
    pub custom_scorers: Vec<BaseScorer>,
    #[serde(default)]
    pub judgment_scorers: Vec<ScorerConfig>,
    pub model: String,
    pub created_at: String,
    /// `[trace_id, span_id]` pairs.
    pub trace_and_span_ids: Vec<(String, String)>,
    pub is_offline: bool,
}

/// Body of `/add_to_run_eval_queue/`; the server tells the kinds apart by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationRunPayload {
    Examples(ExampleEvaluationRun),
    Traces(TraceEvaluationRun),
}

impl EvaluationRunPayload {
    pub fn id(&self) -> &str {
        match self {
            EvaluationRunPayload::Examples(run) => &run.id,
            EvaluationRunPayload::Traces(run) => &run.id,
        }
    }

    pub fn project_name(&self) -> &str {
        match self {
            EvaluationRunPayload::Examples(run) => &run.project_name,
            EvaluationRunPayload::Traces(run) => &run.project_name,
        }
    }
}

impl From<ExampleEvaluationRun> for EvaluationRunPayload {
    fn from(run: ExampleEvaluationRun) -> Self {
        EvaluationRunPayload::Examples(run)
    }
}

impl From<TraceEvaluationRun> for EvaluationRunPayload {
    fn from(run: TraceEvaluationRun) -> Self {
        EvaluationRunPayload::Traces(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trace_ids_serialize_as_pairs() {
        let run = TraceEvaluationRun {
            id: "run-1".to_string(),
            project_name: "proj".to_string(),
            eval_name: "eval".to_string(),
            custom_scorers: Vec::new(),
            judgment_scorers: Vec::new(),
            model: "gpt-4.1".to_string(),
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            trace_and_span_ids: vec![("t1".to_string(), "s1".to_string())],
            is_offline: false,
        };

        let value = serde_json::to_value(EvaluationRunPayload::from(run)).unwrap();
        assert_eq!(value["trace_and_span_ids"], json!([["t1", "s1"]]));
        assert_eq!(value["is_offline"], json!(false));
        assert!(value.get("examples").is_none());
    }
}
