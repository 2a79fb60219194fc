use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scorer identities understood by the Judgment API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiScorerType {
    #[serde(rename = "Prompt Scorer")]
    PromptScorer,
    #[serde(rename = "Trace Prompt Scorer")]
    TracePromptScorer,
    #[serde(rename = "Faithfulness")]
    Faithfulness,
    #[serde(rename = "Answer Relevancy")]
    AnswerRelevancy,
    #[serde(rename = "Answer Correctness")]
    AnswerCorrectness,
    #[serde(rename = "Instruction Adherence")]
    InstructionAdherence,
    #[serde(rename = "Derailment")]
    Derailment,
    #[serde(rename = "Custom")]
    Custom,
}

impl ApiScorerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiScorerType::PromptScorer => "Prompt Scorer",
            ApiScorerType::TracePromptScorer => "Trace Prompt Scorer",
            ApiScorerType::Faithfulness => "Faithfulness",
            ApiScorerType::AnswerRelevancy => "Answer Relevancy",
            ApiScorerType::AnswerCorrectness => "Answer Correctness",
            ApiScorerType::InstructionAdherence => "Instruction Adherence",
            ApiScorerType::Derailment => "Derailment",
            ApiScorerType::Custom => "Custom",
        }
    }
}

impl fmt::Display for ApiScorerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side configuration for a judgment (non-custom) scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    pub score_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub strict_mode: bool,
    #[serde(default)]
    pub required_params: Vec<String>,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

/// Identity of a server-hosted custom scorer as sent in `custom_scorers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseScorer {
    pub score_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_mode: Option<bool>,
    pub server_hosted: bool,
}
