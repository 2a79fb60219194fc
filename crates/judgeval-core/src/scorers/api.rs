use serde_json::{Map, Value};

use judgeval_types::{ApiScorerType, ScorerConfig};

use crate::error::{JudgmentError, Result};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// A scorer evaluated by the Judgment backend, identified by its type.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiScorer {
    score_type: ApiScorerType,
    name: String,
    threshold: f64,
    strict_mode: bool,
    required_params: Vec<String>,
    model: Option<String>,
    additional_properties: Map<String, Value>,
}

impl ApiScorer {
    pub fn score_type(&self) -> ApiScorerType {
        self.score_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Example fields the server needs to run this scorer.
    pub fn required_params(&self) -> &[String] {
        &self.required_params
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn additional_properties(&self) -> &Map<String, Value> {
        &self.additional_properties
    }

    /// Configuration sent in `judgment_scorers`. Additional properties and
    /// the evaluation model travel in `kwargs`.
    pub fn scorer_config(&self) -> ScorerConfig {
        let mut kwargs = self.additional_properties.clone();
        if let Some(model) = &self.model {
            kwargs.insert("model".to_string(), Value::String(model.clone()));
        }

        ScorerConfig {
            score_type: self.score_type.to_string(),
            name: self.name.clone(),
            threshold: Some(self.threshold),
            strict_mode: self.strict_mode,
            required_params: self.required_params.clone(),
            kwargs,
        }
    }
}

/// Builder for [`ApiScorer`]. The identity (type, name, required params) is
/// fixed when the builder is created; only tuning knobs are exposed.
#[derive(Debug, Clone)]
pub struct ApiScorerBuilder {
    score_type: ApiScorerType,
    required_params: Vec<String>,
    threshold: Option<f64>,
    strict_mode: bool,
    model: Option<String>,
    additional_properties: Map<String, Value>,
}

impl ApiScorerBuilder {
    pub(crate) fn new<I, S>(score_type: ApiScorerType, required_params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            score_type,
            required_params: required_params.into_iter().map(Into::into).collect(),
            threshold: None,
            strict_mode: false,
            model: None,
            additional_properties: Map::new(),
        }
    }

    /// Minimum passing score, within `[0, 1]`.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Strict scorers pass only on a perfect score.
    pub fn strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    /// Judge model used by the server for this scorer.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn additional_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_properties.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<ApiScorer> {
        if matches!(
            self.score_type,
            ApiScorerType::Custom | ApiScorerType::PromptScorer | ApiScorerType::TracePromptScorer
        ) {
            return Err(JudgmentError::invalid_config(format!(
                "{} is not a built-in scorer type",
                self.score_type
            )));
        }
        let threshold = match self.threshold {
            Some(t) => validate_threshold(t)?,
            None => DEFAULT_THRESHOLD,
        };

        Ok(ApiScorer {
            score_type: self.score_type,
            name: self.score_type.to_string(),
            threshold: if self.strict_mode { 1.0 } else { threshold },
            strict_mode: self.strict_mode,
            required_params: self.required_params,
            model: self.model,
            additional_properties: self.additional_properties,
        })
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(JudgmentError::invalid_config(format!(
            "threshold must be between 0 and 1, got: {}",
            threshold
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> ApiScorerBuilder {
        ApiScorerBuilder::new(ApiScorerType::Faithfulness, ["context", "actual_output"])
    }

    #[test]
    fn test_defaults() {
        let scorer = builder().build().unwrap();

        assert_eq!(scorer.name(), "Faithfulness");
        assert_eq!(scorer.threshold(), 0.5);
        assert!(!scorer.strict_mode());
        assert!(scorer.model().is_none());
        assert_eq!(scorer.required_params(), ["context", "actual_output"]);
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let err = builder().threshold(bad).build().unwrap_err();
            assert!(matches!(err, JudgmentError::InvalidConfig(_)), "{bad}");
        }
        assert_eq!(builder().threshold(0.0).build().unwrap().threshold(), 0.0);
        assert_eq!(builder().threshold(1.0).build().unwrap().threshold(), 1.0);
    }

    #[test]
    fn test_non_built_in_types_are_rejected() {
        for score_type in [
            ApiScorerType::Custom,
            ApiScorerType::PromptScorer,
            ApiScorerType::TracePromptScorer,
        ] {
            let err = ApiScorerBuilder::new(score_type, Vec::<String>::new())
                .build()
                .unwrap_err();
            assert!(matches!(err, JudgmentError::InvalidConfig(_)), "{score_type}");
        }
    }

    #[test]
    fn test_strict_mode_forces_full_threshold() {
        let scorer = builder().threshold(0.3).strict_mode(true).build().unwrap();
        assert_eq!(scorer.threshold(), 1.0);
        assert!(scorer.strict_mode());
    }

    #[test]
    fn test_scorer_config_carries_kwargs() {
        let scorer = builder()
            .threshold(0.8)
            .model("gpt-4o")
            .additional_property("temperature", 0.0)
            .build()
            .unwrap();
        let config = scorer.scorer_config();

        assert_eq!(config.score_type, "Faithfulness");
        assert_eq!(config.name, "Faithfulness");
        assert_eq!(config.threshold, Some(0.8));
        assert_eq!(config.required_params, vec!["context", "actual_output"]);
        assert_eq!(config.kwargs.get("model"), Some(&json!("gpt-4o")));
        assert_eq!(config.kwargs.get("temperature"), Some(&json!(0.0)));
    }
}
