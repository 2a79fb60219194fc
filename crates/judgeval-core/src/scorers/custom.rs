use judgeval_types::{ApiScorerType, BaseScorer};

use crate::error::{JudgmentError, Result};

/// A scorer whose code runs on the Judgment platform. Only its identity is
/// sent with an evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomScorer {
    name: String,
    class_name: String,
    server_hosted: bool,
}

impl CustomScorer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn server_hosted(&self) -> bool {
        self.server_hosted
    }

    /// Entry for the run payload's `custom_scorers` list.
    pub fn base_scorer(&self) -> BaseScorer {
        BaseScorer {
            score_type: ApiScorerType::Custom.to_string(),
            name: self.name.clone(),
            class_name: Some(self.class_name.clone()),
            threshold: None,
            strict_mode: None,
            server_hosted: self.server_hosted,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CustomScorerFactory;

impl CustomScorerFactory {
    pub fn new() -> Self {
        Self
    }

    /// Server-hosted scorer whose class name is its name.
    pub fn get(&self, name: impl Into<String>) -> Result<CustomScorer> {
        let name = name.into();
        self.get_with_class(name.clone(), name)
    }

    pub fn get_with_class(
        &self,
        name: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Result<CustomScorer> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(JudgmentError::invalid_config("custom scorer name is empty"));
        }
        let class_name = class_name.into();
        if class_name.trim().is_empty() {
            return Err(JudgmentError::invalid_config(format!(
                "custom scorer '{}' has an empty class name",
                name
            )));
        }

        Ok(CustomScorer {
            name,
            class_name,
            server_hosted: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_uses_name_as_class() {
        let scorer = CustomScorerFactory.get("helpfulness").unwrap();
        assert_eq!(scorer.name(), "helpfulness");
        assert_eq!(scorer.class_name(), "helpfulness");
        assert!(scorer.server_hosted());
    }

    #[test]
    fn test_get_with_class() {
        let scorer = CustomScorerFactory.get_with_class("helpfulness", "HelpfulnessScorer").unwrap();
        assert_eq!(scorer.class_name(), "HelpfulnessScorer");
        assert!(scorer.server_hosted());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(matches!(CustomScorerFactory.get(""), Err(JudgmentError::InvalidConfig(_))));
        assert!(matches!(
            CustomScorerFactory.get_with_class("a", "  "),
            Err(JudgmentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_base_scorer_identity() {
        let base = CustomScorerFactory.get_with_class("tone", "ToneScorer").unwrap().base_scorer();
        assert_eq!(base.score_type, "Custom");
        assert_eq!(base.name, "tone");
        assert_eq!(base.class_name.as_deref(), Some("ToneScorer"));
        assert!(base.server_hosted);
    }
}
