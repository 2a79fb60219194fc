use std::sync::Arc;

use judgeval_types::{BaseScorer, ScorerConfig};

use crate::error::{JudgmentError, Result};
use crate::scorers::api::ApiScorer;
use crate::scorers::built_in::BuiltInScorersFactory;
use crate::scorers::custom::{CustomScorer, CustomScorerFactory};
use crate::scorers::prompt::{PromptScorer, PromptScorerFactory};
use crate::transport::Transport;

/// Any scorer that can be attached to an evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Scorer {
    BuiltIn(ApiScorer),
    Prompt(PromptScorer),
    Custom(CustomScorer),
}

impl Scorer {
    pub fn name(&self) -> &str {
        match self {
            Scorer::BuiltIn(s) => s.name(),
            Scorer::Prompt(s) => s.name(),
            Scorer::Custom(s) => s.name(),
        }
    }

    /// Server-side configuration for judgment scorers.
    ///
    /// Custom scorers have none; their identity goes in the run's
    /// `custom_scorers` list, see [`Scorer::base_scorer`].
    pub fn scorer_config(&self) -> Result<ScorerConfig> {
        match self {
            Scorer::BuiltIn(s) => Ok(s.scorer_config()),
            Scorer::Prompt(s) => Ok(s.scorer_config()),
            Scorer::Custom(s) => Err(JudgmentError::Unsupported(format!(
                "custom scorer '{}' does not use a scorer config",
                s.name()
            ))),
        }
    }

    pub fn base_scorer(&self) -> Option<BaseScorer> {
        match self {
            Scorer::Custom(s) => Some(s.base_scorer()),
            _ => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Scorer::Custom(_))
    }

    /// Example fields the server requires, empty when the scorer has no
    /// fixed requirements.
    pub fn required_params(&self) -> &[String] {
        match self {
            Scorer::BuiltIn(s) => s.required_params(),
            _ => &[],
        }
    }
}

impl From<ApiScorer> for Scorer {
    fn from(scorer: ApiScorer) -> Self {
        Scorer::BuiltIn(scorer)
    }
}

impl From<PromptScorer> for Scorer {
    fn from(scorer: PromptScorer) -> Self {
        Scorer::Prompt(scorer)
    }
}

impl From<CustomScorer> for Scorer {
    fn from(scorer: CustomScorer) -> Self {
        Scorer::Custom(scorer)
    }
}

/// Entry point to every scorer factory, sharing one transport.
#[derive(Clone)]
pub struct ScorersFactory {
    transport: Arc<dyn Transport>,
}

impl ScorersFactory {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn prompt_scorer(&self) -> PromptScorerFactory {
        PromptScorerFactory::new(self.transport.clone(), false)
    }

    pub fn trace_prompt_scorer(&self) -> PromptScorerFactory {
        PromptScorerFactory::new(self.transport.clone(), true)
    }

    pub fn custom_scorer(&self) -> CustomScorerFactory {
        CustomScorerFactory::new()
    }

    pub fn built_in(&self) -> BuiltInScorersFactory {
        BuiltInScorersFactory::new()
    }
}
