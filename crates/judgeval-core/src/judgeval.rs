use std::sync::Arc;

use crate::client::JudgmentApiClient;
use crate::env::Env;
use crate::error::{JudgmentError, Result};
use crate::evaluation::EvaluationFactory;
use crate::scorer::ScorersFactory;
use crate::transport::Transport;

/// SDK entry point. Holds the API connection shared by every factory.
///
/// ```ignore
/// let client = Judgeval::builder().build()?; // JUDGMENT_API_KEY / JUDGMENT_ORG_ID
/// let faithfulness = client.scorers().built_in().faithfulness().threshold(0.8).build()?;
/// ```
#[derive(Clone)]
pub struct Judgeval {
    transport: Arc<dyn Transport>,
    default_model: String,
}

/// Former name of [`Judgeval`].
#[deprecated(note = "use `Judgeval`")]
pub type JudgmentClient = Judgeval;

impl Judgeval {
    pub fn builder() -> JudgevalBuilder {
        JudgevalBuilder::from_env(Env::global())
    }

    /// Wraps an existing transport, e.g. a test double.
    pub fn with_transport(transport: Arc<dyn Transport>, default_model: impl Into<String>) -> Self {
        Self {
            transport,
            default_model: default_model.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn organization_id(&self) -> &str {
        self.transport.organization_id()
    }

    pub fn scorers(&self) -> ScorersFactory {
        ScorersFactory::new(self.transport.clone())
    }

    pub fn evaluation(&self) -> EvaluationFactory {
        EvaluationFactory::new(self.transport.clone(), self.default_model.clone())
    }
}

#[derive(Clone)]
pub struct JudgevalBuilder {
    api_key: Option<String>,
    organization_id: Option<String>,
    api_url: String,
    default_model: String,
}

impl JudgevalBuilder {
    /// Starts from explicit settings instead of the process environment.
    pub fn from_env(env: &Env) -> Self {
        Self {
            api_key: env.api_key.clone(),
            organization_id: env.org_id.clone(),
            api_url: env.api_url.clone(),
            default_model: env.default_gpt_model.clone(),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn build(self) -> Result<Judgeval> {
        let api_key = self
            .api_key
            .ok_or_else(|| JudgmentError::invalid_config("api key required (set JUDGMENT_API_KEY)"))?;
        let organization_id = self.organization_id.ok_or_else(|| {
            JudgmentError::invalid_config("organization id required (set JUDGMENT_ORG_ID)")
        })?;
        let client = JudgmentApiClient::new(self.api_url, api_key, organization_id)?;

        Ok(Judgeval {
            transport: Arc::new(client),
            default_model: self.default_model,
        })
    }
}
