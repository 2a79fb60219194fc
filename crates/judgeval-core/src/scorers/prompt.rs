use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock, RwLock};

use serde_json::{Map, Value};

use judgeval_types::{
    ApiScorerType, FetchPromptScorersRequest, PromptScorerModel, SavePromptScorerRequest,
    SavePromptScorerResponse, ScorerConfig, ScorerExistsRequest,
};

use crate::error::{JudgmentError, Result};
use crate::scorers::api::{validate_threshold, DEFAULT_THRESHOLD};
use crate::transport::Transport;

/// A scorer driven by a natural-language rubric evaluated by a judge model.
///
/// `options` maps each answer the judge may give to its score, e.g.
/// `{"yes": 1.0, "no": 0.0}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptScorer {
    name: String,
    prompt: String,
    threshold: f64,
    options: Option<BTreeMap<String, f64>>,
    model: Option<String>,
    description: Option<String>,
    is_trace: bool,
}

impl PromptScorer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn options(&self) -> Option<&BTreeMap<String, f64>> {
        self.options.as_ref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Trace-level scorers judge whole traces and attach only to trace runs.
    pub fn is_trace(&self) -> bool {
        self.is_trace
    }

    pub fn score_type(&self) -> ApiScorerType {
        if self.is_trace {
            ApiScorerType::TracePromptScorer
        } else {
            ApiScorerType::PromptScorer
        }
    }

    pub fn scorer_config(&self) -> ScorerConfig {
        let mut kwargs = Map::new();
        kwargs.insert("prompt".to_string(), Value::String(self.prompt.clone()));
        if let Some(options) = self.options_value() {
            kwargs.insert("options".to_string(), Value::Object(options));
        }
        if let Some(model) = &self.model {
            kwargs.insert("model".to_string(), Value::String(model.clone()));
        }

        ScorerConfig {
            score_type: self.score_type().to_string(),
            name: self.name.clone(),
            threshold: Some(self.threshold),
            strict_mode: false,
            required_params: Vec::new(),
            kwargs,
        }
    }

    pub fn save_request(&self) -> SavePromptScorerRequest {
        SavePromptScorerRequest {
            name: self.name.clone(),
            prompt: self.prompt.clone(),
            threshold: Some(self.threshold),
            options: self.options_value(),
            model: self.model.clone(),
            is_trace: Some(self.is_trace),
            description: self.description.clone(),
        }
    }

    fn options_value(&self) -> Option<Map<String, Value>> {
        self.options.as_ref().map(|options| {
            options
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(*v)))
                .collect()
        })
    }
}

#[derive(Debug, Clone)]
pub struct PromptScorerBuilder {
    name: Option<String>,
    prompt: Option<String>,
    threshold: f64,
    options: Option<BTreeMap<String, f64>>,
    model: Option<String>,
    description: Option<String>,
    is_trace: bool,
}

impl PromptScorerBuilder {
    fn new(is_trace: bool) -> Self {
        Self {
            name: None,
            prompt: None,
            threshold: DEFAULT_THRESHOLD,
            options: None,
            model: None,
            description: None,
            is_trace,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn options<I, K>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.options = Some(options.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    pub fn option(mut self, choice: impl Into<String>, score: f64) -> Self {
        self.options
            .get_or_insert_with(BTreeMap::new)
            .insert(choice.into(), score);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> Result<PromptScorer> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| JudgmentError::invalid_config("prompt scorer name required"))?;
        let prompt = self
            .prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                JudgmentError::invalid_config(format!("prompt scorer '{}' requires a prompt", name))
            })?;

        Ok(PromptScorer {
            name,
            prompt,
            threshold: validate_threshold(self.threshold)?,
            options: self.options,
            model: self.model,
            description: self.description,
            is_trace: self.is_trace,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    name: String,
    api_key: String,
    organization_id: String,
}

fn cache() -> &'static RwLock<HashMap<CacheKey, PromptScorerModel>> {
    static CACHE: OnceLock<RwLock<HashMap<CacheKey, PromptScorerModel>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Creates prompt scorers and manages the ones saved on the platform.
///
/// Each factory is bound to one level: example scorers or trace scorers.
#[derive(Clone)]
pub struct PromptScorerFactory {
    transport: Arc<dyn Transport>,
    is_trace: bool,
}

impl PromptScorerFactory {
    pub fn new(transport: Arc<dyn Transport>, is_trace: bool) -> Self {
        Self {
            transport,
            is_trace,
        }
    }

    pub fn is_trace(&self) -> bool {
        self.is_trace
    }

    pub fn create(&self) -> PromptScorerBuilder {
        PromptScorerBuilder::new(self.is_trace)
    }

    /// Loads a saved scorer by name. Lookups are cached for the life of the
    /// process per name and credentials.
    ///
    /// Fails with a 404 API error when no such scorer exists and a 400 when
    /// it exists at the other level.
    pub async fn get(&self, name: &str) -> Result<PromptScorer> {
        let key = CacheKey {
            name: name.to_string(),
            api_key: self.transport.api_key().to_string(),
            organization_id: self.transport.organization_id().to_string(),
        };

        let cached = cache()
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&key)
            .cloned();
        let model = match cached {
            Some(model) => {
                tracing::debug!(name, "prompt scorer cache hit");
                model
            }
            None => {
                let model = self.fetch(name).await?;
                cache()
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .insert(key, model.clone());
                model
            }
        };

        let found_trace = model.is_trace == Some(true);
        if found_trace != self.is_trace {
            return Err(JudgmentError::api(
                400,
                format!(
                    "Scorer with name {} is a {}, not a {}",
                    name,
                    level_name(found_trace),
                    level_name(self.is_trace)
                ),
            ));
        }

        self.scorer_from_model(model, name)
    }

    async fn fetch(&self, name: &str) -> Result<PromptScorerModel> {
        let request = FetchPromptScorersRequest {
            names: vec![name.to_string()],
            is_trace: None,
        };
        let response = self.transport.fetch_scorers(&request).await.map_err(|err| {
            JudgmentError::api(500, format!("Failed to fetch prompt scorer '{}': {}", name, err))
        })?;

        response.scorers.into_iter().next().ok_or_else(|| {
            JudgmentError::api(404, format!("Failed to fetch prompt scorer '{}': not found", name))
        })
    }

    /// Saves `scorer` on the platform, replacing any scorer with that name.
    pub async fn save(&self, scorer: &PromptScorer) -> Result<SavePromptScorerResponse> {
        if scorer.is_trace() != self.is_trace {
            return Err(JudgmentError::invalid_config(format!(
                "cannot save {} '{}' through a {} factory",
                level_name(scorer.is_trace()),
                scorer.name(),
                level_name(self.is_trace)
            )));
        }

        let response = self.transport.save_scorer(&scorer.save_request()).await?;
        tracing::info!(name = scorer.name(), "saved prompt scorer");

        let mut entries = cache().write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.retain(|k, _| {
            !(k.name == scorer.name()
                && k.api_key == self.transport.api_key()
                && k.organization_id == self.transport.organization_id())
        });
        Ok(response)
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        let request = ScorerExistsRequest {
            name: name.to_string(),
        };
        Ok(self.transport.scorer_exists(&request).await?.exists)
    }

    fn scorer_from_model(&self, model: PromptScorerModel, name: &str) -> Result<PromptScorer> {
        let mut builder = self
            .create()
            .name(name)
            .prompt(model.prompt)
            .threshold(model.threshold.unwrap_or(DEFAULT_THRESHOLD));

        // Non-numeric option values are not scores and are dropped.
        if let Some(Value::Object(options)) = model.options {
            builder = builder.options(
                options
                    .into_iter()
                    .filter_map(|(k, v)| v.as_f64().map(|score| (k, score))),
            );
        }
        if let Some(model_name) = model.model {
            builder = builder.model(model_name);
        }
        if let Some(description) = model.description {
            builder = builder.description(description);
        }
        builder.build()
    }
}

fn level_name(is_trace: bool) -> &'static str {
    if is_trace {
        "TracePromptScorer"
    } else {
        "PromptScorer"
    }
}
