use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::datasource::{DataSource, JsonlDataSource};
use crate::error::{JudgmentError, Result};
use crate::evaluation::{EvaluationBuilder, EvaluationFactory, PollConfig};
use crate::scorer::{Scorer, ScorersFactory};
use crate::scorers::api::ApiScorerBuilder;

/// An evaluation described in a YAML or JSON file, as run by the CLI.
///
/// ```yaml
/// project_name: support-bot
/// eval_name: nightly
/// data:
///   path: examples.jsonl
/// scorers:
///   - type: built_in
///     kind: faithfulness
///     threshold: 0.8
///   - type: custom
///     name: helpfulness
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub project_name: String,
    pub eval_name: String,
    #[serde(default)]
    pub model: Option<String>,
    pub data: DataConfig,
    pub scorers: Vec<ScorerSpec>,
    #[serde(default)]
    pub assert_test: bool,
    #[serde(default)]
    pub poll: Option<PollSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: f64,
    #[serde(default = "default_max_failures")]
    pub max_failures: usize,
    #[serde(default = "default_max_polls")]
    pub max_polls: usize,
}

fn default_interval_secs() -> f64 {
    2.0
}

fn default_max_failures() -> usize {
    5
}

fn default_max_polls() -> usize {
    60
}

impl PollSettings {
    pub fn to_poll_config(&self) -> Result<PollConfig> {
        let interval = Duration::try_from_secs_f64(self.interval_secs).map_err(|_| {
            JudgmentError::invalid_config(format!("invalid poll interval: {}", self.interval_secs))
        })?;
        Ok(PollConfig {
            interval,
            max_failures: self.max_failures,
            max_polls: self.max_polls,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltInKind {
    AnswerCorrectness,
    AnswerRelevancy,
    Faithfulness,
    InstructionAdherence,
    Derailment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum ScorerSpec {
    BuiltIn {
        kind: BuiltInKind,
        #[serde(default)]
        threshold: Option<f64>,
        #[serde(default)]
        strict_mode: bool,
        #[serde(default)]
        model: Option<String>,
    },
    Prompt {
        name: String,
        prompt: String,
        #[serde(default)]
        threshold: Option<f64>,
        #[serde(default)]
        options: Option<BTreeMap<String, f64>>,
        #[serde(default)]
        trace: bool,
    },
    /// A prompt scorer previously saved on the platform.
    SavedPrompt {
        name: String,
        #[serde(default)]
        trace: bool,
    },
    Custom {
        name: String,
        #[serde(default)]
        class_name: Option<String>,
    },
}

impl EvalConfig {
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| JudgmentError::runtime_with(format!("Failed to read {:?}", path), e))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Ok(serde_json::from_str(&content)?),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| JudgmentError::invalid_config(format!("invalid eval config: {}", e)))
    }

    /// Resolves every scorer entry. Saved prompt scorers are fetched.
    pub async fn build_scorers(&self, factory: &ScorersFactory) -> Result<Vec<Scorer>> {
        let mut scorers = Vec::with_capacity(self.scorers.len());
        for spec in &self.scorers {
            scorers.push(spec.build(factory).await?);
        }
        Ok(scorers)
    }

    /// Loads the data file and assembles an evaluation builder; relative data
    /// paths resolve against `base_dir`.
    pub async fn evaluation(
        &self,
        base_dir: &Path,
        scorers: &ScorersFactory,
        evaluations: &EvaluationFactory,
    ) -> Result<EvaluationBuilder> {
        let data_path = if self.data.path.is_absolute() {
            self.data.path.clone()
        } else {
            base_dir.join(&self.data.path)
        };
        let examples = JsonlDataSource::new(data_path).load().await?;

        let mut builder = evaluations
            .create()
            .project_name(&self.project_name)
            .eval_name(&self.eval_name)
            .examples(examples)
            .scorers(self.build_scorers(scorers).await?)
            .assert_test(self.assert_test);
        if let Some(model) = &self.model {
            builder = builder.model(model);
        }
        if let Some(poll) = &self.poll {
            builder = builder.poll(poll.to_poll_config()?);
        }
        Ok(builder)
    }
}

impl ScorerSpec {
    pub async fn build(&self, factory: &ScorersFactory) -> Result<Scorer> {
        match self {
            ScorerSpec::BuiltIn {
                kind,
                threshold,
                strict_mode,
                model,
            } => {
                let built_in = factory.built_in();
                let mut builder: ApiScorerBuilder = match kind {
                    BuiltInKind::AnswerCorrectness => built_in.answer_correctness(),
                    BuiltInKind::AnswerRelevancy => built_in.answer_relevancy(),
                    BuiltInKind::Faithfulness => built_in.faithfulness(),
                    BuiltInKind::InstructionAdherence => built_in.instruction_adherence(),
                    BuiltInKind::Derailment => built_in.derailment(),
                };
                if let Some(threshold) = threshold {
                    builder = builder.threshold(*threshold);
                }
                if let Some(model) = model {
                    builder = builder.model(model);
                }
                Ok(builder.strict_mode(*strict_mode).build()?.into())
            }
            ScorerSpec::Prompt {
                name,
                prompt,
                threshold,
                options,
                trace,
            } => {
                let prompt_factory = if *trace {
                    factory.trace_prompt_scorer()
                } else {
                    factory.prompt_scorer()
                };
                let mut builder = prompt_factory.create().name(name).prompt(prompt);
                if let Some(threshold) = threshold {
                    builder = builder.threshold(*threshold);
                }
                if let Some(options) = options {
                    builder = builder.options(options.clone());
                }
                Ok(builder.build()?.into())
            }
            ScorerSpec::SavedPrompt { name, trace } => {
                let prompt_factory = if *trace {
                    factory.trace_prompt_scorer()
                } else {
                    factory.prompt_scorer()
                };
                Ok(prompt_factory.get(name).await?.into())
            }
            ScorerSpec::Custom { name, class_name } => {
                let custom = factory.custom_scorer();
                let scorer = match class_name {
                    Some(class_name) => custom.get_with_class(name, class_name)?,
                    None => custom.get(name)?,
                };
                Ok(scorer.into())
            }
        }
    }
}
