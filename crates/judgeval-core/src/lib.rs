//! judgeval-core: Rust SDK for the Judgment evaluation platform.
//! Configure built-in, prompt and custom scorers, assemble evaluation runs
//! over examples or traces, and submit them to the Judgment API.
//! See `examples/quick_start.rs` for a quickstart.

pub mod client;
pub mod config;
pub mod datasource;
pub mod env;
pub mod error;
pub mod evaluation;
pub mod judgeval;
pub mod logging;
pub mod scorer;
pub mod telemetry;
pub mod testing;
pub mod transport;

pub mod scorers {
    pub mod api;
    pub mod built_in;
    pub mod custom;
    pub mod prompt;
}

pub use client::JudgmentApiClient;
pub use config::{EvalConfig, ScorerSpec};
pub use datasource::{DataSource, JsonlDataSource, VecDataSource};
pub use env::Env;
pub use error::{JudgmentError, Result};
pub use evaluation::{Evaluation, EvaluationBuilder, EvaluationFactory, PollConfig};
#[allow(deprecated)]
pub use judgeval::JudgmentClient;
pub use judgeval::{Judgeval, JudgevalBuilder};
pub use scorer::{Scorer, ScorersFactory};
pub use scorers::{
    api::{ApiScorer, ApiScorerBuilder},
    built_in::BuiltInScorersFactory,
    custom::{CustomScorer, CustomScorerFactory},
    prompt::{PromptScorer, PromptScorerBuilder, PromptScorerFactory},
};
pub use telemetry::{OpenAiInstrumentation, OpenAiTelemetry};
pub use transport::Transport;

pub use judgeval_types::{
    ApiScorerType, EvalSummary, Example, ExampleBuilder, ScorerData, ScoringResult,
};
