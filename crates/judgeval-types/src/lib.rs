//! judgeval-types: the JSON payloads exchanged with the Judgment API.
//! Field names follow the remote contract; everything here is plain serde data.

mod api;
mod example;
mod results;
mod run;
mod scorer;

pub use api::{
    EvalResultsFetch, EvaluationStatus, FetchPromptScorersRequest, FetchPromptScorersResponse,
    PromptScorerModel, SavePromptScorerRequest, SavePromptScorerResponse, ScorerExistsRequest,
    ScorerExistsResponse,
};
pub use example::{Example, ExampleBuilder};
pub use results::{EvalSummary, ScorerData, ScoringResult};
pub use run::{EvaluationRunPayload, ExampleEvaluationRun, TraceEvaluationRun};
pub use scorer::{ApiScorerType, BaseScorer, ScorerConfig};
