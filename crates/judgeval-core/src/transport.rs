use async_trait::async_trait;
use serde_json::Value;

use judgeval_types::{
    EvalResultsFetch, EvaluationRunPayload, EvaluationStatus, FetchPromptScorersRequest,
    FetchPromptScorersResponse, SavePromptScorerRequest, SavePromptScorerResponse,
    ScorerExistsRequest, ScorerExistsResponse,
};

use crate::error::Result;

/// The remote calls the SDK needs from the Judgment API.
///
/// [`crate::client::JudgmentApiClient`] is the HTTP implementation; tests
/// plug in an in-memory one. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn organization_id(&self) -> &str;

    /// Queues an example or trace evaluation run.
    async fn add_to_run_eval_queue(&self, payload: &EvaluationRunPayload) -> Result<Value>;

    async fn get_evaluation_status(
        &self,
        experiment_run_id: &str,
        project_name: &str,
    ) -> Result<EvaluationStatus>;

    /// Raw experiment run; see [`crate::evaluation`] for its layout.
    async fn fetch_experiment_run(&self, request: &EvalResultsFetch) -> Result<Value>;

    async fn fetch_scorers(
        &self,
        request: &FetchPromptScorersRequest,
    ) -> Result<FetchPromptScorersResponse>;

    async fn save_scorer(&self, request: &SavePromptScorerRequest)
        -> Result<SavePromptScorerResponse>;

    async fn scorer_exists(&self, request: &ScorerExistsRequest) -> Result<ScorerExistsResponse>;
}
