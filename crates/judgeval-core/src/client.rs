use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use judgeval_types::{
    EvalResultsFetch, EvaluationRunPayload, EvaluationStatus, FetchPromptScorersRequest,
    FetchPromptScorersResponse, SavePromptScorerRequest, SavePromptScorerResponse,
    ScorerExistsRequest, ScorerExistsResponse,
};

use crate::error::{JudgmentError, Result};
use crate::transport::Transport;

const ORGANIZATION_HEADER: &str = "X-Organization-Id";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Judgment API.
#[derive(Clone)]
pub struct JudgmentApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    organization_id: String,
}

impl std::fmt::Debug for JudgmentApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgmentApiClient")
            .field("base_url", &self.base_url)
            .field("organization_id", &self.organization_id)
            .finish_non_exhaustive()
    }
}

impl JudgmentApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        organization_id: impl Into<String>,
    ) -> Result<Self> {
        Self::with_timeout(base_url, api_key, organization_id, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        organization_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(JudgmentError::invalid_config("api url is empty"));
        }
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(JudgmentError::invalid_config("api key is empty"));
        }
        let organization_id = organization_id.into();
        if organization_id.trim().is_empty() {
            return Err(JudgmentError::invalid_config("organization id is empty"));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| JudgmentError::invalid_config("api key is not a valid header value"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ORGANIZATION_HEADER,
            HeaderValue::from_str(&organization_id).map_err(|_| {
                JudgmentError::invalid_config("organization id is not a valid header value")
            })?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
            organization_id,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(JudgmentError::api(status.as_u16(), detail));
        }
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl Transport for JudgmentApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn organization_id(&self) -> &str {
        &self.organization_id
    }

    async fn add_to_run_eval_queue(&self, payload: &EvaluationRunPayload) -> Result<Value> {
        self.post("/add_to_run_eval_queue/", payload).await
    }

    async fn get_evaluation_status(
        &self,
        experiment_run_id: &str,
        project_name: &str,
    ) -> Result<EvaluationStatus> {
        let resp = self
            .http
            .get(self.url("/get_evaluation_status/"))
            .query(&[
                ("experiment_run_id", experiment_run_id),
                ("project_name", project_name),
            ])
            .send()
            .await?;
        Self::handle(resp).await
    }

    async fn fetch_experiment_run(&self, request: &EvalResultsFetch) -> Result<Value> {
        self.post("/fetch_experiment_run/", request).await
    }

    async fn fetch_scorers(
        &self,
        request: &FetchPromptScorersRequest,
    ) -> Result<FetchPromptScorersResponse> {
        self.post("/fetch_scorers/", request).await
    }

    async fn save_scorer(
        &self,
        request: &SavePromptScorerRequest,
    ) -> Result<SavePromptScorerResponse> {
        self.post("/save_scorer/", request).await
    }

    async fn scorer_exists(&self, request: &ScorerExistsRequest) -> Result<ScorerExistsResponse> {
        self.post("/scorer_exists/", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_credentials() {
        let err = JudgmentApiClient::new("https://api.judgmentlabs.ai", " ", "org").unwrap_err();
        assert!(matches!(err, JudgmentError::InvalidConfig(_)));

        let err = JudgmentApiClient::new("https://api.judgmentlabs.ai", "key", "").unwrap_err();
        assert!(matches!(err, JudgmentError::InvalidConfig(_)));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = JudgmentApiClient::new("http://localhost:8000/", "key", "org").unwrap();
        assert_eq!(client.url("/fetch_scorers/"), "http://localhost:8000/fetch_scorers/");
        assert_eq!(client.base_url(), "http://localhost:8000/");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = JudgmentApiClient::new("http://localhost", "sk-secret", "org").unwrap();
        assert!(!format!("{:?}", client).contains("sk-secret"));
    }
}
