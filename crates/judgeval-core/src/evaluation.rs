use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use judgeval_types::{
	BaseScorer, EvalResultsFetch, EvaluationRunPayload, Example, ExampleEvaluationRun,
	ScorerConfig, ScorerData, ScoringResult, TraceEvaluationRun,
};

use crate::error::{JudgmentError, Result};
use crate::scorer::Scorer;
use crate::testing::assert_all_passed;
use crate::transport::Transport;

/// How `Evaluation::run` waits for the server to finish scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
	pub interval: Duration,
	/// Failed status checks tolerated before giving up.
	pub max_failures: usize,
	pub max_polls: usize,
}

impl Default for PollConfig {
	fn default() -> Self {
		Self {
			interval: Duration::from_secs(2),
			max_failures: 5,
			max_polls: 60,
		}
	}
}

/// Hands out evaluation builders bound to one transport.
#[derive(Clone)]
pub struct EvaluationFactory {
	transport: Arc<dyn Transport>,
	default_model: String,
}

impl EvaluationFactory {
	pub fn new(transport: Arc<dyn Transport>, default_model: impl Into<String>) -> Self {
		Self {
			transport,
			default_model: default_model.into(),
		}
	}

	pub fn create(&self) -> EvaluationBuilder {
		let mut builder = EvaluationBuilder::new();
		builder.transport = Some(self.transport.clone());
		builder.model = self.default_model.clone();
		builder
	}
}

pub struct EvaluationBuilder {
	transport: Option<Arc<dyn Transport>>,
	project_name: Option<String>,
	eval_name: Option<String>,
	model: String,
	examples: Vec<Example>,
	traces: Vec<(String, String)>,
	scorers: Vec<Scorer>,
	assert_test: bool,
	poll: PollConfig,
}

impl EvaluationBuilder {
	fn new() -> Self {
		Self {
			transport: None,
			project_name: None,
			eval_name: None,
			model: String::new(),
			examples: Vec::new(),
			traces: Vec::new(),
			scorers: Vec::new(),
			assert_test: false,
			poll: PollConfig::default(),
		}
	}

	pub fn project_name(mut self, project_name: impl Into<String>) -> Self {
		self.project_name = Some(project_name.into());
		self
	}

	pub fn eval_name(mut self, eval_name: impl Into<String>) -> Self {
		self.eval_name = Some(eval_name.into());
		self
	}

	/// Judge model for the run. Defaults to the factory's model.
	pub fn model(mut self, model: impl Into<String>) -> Self {
		self.model = model.into();
		self
	}

	pub fn example(mut self, example: Example) -> Self {
		self.examples.push(example);
		self
	}

	pub fn examples<I>(mut self, examples: I) -> Self
	where
		I: IntoIterator<Item = Example>,
	{
		self.examples.extend(examples);
		self
	}

	/// Scores a recorded span instead of an example.
	pub fn trace(mut self, trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
		self.traces.push((trace_id.into(), span_id.into()));
		self
	}

	pub fn scorer(mut self, scorer: impl Into<Scorer>) -> Self {
		self.scorers.push(scorer.into());
		self
	}

	pub fn scorers<I, S>(mut self, scorers: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Scorer>,
	{
		self.scorers.extend(scorers.into_iter().map(Into::into));
		self
	}

	/// Turn failing results into a [`JudgmentError::Test`].
	pub fn assert_test(mut self, assert_test: bool) -> Self {
		self.assert_test = assert_test;
		self
	}

	pub fn poll(mut self, poll: PollConfig) -> Self {
		self.poll = poll;
		self
	}

	pub fn build(self) -> Result<Evaluation> {
		let transport = self
			.transport
			.ok_or_else(|| JudgmentError::invalid_config("client required"))?;

		Ok(Evaluation {
			transport,
			project_name: self.project_name,
			eval_name: self.eval_name,
			model: self.model,
			examples: self.examples,
			traces: self.traces,
			scorers: self.scorers,
			assert_test: self.assert_test,
			poll: self.poll,
		})
	}
}

/// An assembled evaluation, ready to submit.
pub struct Evaluation {
	transport: Arc<dyn Transport>,
	project_name: Option<String>,
	eval_name: Option<String>,
	model: String,
	examples: Vec<Example>,
	traces: Vec<(String, String)>,
	scorers: Vec<Scorer>,
	assert_test: bool,
	poll: PollConfig,
}

impl std::fmt::Debug for Evaluation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Evaluation")
			.field("base_url", &self.transport.base_url())
			.field("project_name", &self.project_name)
			.field("eval_name", &self.eval_name)
			.field("model", &self.model)
			.field("examples", &self.examples.len())
			.field("traces", &self.traces.len())
			.field("scorers", &self.scorers)
			.finish_non_exhaustive()
	}
}

impl Evaluation {
	/// A builder with no transport; `build()` fails until one is bound,
	/// so use [`EvaluationFactory::create`] instead.
	pub fn builder() -> EvaluationBuilder {
		EvaluationBuilder::new()
	}

	pub fn transport(&self) -> &Arc<dyn Transport> {
		&self.transport
	}

	pub fn project_name(&self) -> Option<&str> {
		self.project_name.as_deref()
	}

	pub fn eval_name(&self) -> Option<&str> {
		self.eval_name.as_deref()
	}

	pub fn model(&self) -> &str {
		&self.model
	}

	pub fn examples(&self) -> &[Example] {
		&self.examples
	}

	pub fn traces(&self) -> &[(String, String)] {
		&self.traces
	}

	pub fn scorers(&self) -> &[Scorer] {
		&self.scorers
	}

	pub fn is_trace_run(&self) -> bool {
		!self.traces.is_empty()
	}

	/// Checks everything the server would reject, without calling it.
	pub fn validate(&self) -> Result<()> {
		require_name("project name", self.project_name.as_deref())?;
		require_name("eval name", self.eval_name.as_deref())?;

		if self.scorers.is_empty() {
			return Err(JudgmentError::invalid_config("at least one scorer is required"));
		}
		match (self.examples.is_empty(), self.traces.is_empty()) {
			(true, true) => {
				return Err(JudgmentError::invalid_config("examples or traces are required"));
			}
			(false, false) => {
				return Err(JudgmentError::invalid_config(
					"an evaluation runs over examples or traces, not both",
				));
			}
			_ => {}
		}

		let trace_run = self.is_trace_run();
		for scorer in &self.scorers {
			if let Scorer::Prompt(prompt) = scorer {
				if prompt.is_trace() != trace_run {
					return Err(JudgmentError::invalid_config(format!(
						"{} '{}' cannot be used in {} evaluation",
						if prompt.is_trace() { "trace prompt scorer" } else { "prompt scorer" },
						prompt.name(),
						if trace_run { "a trace" } else { "an example" },
					)));
				}
			}
		}

		if let Some(first) = self.examples.first() {
			let keys = first.property_keys();
			for example in &self.examples[1..] {
				let current = example.property_keys();
				if current != keys {
					return Err(JudgmentError::invalid_config(format!(
						"All examples must have the same keys: {:?} != {:?}",
						current, keys
					)));
				}
			}
		}

		self.warn_missing_params();
		Ok(())
	}

	fn warn_missing_params(&self) {
		for scorer in &self.scorers {
			for example in &self.examples {
				let missing: Vec<&str> = scorer
					.required_params()
					.iter()
					.map(String::as_str)
					.filter(|param| example.property(param).map_or(true, Value::is_null))
					.collect();
				if !missing.is_empty() {
					tracing::warn!(
						scorer = scorer.name(),
						example_id = %example.example_id,
						"Example is missing required parameters: {}",
						missing.join(", ")
					);
				}
			}
		}
	}

	fn split_scorers(&self) -> Result<(Vec<BaseScorer>, Vec<ScorerConfig>)> {
		let mut custom = Vec::new();
		let mut judgment = Vec::new();
		for scorer in &self.scorers {
			match scorer.base_scorer() {
				Some(base) => custom.push(base),
				None => judgment.push(scorer.scorer_config()?),
			}
		}
		Ok((custom, judgment))
	}

	pub fn example_run(&self) -> Result<ExampleEvaluationRun> {
		self.validate()?;
		if self.is_trace_run() {
			return Err(JudgmentError::invalid_config("evaluation is over traces, not examples"));
		}
		let (custom_scorers, judgment_scorers) = self.split_scorers()?;

		Ok(ExampleEvaluationRun {
			id: Uuid::new_v4().to_string(),
			project_name: self.project_name.clone().unwrap_or_default(),
			eval_name: self.eval_name.clone().unwrap_or_default(),
			custom_scorers,
			judgment_scorers,
			model: self.model.clone(),
			created_at: now(),
			examples: self.examples.clone(),
			trace_span_id: None,
			trace_id: None,
		})
	}

	pub fn trace_run(&self) -> Result<TraceEvaluationRun> {
		self.validate()?;
		if !self.is_trace_run() {
			return Err(JudgmentError::invalid_config("evaluation is over examples, not traces"));
		}
		let (custom_scorers, judgment_scorers) = self.split_scorers()?;

		Ok(TraceEvaluationRun {
			id: Uuid::new_v4().to_string(),
			project_name: self.project_name.clone().unwrap_or_default(),
			eval_name: self.eval_name.clone().unwrap_or_default(),
			custom_scorers,
			judgment_scorers,
			model: self.model.clone(),
			created_at: now(),
			trace_and_span_ids: self.traces.clone(),
			is_offline: false,
		})
	}

	pub fn payload(&self) -> Result<EvaluationRunPayload> {
		if self.is_trace_run() {
			self.trace_run().map(Into::into)
		} else {
			self.example_run().map(Into::into)
		}
	}

	/// Submits the run, waits for scoring to finish and returns one result
	/// per example (or span).
	pub async fn run(&self) -> Result<Vec<ScoringResult>> {
		let payload = self.payload()?;
		let run_id = payload.id().to_string();
		let project_name = payload.project_name().to_string();

		tracing::info!(run_id = %run_id, project = %project_name, "Submitting evaluation to API...");
		let response = self.transport.add_to_run_eval_queue(&payload).await?;
		tracing::debug!(%response, "API response");
		check_submission(&response)?;

		let results = self.poll_until_complete(&run_id, &project_name).await?;
		if self.assert_test {
			assert_all_passed(&results)?;
		}
		Ok(results)
	}

	async fn poll_until_complete(&self, run_id: &str, project_name: &str) -> Result<Vec<ScoringResult>> {
		let started = Instant::now();
		let mut failures = 0usize;

		for attempt in 1..=self.poll.max_polls {
			tracing::info!("Running evaluation... ({} sec)", started.elapsed().as_secs());
			match self.poll_once(run_id, project_name).await {
				Ok(Some(results)) => return Ok(results),
				Ok(None) => {}
				Err(err) => {
					failures += 1;
					tracing::warn!(attempt, error = %err, "evaluation status check failed");
					if failures > self.poll.max_failures {
						return Err(JudgmentError::runtime_with(
							format!("Error checking evaluation status after {} attempts", attempt),
							err,
						));
					}
				}
			}
			if attempt < self.poll.max_polls {
				tokio::time::sleep(self.poll.interval).await;
			}
		}

		Err(JudgmentError::runtime(format!(
			"Error checking evaluation status after {} attempts",
			self.poll.max_polls
		)))
	}

	async fn poll_once(&self, run_id: &str, project_name: &str) -> Result<Option<Vec<ScoringResult>>> {
		let status = self.transport.get_evaluation_status(run_id, project_name).await?;
		if !status.is_completed() {
			tracing::debug!(status = ?status.status, "evaluation still running");
			return Ok(None);
		}

		let request = EvalResultsFetch {
			experiment_run_id: run_id.to_string(),
			project_name: project_name.to_string(),
		};
		let body = self.transport.fetch_experiment_run(&request).await?;
		parse_experiment_run(body)
	}
}

fn require_name(what: &str, value: Option<&str>) -> Result<()> {
	match value {
		Some(v) if !v.trim().is_empty() => Ok(()),
		_ => Err(JudgmentError::invalid_config(format!("{} cannot be empty", what))),
	}
}

fn now() -> String {
	Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The queue answers `{"success": true}`; anything else is a rejection.
fn check_submission(response: &Value) -> Result<()> {
	let Some(body) = response.as_object() else {
		return Ok(());
	};
	if body.get("success") == Some(&Value::Bool(true)) {
		return Ok(());
	}
	let detail = body
		.get("error")
		.and_then(Value::as_str)
		.unwrap_or("evaluation was not accepted by the queue");
	Err(JudgmentError::runtime(detail))
}

#[derive(Debug, Deserialize)]
struct ExperimentRun {
	#[serde(default)]
	examples: Option<Vec<ExperimentExample>>,
}

#[derive(Debug, Deserialize)]
struct ExperimentExample {
	#[serde(default)]
	example_id: Option<String>,
	#[serde(default)]
	created_at: Option<String>,
	#[serde(default)]
	name: Option<String>,
	#[serde(default)]
	scorer_data: Option<Vec<ScorerData>>,
	#[serde(flatten)]
	properties: Map<String, Value>,
}

/// Parses `/fetch_experiment_run/`. `None` means results are not ready yet.
pub fn parse_experiment_run(body: Value) -> Result<Option<Vec<ScoringResult>>> {
	let run: ExperimentRun = serde_json::from_value(body)?;
	let Some(examples) = run.examples else {
		return Ok(None);
	};

	let results = examples
		.into_iter()
		.map(|raw| {
			let example = Example {
				example_id: raw.example_id.unwrap_or_default(),
				created_at: raw.created_at.unwrap_or_default(),
				name: raw.name,
				properties: raw.properties,
			};
			ScoringResult::from_scorers(raw.scorer_data.unwrap_or_default(), Some(example))
		})
		.collect();
	Ok(Some(results))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scorer::ScorersFactory;
	use crate::transport::mock::MockTransport;
	use judgeval_types::EvaluationStatus;
	use serde_json::json;

	fn fast_poll() -> PollConfig {
		PollConfig {
			interval: Duration::ZERO,
			max_failures: 2,
			max_polls: 5,
		}
	}

	fn qa(input: &str, output: &str) -> Example {
		Example::builder()
			.property("input", input)
			.property("actual_output", output)
			.build()
	}

	fn setup() -> (Arc<MockTransport>, ScorersFactory, EvaluationFactory) {
		let transport = Arc::new(MockTransport::new());
		let scorers = ScorersFactory::new(transport.clone());
		let evaluation = EvaluationFactory::new(transport.clone(), "gpt-4.1");
		(transport, scorers, evaluation)
	}

	fn completed_run() -> Value {
		json!({
			"examples": [{
				"example_id": "ex-1",
				"created_at": "2025-01-01T00:00:00.000Z",
				"name": "capital",
				"input": "What is the capital of France?",
				"scorer_data": [{
					"name": "Answer Relevancy",
					"score": 0.9,
					"success": true,
					"threshold": 0.5,
					"evaluation_model": "gpt-4.1"
				}]
			}]
		})
	}

	#[test]
	fn test_factory_build_succeeds_with_transport() {
		let (transport, _, evaluation) = setup();
		let built = evaluation.create().build().unwrap();

		let expected: Arc<dyn Transport> = transport;
		assert!(Arc::ptr_eq(built.transport(), &expected));
		assert_eq!(built.model(), "gpt-4.1");
	}

	#[test]
	fn test_model_comes_from_factory_unless_overridden() {
		let transport: Arc<dyn Transport> = Arc::new(MockTransport::new());
		let evaluation = EvaluationFactory::new(transport, "gpt-4o-mini");

		assert_eq!(evaluation.create().build().unwrap().model(), "gpt-4o-mini");
		assert_eq!(evaluation.create().model("o3").build().unwrap().model(), "o3");
	}

	#[test]
	fn test_builder_without_transport_fails() {
		let err = Evaluation::builder().project_name("p").build().unwrap_err();
		assert!(matches!(err, JudgmentError::InvalidConfig(ref m) if m == "client required"));
	}

	#[test]
	fn test_same_factory_shares_transport() {
		let (_, _, evaluation) = setup();
		let a = evaluation.create().build().unwrap();
		let b = evaluation.create().build().unwrap();
		assert!(Arc::ptr_eq(a.transport(), b.transport()));
	}

	#[test]
	fn test_example_run_splits_scorers() {
		let (_, scorers, evaluation) = setup();
		let run = evaluation
			.create()
			.project_name("support-bot")
			.eval_name("nightly")
			.example(qa("hi", "hello"))
			.scorer(scorers.built_in().answer_relevancy().build().unwrap())
			.scorer(scorers.custom_scorer().get_with_class("tone", "ToneScorer").unwrap())
			.build()
			.unwrap()
			.example_run()
			.unwrap();

		assert_eq!(run.judgment_scorers.len(), 1);
		assert_eq!(run.judgment_scorers[0].name, "Answer Relevancy");
		assert_eq!(run.custom_scorers.len(), 1);
		assert_eq!(run.custom_scorers[0].class_name.as_deref(), Some("ToneScorer"));
		assert_eq!(run.model, "gpt-4.1");
		assert!(Uuid::parse_str(&run.id).is_ok());
	}

	#[test]
	fn test_validation_errors() {
		let (_, scorers, evaluation) = setup();
		let relevancy = || scorers.built_in().answer_relevancy().build().unwrap();

		let no_project = evaluation.create().eval_name("e").example(qa("a", "b")).scorer(relevancy());
		let no_scorers = evaluation.create().project_name("p").eval_name("e").example(qa("a", "b"));
		let no_data = evaluation.create().project_name("p").eval_name("e").scorer(relevancy());
		let mixed = evaluation
			.create()
			.project_name("p")
			.eval_name("e")
			.example(qa("a", "b"))
			.trace("t1", "s1")
			.scorer(relevancy());
		let blank_eval = evaluation
			.create()
			.project_name("p")
			.eval_name(" ")
			.example(qa("a", "b"))
			.scorer(relevancy());

		for builder in [no_project, no_scorers, no_data, mixed, blank_eval] {
			let err = builder.build().unwrap().validate().unwrap_err();
			assert!(matches!(err, JudgmentError::InvalidConfig(_)), "{err}");
		}
	}

	#[test]
	fn test_examples_must_share_keys() {
		let (_, scorers, evaluation) = setup();
		let err = evaluation
			.create()
			.project_name("p")
			.eval_name("e")
			.example(qa("a", "b"))
			.example(Example::builder().property("input", "only input").build())
			.scorer(scorers.built_in().answer_relevancy().build().unwrap())
			.build()
			.unwrap()
			.validate()
			.unwrap_err();

		assert!(err.to_string().contains("All examples must have the same keys"));
	}

	#[test]
	fn test_prompt_scorer_level_must_match_run() {
		let (_, scorers, evaluation) = setup();
		let trace_scorer = scorers
			.trace_prompt_scorer()
			.create()
			.name("tone")
			.prompt("Was the agent polite?")
			.build()
			.unwrap();
		let example_scorer = scorers
			.prompt_scorer()
			.create()
			.name("tone")
			.prompt("Was the answer polite?")
			.build()
			.unwrap();

		let on_examples = evaluation
			.create()
			.project_name("p")
			.eval_name("e")
			.example(qa("a", "b"))
			.scorer(trace_scorer.clone())
			.build()
			.unwrap();
		assert!(on_examples.validate().is_err());

		let on_traces = evaluation
			.create()
			.project_name("p")
			.eval_name("e")
			.trace("t1", "s1")
			.scorer(trace_scorer)
			.build()
			.unwrap();
		let run = on_traces.trace_run().unwrap();
		assert_eq!(run.trace_and_span_ids, vec![("t1".to_string(), "s1".to_string())]);
		assert_eq!(run.judgment_scorers[0].score_type, "Trace Prompt Scorer");

		let wrong = evaluation
			.create()
			.project_name("p")
			.eval_name("e")
			.trace("t1", "s1")
			.scorer(example_scorer)
			.build()
			.unwrap();
		assert!(wrong.validate().is_err());
	}

	#[test]
	fn test_parse_experiment_run() {
		let results = parse_experiment_run(completed_run()).unwrap().unwrap();

		assert_eq!(results.len(), 1);
		assert!(results[0].success);
		let example = results[0].data_object.as_ref().unwrap();
		assert_eq!(example.example_id, "ex-1");
		assert_eq!(example.name.as_deref(), Some("capital"));
		assert_eq!(example.property("input"), Some(&json!("What is the capital of France?")));
		assert!(example.property("scorer_data").is_none());
	}

	#[test]
	fn test_parse_experiment_run_not_ready() {
		assert!(parse_experiment_run(json!({})).unwrap().is_none());
	}

	#[test]
	fn test_check_submission() {
		assert!(check_submission(&json!({"success": true})).is_ok());
		let err = check_submission(&json!({"success": false, "error": "quota exceeded"})).unwrap_err();
		assert_eq!(err.to_string(), "quota exceeded");
	}

	#[tokio::test]
	async fn test_run_submits_polls_and_parses() {
		let (transport, scorers, evaluation) = setup();
		transport.push_status(Ok(EvaluationStatus { status: Some("running".to_string()) }));
		transport.set_experiment_run(completed_run());

		let results = evaluation
			.create()
			.project_name("support-bot")
			.eval_name("nightly")
			.example(qa("What is the capital of France?", "Paris"))
			.scorer(scorers.built_in().answer_relevancy().build().unwrap())
			.poll(fast_poll())
			.build()
			.unwrap()
			.run()
			.await
			.unwrap();

		assert_eq!(results.len(), 1);
		assert_eq!(transport.status_calls(), 2);
		let submitted = transport.submitted();
		assert_eq!(submitted.len(), 1);
		assert!(matches!(submitted[0], EvaluationRunPayload::Examples(_)));
		assert_eq!(submitted[0].project_name(), "support-bot");
	}

	#[tokio::test]
	async fn test_run_gives_up_after_repeated_failures() {
		let (transport, scorers, evaluation) = setup();
		for _ in 0..3 {
			transport.push_status(Err(JudgmentError::api(503, "unavailable")));
		}

		let err = evaluation
			.create()
			.project_name("p")
			.eval_name("e")
			.example(qa("a", "b"))
			.scorer(scorers.built_in().answer_relevancy().build().unwrap())
			.poll(fast_poll())
			.build()
			.unwrap()
			.run()
			.await
			.unwrap_err();

		assert!(matches!(err, JudgmentError::Runtime { .. }));
		assert_eq!(transport.status_calls(), 3);
	}

	#[tokio::test]
	async fn test_run_times_out_when_never_completed() {
		let (transport, scorers, evaluation) = setup();
		for _ in 0..5 {
			transport.push_status(Ok(EvaluationStatus { status: Some("running".to_string()) }));
		}

		let err = evaluation
			.create()
			.project_name("p")
			.eval_name("e")
			.example(qa("a", "b"))
			.scorer(scorers.built_in().answer_relevancy().build().unwrap())
			.poll(fast_poll())
			.build()
			.unwrap()
			.run()
			.await
			.unwrap_err();

		assert_eq!(err.to_string(), "Error checking evaluation status after 5 attempts");
	}

	#[tokio::test]
	async fn test_assert_test_fails_on_failed_scorer() {
		let (transport, scorers, evaluation) = setup();
		transport.set_experiment_run(json!({
			"examples": [{
				"example_id": "ex-1",
				"created_at": "2025-01-01T00:00:00.000Z",
				"scorer_data": [{"name": "Answer Relevancy", "score": 0.1, "success": false}]
			}]
		}));

		let err = evaluation
			.create()
			.project_name("p")
			.eval_name("e")
			.example(qa("a", "b"))
			.scorer(scorers.built_in().answer_relevancy().build().unwrap())
			.assert_test(true)
			.poll(fast_poll())
			.build()
			.unwrap()
			.run()
			.await
			.unwrap_err();

		assert!(matches!(err, JudgmentError::Test { .. }));
		assert!(err.to_string().contains("Scorer Name: Answer Relevancy"));
	}

	#[tokio::test]
	async fn test_invalid_run_never_reaches_transport() {
		let (transport, scorers, evaluation) = setup();
		let err = evaluation
			.create()
			.eval_name("e")
			.example(qa("a", "b"))
			.scorer(scorers.built_in().answer_relevancy().build().unwrap())
			.build()
			.unwrap()
			.run()
			.await
			.unwrap_err();

		assert!(matches!(err, JudgmentError::InvalidConfig(_)));
		assert!(transport.submitted().is_empty());
	}
}
