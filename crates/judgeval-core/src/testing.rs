use std::fmt::Write as _;

use judgeval_types::{ScorerData, ScoringResult};

use crate::error::{JudgmentError, Result};

/// Fails unless every result passed, describing each failing scorer.
///
/// Evaluations built with `assert_test(true)` call this after results come
/// back; it can also be used directly in `#[tokio::test]` functions.
///
/// # Example
/// ```ignore
/// #[tokio::test]
/// async fn test_my_agent() -> judgeval_core::Result<()> {
///     let results = client
///         .evaluation()
///         .create()
///         .project_name("support-bot")
///         .eval_name("nightly")
///         .examples(examples)
///         .scorer(faithfulness)
///         .build()?
///         .run()
///         .await?;
///
///     assert_all_passed(&results)
/// }
/// ```
pub fn assert_all_passed(results: &[ScoringResult]) -> Result<()> {
	if results.is_empty() {
		return Err(JudgmentError::test("No results to assert"));
	}

	let total = results.len();
	let failed: Vec<(usize, &ScoringResult)> = results
		.iter()
		.enumerate()
		.filter(|(_, r)| !r.success)
		.collect();

	if failed.is_empty() {
		tracing::info!("ALL TESTS PASSED! {}/{} tests successful", total, total);
		return Ok(());
	}

	let passed = total - failed.len();
	tracing::error!("TEST RESULTS: {}/{} passed ({} failed)", passed, total, failed.len());

	let mut message = String::from("The following test cases failed: \n");
	for (idx, result) in &failed {
		tracing::error!("Test {}: FAILED", idx + 1);
		for scorer in result.failed_scorers() {
			tracing::warn!(
				scorer = %scorer.name,
				score = ?scorer.score,
				reason = ?scorer.reason,
				error = ?scorer.error,
				"failed scorer"
			);
			describe_failure(&mut message, scorer);
		}
		message.push_str(&"-".repeat(100));
	}
	let _ = write!(
		message,
		"\nTEST RESULTS: {}/{} passed ({} failed)",
		passed,
		total,
		failed.len()
	);

	Err(JudgmentError::test(message))
}

/// Fails when fewer than `min_pass_rate` of the results passed.
pub fn assert_pass_rate(results: &[ScoringResult], min_pass_rate: f64) -> Result<()> {
	let summary = ScoringResult::summarize(results);
	if summary.pass_rate < min_pass_rate {
		return Err(JudgmentError::test(format!(
			"Evaluation failed: pass rate {:.1}% is below threshold {:.1}%\n{}",
			summary.pass_rate * 100.0,
			min_pass_rate * 100.0,
			ScoringResult::summary_table(results)
		)));
	}
	Ok(())
}

/// Fails when the mean score over all scorers is below `min_avg_score`.
pub fn assert_avg_score(results: &[ScoringResult], min_avg_score: f64) -> Result<()> {
	let summary = ScoringResult::summarize(results);
	if summary.avg_score < min_avg_score {
		return Err(JudgmentError::test(format!(
			"Evaluation failed: avg score {:.3} is below threshold {:.3}\n{}",
			summary.avg_score,
			min_avg_score,
			ScoringResult::summary_table(results)
		)));
	}
	Ok(())
}

fn describe_failure(out: &mut String, scorer: &ScorerData) {
	let _ = writeln!(out, "\nScorer Name: {}", scorer.name);
	let _ = writeln!(out, "Threshold: {}", display_opt(&scorer.threshold));
	let _ = writeln!(out, "Success: {}", display_opt(&scorer.success));
	let _ = writeln!(out, "Score: {}", display_opt(&scorer.score));
	let _ = writeln!(out, "Reason: {}", display_opt(&scorer.reason));
	let _ = writeln!(out, "Strict Mode: {}", display_opt(&scorer.strict_mode));
	let _ = writeln!(out, "Evaluation Model: {}", display_opt(&scorer.evaluation_model));
	let _ = writeln!(out, "Error: {}", display_opt(&scorer.error));
	let _ = writeln!(out, "Additional Metadata: {}", display_opt(&scorer.additional_metadata));
}

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
	match value {
		Some(v) => v.to_string(),
		None => "null".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn result(name: &str, score: f64, success: bool) -> ScoringResult {
		ScoringResult::from_scorers(
			vec![ScorerData {
				name: name.to_string(),
				score: Some(score),
				success: Some(success),
				reason: Some("because".to_string()),
				threshold: Some(0.5),
				strict_mode: Some(false),
				evaluation_model: None,
				error: None,
				additional_metadata: None,
			}],
			None,
		)
	}

	#[test]
	fn test_all_passed() {
		let results = vec![result("Faithfulness", 0.9, true), result("Faithfulness", 0.8, true)];
		assert!(assert_all_passed(&results).is_ok());
	}

	#[test]
	fn test_empty_results_fail() {
		let err = assert_all_passed(&[]).unwrap_err();
		assert_eq!(err.to_string(), "No results to assert");
	}

	#[test]
	fn test_failure_message_lists_scorers() {
		let results = vec![result("Faithfulness", 0.9, true), result("Answer Relevancy", 0.2, false)];
		let err = assert_all_passed(&results).unwrap_err();
		let message = err.to_string();

		assert!(matches!(err, JudgmentError::Test { .. }));
		assert!(message.contains("Scorer Name: Answer Relevancy"));
		assert!(message.contains("Score: 0.2"));
		assert!(message.contains("Evaluation Model: null"));
		assert!(message.ends_with("TEST RESULTS: 1/2 passed (1 failed)"));
		assert!(!message.contains("Scorer Name: Faithfulness"));
	}

	#[test]
	fn test_pass_rate_and_avg_score() {
		let results = vec![result("a", 1.0, true), result("a", 0.0, false)];

		assert!(assert_pass_rate(&results, 0.5).is_ok());
		assert!(assert_pass_rate(&results, 0.8).is_err());
		assert!(assert_avg_score(&results, 0.5).is_ok());
		assert!(assert_avg_score(&results, 0.6).is_err());
	}
}
