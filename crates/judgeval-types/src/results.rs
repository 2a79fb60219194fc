use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::{Table, Tabled};

use crate::example::Example;

/// Outcome of one scorer on one example, as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerData {
	pub name: String,
	#[serde(default)]
	pub score: Option<f64>,
	#[serde(default)]
	pub success: Option<bool>,
	#[serde(default)]
	pub reason: Option<String>,
	#[serde(default)]
	pub threshold: Option<f64>,
	#[serde(default)]
	pub strict_mode: Option<bool>,
	#[serde(default)]
	pub evaluation_model: Option<Value>,
	#[serde(default)]
	pub error: Option<String>,
	#[serde(default)]
	pub additional_metadata: Option<Value>,
}

impl ScorerData {
	pub fn passed(&self) -> bool {
		self.success == Some(true)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
	pub success: bool,
	#[serde(default)]
	pub scorers_data: Vec<ScorerData>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data_object: Option<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
	pub total: usize,
	pub passed: usize,
	pub pass_rate: f64,
	pub avg_score: f64,
}

#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
	example: String,
	passed: String,
	avg_score: f64,
	scorers: String,
	failures: String,
}

impl ScoringResult {
	/// A result passes when every scorer reported success.
	pub fn from_scorers(scorers_data: Vec<ScorerData>, data_object: Option<Example>) -> Self {
		let success = scorers_data.iter().all(ScorerData::passed);
		Self { success, scorers_data, data_object }
	}

	pub fn failed_scorers(&self) -> impl Iterator<Item = &ScorerData> {
		self.scorers_data.iter().filter(|s| !s.passed())
	}

	pub fn summarize(results: &[ScoringResult]) -> EvalSummary {
		let total = results.len();
		let mut passed = 0usize;
		let mut score_sum = 0.0f64;
		let mut score_count = 0usize;

		for result in results {
			if result.success {
				passed += 1;
			}
			for score in result.scorers_data.iter().filter_map(|s| s.score) {
				score_sum += score;
				score_count += 1;
			}
		}

		let pass_rate = if total == 0 { 0.0 } else { passed as f64 / total as f64 };
		let avg_score = if score_count == 0 { 0.0 } else { score_sum / score_count as f64 };

		EvalSummary { total, passed, pass_rate, avg_score }
	}

	pub fn summary_table(results: &[ScoringResult]) -> String {
		let rows: Vec<SummaryRow> = results.iter().enumerate().map(|(idx, result)| {
			let example = result
				.data_object
				.as_ref()
				.and_then(|e| e.name.clone())
				.unwrap_or_else(|| format!("#{}", idx + 1));
			let scores: Vec<f64> = result.scorers_data.iter().filter_map(|s| s.score).collect();
			let avg = if scores.is_empty() {
				0.0
			} else {
				scores.iter().sum::<f64>() / scores.len() as f64
			};
			let scorers = result
				.scorers_data
				.iter()
				.map(|s| match s.score {
					Some(score) => format!("{}={:.3}", s.name, score),
					None => format!("{}=-", s.name),
				})
				.collect::<Vec<_>>()
				.join(", ");
			let failures = result
				.failed_scorers()
				.map(|s| s.reason.clone().or_else(|| s.error.clone()).unwrap_or_else(|| s.name.clone()))
				.collect::<Vec<_>>()
				.join("; ");

			SummaryRow {
				example,
				passed: if result.success { "✓" } else { " " }.to_string(),
				avg_score: avg,
				scorers: truncate(scorers, 64),
				failures: truncate(failures, 64),
			}
		}).collect();

		let summary = Self::summarize(results);
		let summary_text = format!(
			"Total: {}  Passed: {}  Pass rate: {:.1}%  Avg score: {:.3}",
			summary.total,
			summary.passed,
			summary.pass_rate * 100.0,
			summary.avg_score
		);

		format!("{}\n\n{}\n", Table::new(rows), summary_text)
	}
}

fn truncate(s: String, max_len: usize) -> String {
	if s.chars().count() <= max_len {
		return s;
	}
	let mut truncated = s.chars().take(max_len.saturating_sub(1)).collect::<String>();
	truncated.push('…');
	truncated
}
