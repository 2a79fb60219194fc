use judgeval_types::ApiScorerType;

use crate::scorers::api::ApiScorerBuilder;

/// Server-side scorers with a fixed name and fixed required example fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltInScorersFactory;

impl BuiltInScorersFactory {
    pub fn new() -> Self {
        Self
    }

    /// Compares `actual_output` to `expected_output` for the given `input`.
    pub fn answer_correctness(&self) -> ApiScorerBuilder {
        ApiScorerBuilder::new(
            ApiScorerType::AnswerCorrectness,
            ["input", "actual_output", "expected_output"],
        )
    }

    pub fn answer_relevancy(&self) -> ApiScorerBuilder {
        ApiScorerBuilder::new(ApiScorerType::AnswerRelevancy, ["input", "actual_output"])
    }

    /// Checks that `actual_output` is grounded in `context`.
    pub fn faithfulness(&self) -> ApiScorerBuilder {
        ApiScorerBuilder::new(ApiScorerType::Faithfulness, ["context", "actual_output"])
    }

    pub fn instruction_adherence(&self) -> ApiScorerBuilder {
        ApiScorerBuilder::new(ApiScorerType::InstructionAdherence, ["input", "actual_output"])
    }

    pub fn derailment(&self) -> ApiScorerBuilder {
        ApiScorerBuilder::new(ApiScorerType::Derailment, ["input", "actual_output"])
    }
}
