use judgeval_core::{
    logging, DataSource, Env, Example, Judgeval, JsonlDataSource, ScoringResult,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init(Env::global());

    // Reads JUDGMENT_API_KEY and JUDGMENT_ORG_ID
    let client = Judgeval::builder().build()?;
    let scorers = client.scorers();

    // Example 1: inline examples with a built-in and a prompt scorer
    let examples = vec![
        Example::builder()
            .name("capital")
            .property("input", "What is the capital of France?")
            .property("actual_output", "Paris is the capital of France.")
            .property("expected_output", "Paris")
            .build(),
        Example::builder()
            .name("arithmetic")
            .property("input", "What is 2 + 2?")
            .property("actual_output", "5")
            .property("expected_output", "4")
            .build(),
    ];

    let correctness = scorers.built_in().answer_correctness().threshold(0.7).build()?;
    let concise = scorers
        .prompt_scorer()
        .create()
        .name("concise")
        .prompt("Is the answer to {{input}} a single short sentence? Answer: {{actual_output}}")
        .option("yes", 1.0)
        .option("no", 0.0)
        .build()?;

    let results = client
        .evaluation()
        .create()
        .project_name("quick-start")
        .eval_name("inline")
        .examples(examples)
        .scorer(correctness)
        .scorer(concise)
        .build()?
        .run()
        .await?;
    println!("{}", ScoringResult::summary_table(&results));

    // Example 2: load examples from JSONL if provided
    if let Some(path) = std::env::args().nth(1) {
        let examples = JsonlDataSource::new(path).load().await?;
        let results = client
            .evaluation()
            .create()
            .project_name("quick-start")
            .eval_name("jsonl")
            .examples(examples)
            .scorer(scorers.built_in().answer_relevancy().build()?)
            .build()?
            .run()
            .await?;
        println!("{}", ScoringResult::summary_table(&results));
    }

    Ok(())
}
