use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use judgeval_core::{
	logging, DataSource, Env, EvalConfig, Judgeval, JsonlDataSource, JudgevalBuilder, Scorer,
	ScoringResult,
};

#[derive(Debug, Parser)]
#[command(name = "judgeval", about = "Submit evaluations to the Judgment platform")]
struct Cli {
	#[command(flatten)]
	connection: ConnectionArgs,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Clone, Args)]
struct ConnectionArgs {
	/// Judgment API key
	#[arg(long, global = true, env = "JUDGMENT_API_KEY", hide_env_values = true)]
	api_key: Option<String>,

	/// Organization id
	#[arg(long, global = true, env = "JUDGMENT_ORG_ID")]
	org_id: Option<String>,

	/// API base URL
	#[arg(long, global = true, env = "JUDGMENT_API_URL")]
	api_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Run an evaluation and print the results
	Run(RunArgs),
	/// Print the resolved JUDGMENT_* settings
	Env,
	/// Manage prompt scorers saved on the platform
	#[command(subcommand)]
	Scorer(ScorerCommands),
}

#[derive(Debug, Clone, Parser)]
struct RunArgs {
	/// YAML or JSON eval config; other flags are ignored when set
	#[arg(long, conflicts_with = "data")]
	config: Option<PathBuf>,

	/// JSONL file with one example object per line
	#[arg(long, required_unless_present = "config")]
	data: Option<PathBuf>,

	#[arg(long, default_value = "default_project")]
	project: String,

	#[arg(long, default_value = "default_eval")]
	eval_name: String,

	/// Judge model; defaults to JUDGMENT_DEFAULT_GPT_MODEL
	#[arg(long)]
	model: Option<String>,

	/// Threshold applied to built-in scorers
	#[arg(long)]
	threshold: Option<f64>,

	#[arg(long, action = ArgAction::SetTrue)]
	answer_correctness: bool,

	#[arg(long, action = ArgAction::SetTrue)]
	answer_relevancy: bool,

	#[arg(long, action = ArgAction::SetTrue)]
	faithfulness: bool,

	#[arg(long, action = ArgAction::SetTrue)]
	instruction_adherence: bool,

	#[arg(long, action = ArgAction::SetTrue)]
	derailment: bool,

	/// Saved prompt scorer to include (repeatable)
	#[arg(long = "prompt-scorer")]
	prompt_scorers: Vec<String>,

	/// Server-hosted custom scorer to include (repeatable)
	#[arg(long = "custom-scorer")]
	custom_scorers: Vec<String>,

	/// Exit with an error unless every example passes
	#[arg(long = "assert", action = ArgAction::SetTrue)]
	assert_test: bool,

	/// Write results as JSON to a file
	#[arg(long)]
	json_out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum ScorerCommands {
	/// Create or replace a prompt scorer
	Save(SaveArgs),
	/// Check whether a scorer with this name exists
	Exists {
		name: String,
	},
}

#[derive(Debug, Clone, Parser)]
struct SaveArgs {
	#[arg(long)]
	name: String,

	#[arg(long)]
	prompt: String,

	#[arg(long)]
	threshold: Option<f64>,

	/// Answer choice and its score, e.g. --option yes=1 (repeatable)
	#[arg(long = "option", value_parser = parse_option)]
	options: Vec<(String, f64)>,

	#[arg(long)]
	description: Option<String>,

	/// Save as a trace-level scorer
	#[arg(long, action = ArgAction::SetTrue)]
	trace: bool,
}

fn parse_option(raw: &str) -> Result<(String, f64), String> {
	let (choice, score) = raw
		.split_once('=')
		.ok_or_else(|| format!("expected CHOICE=SCORE, got '{raw}'"))?;
	let score = score
		.trim()
		.parse::<f64>()
		.map_err(|e| format!("invalid score in '{raw}': {e}"))?;
	Ok((choice.trim().to_string(), score))
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	let env = Env::global();
	logging::init(env);

	match cli.command {
		Commands::Run(args) => run(&cli.connection, args).await?,
		Commands::Env => print_env(env),
		Commands::Scorer(cmd) => scorer(&cli.connection, cmd).await?,
	}
	Ok(())
}

fn connect(connection: &ConnectionArgs) -> Result<Judgeval> {
	let mut builder = JudgevalBuilder::from_env(Env::global());
	if let Some(api_key) = &connection.api_key {
		builder = builder.api_key(api_key);
	}
	if let Some(org_id) = &connection.org_id {
		builder = builder.organization_id(org_id);
	}
	if let Some(api_url) = &connection.api_url {
		builder = builder.api_url(api_url);
	}
	Ok(builder.build()?)
}

async fn run(connection: &ConnectionArgs, args: RunArgs) -> Result<()> {
	let client = connect(connection)?;

	let evaluation = if let Some(path) = &args.config {
		let config = EvalConfig::from_path(path).await?;
		let base_dir = path.parent().map(PathBuf::from).unwrap_or_default();
		config
			.evaluation(&base_dir, &client.scorers(), &client.evaluation())
			.await?
			.build()?
	} else {
		let data = args.data.clone().context("--data is required without --config")?;
		let examples = JsonlDataSource::new(data).load().await?;
		let scorers = scorers_from_flags(&client, &args).await?;

		let mut builder = client
			.evaluation()
			.create()
			.project_name(&args.project)
			.eval_name(&args.eval_name)
			.examples(examples)
			.scorers(scorers)
			.assert_test(args.assert_test);
		if let Some(model) = &args.model {
			builder = builder.model(model);
		}
		builder.build()?
	};

	tracing::info!(
		project = evaluation.project_name().unwrap_or_default(),
		examples = evaluation.examples().len(),
		scorers = evaluation.scorers().len(),
		"starting evaluation"
	);
	let results = evaluation.run().await?;
	println!("{}", ScoringResult::summary_table(&results));

	if let Some(path) = args.json_out {
		let json = serde_json::to_string_pretty(&results)?;
		tokio::fs::write(path, json).await?;
	}

	Ok(())
}

async fn scorers_from_flags(client: &Judgeval, args: &RunArgs) -> Result<Vec<Scorer>> {
	let factory = client.scorers();
	let built_in = factory.built_in();
	let mut builders = Vec::new();
	if args.answer_correctness {
		builders.push(built_in.answer_correctness());
	}
	if args.answer_relevancy {
		builders.push(built_in.answer_relevancy());
	}
	if args.faithfulness {
		builders.push(built_in.faithfulness());
	}
	if args.instruction_adherence {
		builders.push(built_in.instruction_adherence());
	}
	if args.derailment {
		builders.push(built_in.derailment());
	}

	let mut scorers: Vec<Scorer> = Vec::new();
	for builder in builders {
		let builder = match args.threshold {
			Some(threshold) => builder.threshold(threshold),
			None => builder,
		};
		scorers.push(builder.build()?.into());
	}

	let prompts = factory.prompt_scorer();
	for name in &args.prompt_scorers {
		scorers.push(prompts.get(name).await?.into());
	}

	let custom = factory.custom_scorer();
	for name in &args.custom_scorers {
		scorers.push(custom.get(name)?.into());
	}

	// Default to answer relevancy if no scorers specified
	if scorers.is_empty() {
		scorers.push(built_in.answer_relevancy().build()?.into());
	}
	Ok(scorers)
}

async fn scorer(connection: &ConnectionArgs, cmd: ScorerCommands) -> Result<()> {
	let client = connect(connection)?;
	match cmd {
		ScorerCommands::Save(args) => {
			let factory = if args.trace {
				client.scorers().trace_prompt_scorer()
			} else {
				client.scorers().prompt_scorer()
			};
			let mut builder = factory.create().name(&args.name).prompt(&args.prompt);
			if let Some(threshold) = args.threshold {
				builder = builder.threshold(threshold);
			}
			if !args.options.is_empty() {
				builder = builder.options(args.options.clone());
			}
			if let Some(description) = &args.description {
				builder = builder.description(description);
			}
			let scorer = builder.build()?;
			factory.save(&scorer).await?;
			println!("saved prompt scorer '{}'", scorer.name());
		}
		ScorerCommands::Exists { name } => {
			let exists = client.scorers().prompt_scorer().exists(&name).await?;
			println!("{}", exists);
			if !exists {
				bail!("scorer '{}' not found", name);
			}
		}
	}
	Ok(())
}

fn print_env(env: &Env) {
	let masked = env.api_key.as_deref().map(mask);
	println!("JUDGMENT_API_KEY={}", masked.as_deref().unwrap_or("<unset>"));
	println!("JUDGMENT_ORG_ID={}", env.org_id.as_deref().unwrap_or("<unset>"));
	println!("JUDGMENT_API_URL={}", env.api_url);
	println!("JUDGMENT_DEFAULT_GPT_MODEL={}", env.default_gpt_model);
	println!("JUDGMENT_NO_COLOR={}", env.no_color.as_deref().unwrap_or("<unset>"));
	println!("JUDGMENT_LOG_LEVEL={}", env.log_level);
}

fn mask(secret: &str) -> String {
	const VISIBLE: usize = 4;
	if secret.chars().count() <= VISIBLE {
		return "****".to_string();
	}
	let visible: String = secret.chars().take(VISIBLE).collect();
	format!("{}****", visible)
}
