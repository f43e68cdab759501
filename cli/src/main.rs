//! CLI entrypoint for tally
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tally_application::{
    ExampleRetriever, NoExamples, NoProgress, NoTraceSink, ProgressNotifier, RunBatchUseCase,
    SolveProblemUseCase, TraceSink,
};
use tally_domain::Problem;
use tally_infrastructure::{
    ConfigLoader, FileConfig, JsonlTraceSink, LexicalRetriever, OpenAiChatGateway, load_problems,
    load_training, write_predictions,
};
use tally_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration, then apply CLI overrides.
    // Any invalid setting is fatal here, before a single request goes out.
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    apply_overrides(&mut config, &cli);

    let params = config
        .execution_params()
        .context("invalid configuration")?;

    info!(
        "Starting tally: {} samples per problem, strategy {}",
        params.samples, params.strategy
    );

    // === Dependency Injection ===
    let api_key = std::env::var(&config.provider.api_key_env).ok();
    let gateway = Arc::new(OpenAiChatGateway::new(
        &config.provider.base_url,
        &config.provider.model,
        api_key,
        Duration::from_secs(config.provider.timeout_secs),
        config.provider.max_tokens,
    )?);

    // Few-shot retrieval backs both modes when a training split is given
    let retriever: Box<dyn ExampleRetriever> = match &cli.train {
        Some(path) => {
            let training = load_training(path)
                .with_context(|| format!("failed to load training data from {}", path.display()))?;
            Box::new(LexicalRetriever::new(training))
        }
        None => Box::new(NoExamples),
    };

    // Single question mode
    if let Some(question) = &cli.question {
        let problem = Problem::try_new(0, question.clone())?;
        let few_shots = retriever.retrieve(question, params.few_shot_k);
        let solver = SolveProblemUseCase::new(gateway, params);
        let prediction = solver
            .execute(&problem, &few_shots, &NoProgress, &NoTraceSink)
            .await;

        print!("{}", ConsoleFormatter::format_single(question, &prediction));
        return Ok(());
    }

    // Batch mode - a dataset is required
    let data_path = match &cli.data {
        Some(path) => path.clone(),
        None => bail!("Provide a question or a dataset with --data."),
    };

    let mut problems = load_problems(&data_path)
        .with_context(|| format!("failed to load problems from {}", data_path.display()))?;
    if let Some(limit) = cli.limit {
        problems.truncate(limit);
    }

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let trace: Box<dyn TraceSink> = match JsonlTraceSink::new(&config.paths.traces) {
        Some(sink) => Box::new(sink),
        None => Box::new(NoTraceSink),
    };

    let batch = RunBatchUseCase::new(gateway, params);
    let report = batch
        .execute(&problems, retriever.as_ref(), progress.as_ref(), trace.as_ref())
        .await;

    write_predictions(&config.paths.predictions, &problems, &report.predictions)
        .context("failed to write predictions")?;

    if !cli.quiet {
        println!("{}", ConsoleFormatter::format_summary(&report));
        println!("Predictions written to {}", config.paths.predictions);
    }

    Ok(())
}

/// Fold CLI flags into the loaded file configuration
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(samples) = cli.samples {
        config.sampling.samples = samples;
    }
    if let Some(temperature) = cli.temperature {
        config.sampling.temperature = temperature;
    }
    if let Some(strategy) = &cli.strategy {
        config.sampling.strategy = strategy.clone();
    }
}
