//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for tally
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author, version, about = "Self-consistency math solver - sample, vote, verify")]
#[command(long_about = r#"
Tally solves math word problems by sampling an LLM several times per
problem, normalizing each sampled answer, and keeping the answer that
the most samples agree on.

Given a question on the command line it solves just that question.
Given a dataset (--data) it solves every row, scores against gold
answers when the dataset has them, and writes a prediction CSV.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./tally.toml        Project-level config
3. ~/.config/tally/config.toml   Global config

Example:
  tally "A train travels 60 km in 1.5 hours. What is its speed?"
  tally --data data/test.csv --train data/train.csv -n 9
  tally --data data/test.csv --strategy pal --limit 25
"#)]
pub struct Cli {
    /// A single question to solve (omit to run a dataset batch)
    pub question: Option<String>,

    /// Dataset of problems to solve (CSV with a question column)
    #[arg(short, long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Training split used for few-shot retrieval
    #[arg(short, long, value_name = "PATH")]
    pub train: Option<PathBuf>,

    /// Samples drawn per problem
    #[arg(short = 'n', long, value_name = "N")]
    pub samples: Option<usize>,

    /// Sampling temperature
    #[arg(long, value_name = "T")]
    pub temperature: Option<f64>,

    /// Prompting strategy (cot or pal)
    #[arg(short, long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    /// Solve only the first N dataset rows
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_question_parse() {
        let cli = Cli::try_parse_from(["tally", "What is 2+2?"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("What is 2+2?"));
        assert!(cli.data.is_none());
    }

    #[test]
    fn test_batch_flags() {
        let cli = Cli::try_parse_from([
            "tally", "--data", "test.csv", "--train", "train.csv", "-n", "9", "--limit", "10",
        ])
        .unwrap();
        assert!(cli.question.is_none());
        assert_eq!(cli.samples, Some(9));
        assert_eq!(cli.limit, Some(10));
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["tally", "-vv", "q"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
