use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// kvote k-nearest-neighbor classifier.
#[derive(Parser)]
#[command(
    name = "kvote",
    version,
    about = "k-nearest-neighbor plurality classifier with held-out self-testing"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Hold out known samples, classify them against the rest, and report accuracy.
    SelfTest(SelfTestArgs),
    /// Classify unlabeled query rows against the labeled samples.
    Classify(ClassifyArgs),
}

/// Options shared by every subcommand that builds a classifier.
#[derive(clap::Args)]
pub struct ClassifierArgs {
    /// Path to TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override labeled sample CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override number of neighbors from config.
    #[arg(short)]
    pub k: Option<usize>,

    /// Override distance metric from config (euclidean, squared-euclidean, manhattan).
    #[arg(short, long)]
    pub metric: Option<String>,
}

/// Arguments for the `self-test` subcommand.
#[derive(clap::Args)]
pub struct SelfTestArgs {
    #[command(flatten)]
    pub classifier: ClassifierArgs,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override number of random held-out trials from config.
    #[arg(short, long)]
    pub trials: Option<usize>,

    /// Hold out this sample id (zero-based record index) instead of a random one.
    #[arg(long)]
    pub sample: Option<u64>,

    /// Path for a JSON report of every trial.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `classify` subcommand.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub classifier: ClassifierArgs,

    /// Path to CSV file of unlabeled feature rows.
    #[arg(short, long)]
    pub queries: PathBuf,

    /// Path for a JSON report of every classification.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_self_test() {
        let cli = Cli::parse_from([
            "kvote", "-vv", "self-test", "-i", "faces.csv", "-k", "7", "--seed", "3",
            "--trials", "10",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::SelfTest(args) = cli.command else {
            panic!("expected self-test");
        };
        assert_eq!(args.classifier.input, Some(PathBuf::from("faces.csv")));
        assert_eq!(args.classifier.k, Some(7));
        assert_eq!(args.seed, Some(3));
        assert_eq!(args.trials, Some(10));
        assert_eq!(args.sample, None);
    }

    #[test]
    fn parse_classify() {
        let cli = Cli::parse_from([
            "kvote", "classify", "--config", "kvote.toml", "--queries", "q.csv", "-m",
            "manhattan",
        ]);
        let Command::Classify(args) = cli.command else {
            panic!("expected classify");
        };
        assert_eq!(args.queries, PathBuf::from("q.csv"));
        assert_eq!(args.classifier.config, Some(PathBuf::from("kvote.toml")));
        assert_eq!(args.classifier.metric.as_deref(), Some("manhattan"));
    }
}
