use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod batch;
mod evaluate;
mod output;

use crate::output::OutputOptions;

#[derive(Debug, Parser)]
#[command(name = "creatorlens")]
#[command(about = "Evaluate YouTube channels for brand partnerships")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate one channel given a UC… ID, @handle, channel URL, or search text.
    Evaluate {
        /// Channel to evaluate.
        channel: String,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Evaluate every channel in the roster file.
    Batch {
        /// Roster file to read instead of the configured path.
        #[arg(long, value_name = "PATH")]
        roster: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Cap on recent uploads fetched per channel.
    #[arg(long, value_name = "N")]
    max_videos: Option<usize>,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,

    /// Write the report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = creatorlens_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Reports go to stdout; logs stay on stderr so piped JSON is clean.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Evaluate { channel, common } => {
            apply_overrides(&mut config, &common)?;
            let opts = output_options(&common);
            evaluate::run_evaluate(&config, &channel, &opts).await
        }
        Commands::Batch { roster, common } => {
            apply_overrides(&mut config, &common)?;
            if let Some(path) = roster {
                config.roster_path = path;
            }
            let opts = output_options(&common);
            batch::run_batch(&config, &opts).await
        }
    }
}

fn apply_overrides(
    config: &mut creatorlens_core::AppConfig,
    common: &CommonArgs,
) -> anyhow::Result<()> {
    if let Some(n) = common.max_videos {
        anyhow::ensure!(n >= 1, "--max-videos must be at least 1");
        config.max_videos = n;
    }
    Ok(())
}

fn output_options(common: &CommonArgs) -> OutputOptions {
    OutputOptions {
        pretty: common.pretty,
        path: common.output.clone(),
    }
}

#[cfg(test)]
mod tests {
    use creatorlens_core::{AppConfig, Environment};

    use super::*;

    #[test]
    fn parses_evaluate_with_channel() {
        let cli = Cli::try_parse_from(["creatorlens", "evaluate", "@mkbhd"])
            .expect("expected valid cli args");
        assert!(matches!(
            cli.command,
            Commands::Evaluate { ref channel, .. } if channel == "@mkbhd"
        ));
    }

    #[test]
    fn parses_evaluate_flags() {
        let cli = Cli::try_parse_from([
            "creatorlens",
            "evaluate",
            "UCBJycsmduvYEL83R_U4JriQ",
            "--max-videos",
            "25",
            "--pretty",
        ])
        .expect("expected valid cli args");
        match cli.command {
            Commands::Evaluate { common, .. } => {
                assert_eq!(common.max_videos, Some(25));
                assert!(common.pretty);
                assert!(common.output.is_none());
            }
            Commands::Batch { .. } => panic!("expected evaluate"),
        }
    }

    #[test]
    fn parses_batch_with_roster_and_output() {
        let cli = Cli::try_parse_from([
            "creatorlens",
            "batch",
            "--roster",
            "alt.yaml",
            "--output",
            "out.json",
        ])
        .expect("expected valid cli args");
        match cli.command {
            Commands::Batch { roster, common } => {
                assert_eq!(roster, Some(PathBuf::from("alt.yaml")));
                assert_eq!(common.output, Some(PathBuf::from("out.json")));
                assert!(!common.pretty);
            }
            Commands::Evaluate { .. } => panic!("expected batch"),
        }
    }

    #[test]
    fn rejects_missing_subcommand() {
        assert!(Cli::try_parse_from(["creatorlens"]).is_err());
    }

    #[test]
    fn rejects_evaluate_without_channel() {
        assert!(Cli::try_parse_from(["creatorlens", "evaluate"]).is_err());
    }

    fn test_config() -> AppConfig {
        AppConfig {
            api_key: "test-key".to_string(),
            env: Environment::Test,
            log_level: "info".to_string(),
            roster_path: PathBuf::from("./config/channels.yaml"),
            max_videos: 50,
            request_timeout_secs: 30,
            user_agent: "creatorlens-test".to_string(),
            max_retries: 3,
            retry_backoff_base_ms: 1000,
            max_concurrent_channels: 1,
        }
    }

    #[test]
    fn overrides_apply_max_videos() {
        let mut config = test_config();
        let common = CommonArgs {
            max_videos: Some(10),
            pretty: false,
            output: None,
        };
        apply_overrides(&mut config, &common).unwrap();
        assert_eq!(config.max_videos, 10);
    }

    #[test]
    fn overrides_reject_zero_max_videos() {
        let mut config = test_config();
        let common = CommonArgs {
            max_videos: Some(0),
            pretty: false,
            output: None,
        };
        let err = apply_overrides(&mut config, &common).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
        assert_eq!(config.max_videos, 50);
    }
}
