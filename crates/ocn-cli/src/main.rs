//! OCN Demo CLI - watch six agents settle a checkout in chat form
//!
//! # Quick Start
//!
//! ```bash
//! # Play the mock run as a chat transcript
//! ocn-demo run
//!
//! # Pay over BNPL, show the full evidence trail, skip the typing delays
//! ocn-demo run --choice bnpl --verbosity forensics --fast
//!
//! # Drive live agent services through the aggregation endpoint
//! ocn-demo run --mode real --gateway http://localhost:8090/run/demo1
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod display;

use ocn_sequencer::DEFAULT_AGGREGATE_URL;
use ocn_types::{AgentMode, PaymentChoice, Verbosity};

/// OCN Demo - multi-agent checkout explained step by step
#[derive(Parser)]
#[command(name = "ocn-demo")]
#[command(author = "OCN Demo Contributors")]
#[command(version)]
#[command(about = "Chat-style demo of the six-agent checkout flow", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one checkout run as a chat transcript
    Run {
        /// Payment instrument (credit, bnpl)
        #[arg(long, default_value = "credit")]
        choice: PaymentChoice,

        /// Detail level (brief, standard, forensics)
        #[arg(long, default_value = "standard")]
        verbosity: Verbosity,

        /// Data source (mock, real)
        #[arg(long, default_value = "mock")]
        mode: AgentMode,

        /// Aggregation endpoint used in real mode
        #[arg(long, default_value = DEFAULT_AGGREGATE_URL)]
        gateway: String,

        /// Compress the reveal delays for demos and CI
        #[arg(long)]
        fast: bool,
    },

    /// Print the demo cart with computed totals
    Cart,

    /// List the agents and their roles
    Agents,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            choice,
            verbosity,
            mode,
            gateway,
            fast,
        } => {
            commands::run::run(choice, verbosity, mode, &gateway, fast).await?;
        }
        Commands::Cart => commands::cart::show(),
        Commands::Agents => commands::agents::list(),
    }

    Ok(())
}

/// Keep the transcript clean: only warnings surface unless RUST_LOG says
/// otherwise.
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["ocn-demo", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                choice,
                verbosity,
                mode,
                gateway,
                fast,
            } => {
                assert_eq!(choice, PaymentChoice::Credit);
                assert_eq!(verbosity, Verbosity::Standard);
                assert_eq!(mode, AgentMode::Mock);
                assert_eq!(gateway, DEFAULT_AGGREGATE_URL);
                assert!(!fast);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_run_flags_parse() {
        let cli = Cli::try_parse_from([
            "ocn-demo",
            "run",
            "--choice",
            "bnpl",
            "--verbosity",
            "forensics",
            "--mode",
            "real",
            "--fast",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                choice,
                verbosity,
                mode,
                fast,
                ..
            } => {
                assert_eq!(choice, PaymentChoice::Bnpl);
                assert_eq!(verbosity, Verbosity::Forensics);
                assert_eq!(mode, AgentMode::Real);
                assert!(fast);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_unknown_choice_rejected() {
        assert!(Cli::try_parse_from(["ocn-demo", "run", "--choice", "cash"]).is_err());
    }
}
