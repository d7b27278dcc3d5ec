use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jba_numeric::Amount;

mod commands;

#[derive(Parser)]
#[command(name = "jba")]
#[command(about = "Juicebox payout and fee auditor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check split payouts against downstream payments and write a Markdown report
    Payouts {
        /// Env file holding SUBGRAPH_ENDPOINT (see .example.env)
        #[arg(long, default_value = jba_config::DEFAULT_ENV_FILE)]
        env_file: PathBuf,

        /// Report path; an existing file is overwritten
        #[arg(long, default_value = jba_report::DEFAULT_REPORT_PATH)]
        out: PathBuf,

        /// Project whose payout distributions are audited
        #[arg(long, default_value_t = jba_audit::DEFAULT_SOURCE_PROJECT_ID)]
        project: u64,
    },

    /// Recompute protocol fees and log projects charged above expectation
    Fees {
        /// Env file holding SUBGRAPH_ENDPOINT (see .example.env)
        #[arg(long, default_value = jba_config::DEFAULT_ENV_FILE)]
        env_file: PathBuf,

        /// Allowed excess in wei before a fee is flagged
        #[arg(long)]
        tolerance: Option<Amount>,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.cmd {
        Commands::Payouts {
            env_file,
            out,
            project,
        } => commands::payouts::run(&env_file, &out, project).await,
        Commands::Fees {
            env_file,
            tolerance,
        } => commands::fees::run(&env_file, tolerance).await,
    }
}
