mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cthru_lib::{Registry, Settings};
use tracing_subscriber::EnvFilter;

use crate::commands::common::CommonArgs;
use crate::commands::Context;

#[derive(Parser)]
#[command(name = "cthru")]
#[command(about = "Query Massachusetts CTHRU open data (spending, payroll, settlements, revenue)")]
struct Cli {
    /// Credentials file with `ID:` and `secret:` lines; overrides CTHRU_APP_TOKEN/CTHRU_APP_SECRET
    #[arg(long, global = true, value_name = "PATH")]
    credentials: Option<PathBuf>,

    /// Allow queries without an app token
    #[arg(long, global = true)]
    anonymous: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query state spending (Comptroller payments)
    Spending(Box<commands::spending::SpendingArgs>),
    /// Query state employee payroll
    Payroll(Box<commands::payroll::PayrollArgs>),
    /// Query settlements and judgments
    Settlements(CommonArgs),
    /// Query state revenue
    Revenue(CommonArgs),
    /// List available datasets
    Datasets(commands::datasets::DatasetsArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cthru_lib=info,cthru_api=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => output::report_error(&err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load().with_anonymous_access(cli.anonymous);
    if let Some(path) = cli.credentials {
        settings = settings.with_credentials_path(path);
    }
    let ctx = Context {
        registry: Registry::builtin(),
        settings,
    };

    match &cli.command {
        Commands::Spending(args) => commands::spending::run(args, &ctx).await,
        Commands::Payroll(args) => commands::payroll::run(args, &ctx).await,
        Commands::Settlements(args) => commands::records::run("settlements", args, &ctx).await,
        Commands::Revenue(args) => commands::records::run("revenue", args, &ctx).await,
        Commands::Datasets(args) => commands::datasets::run(args, &ctx).await,
    }
}
