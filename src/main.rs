use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

use projectini::catalog::TASK_CATALOG;
use projectini::cleanup;
use projectini::config::GitHubConfig;
use projectini::github::GitHubTracker;
use projectini::greeter;
use projectini::logging::init_logging;
use projectini::sync::Synchronizer;

#[derive(Parser, Debug)]
#[command(name = "projectini")]
#[command(version)]
#[command(about = "GitHub issue and project board automation for Mycelia")]
struct Cli {
    /// Suppress all output except errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rebuild the project board from the static task catalog
    Sync,
    /// Delete every closed issue in the repository
    Cleanup,
    /// Close an issue by number, then delete it
    DeleteIssue {
        /// Repository-scoped issue number
        number: u64,
    },
    /// Run the placeholder greeter agent service
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,
        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

async fn run_sync() -> CliResult {
    let config = GitHubConfig::from_env()?;
    let tracker = GitHubTracker::new(config)?;
    let report = Synchronizer::new(&tracker).run(TASK_CATALOG).await?;
    tracing::info!(
        epics = report.epics_created,
        subtasks = report.subtasks_created,
        links = report.links_created,
        "all epics and sub-issues created, linked, and added to project"
    );
    Ok(())
}

async fn run_cleanup() -> CliResult {
    let config = GitHubConfig::from_env()?;
    let tracker = GitHubTracker::new(config)?;
    let deleted = cleanup::run_cleanup(&tracker).await?;
    tracing::info!(deleted, "all closed issues have been deleted");
    Ok(())
}

async fn run_delete_issue(number: u64) -> CliResult {
    let config = GitHubConfig::from_env()?;
    let tracker = GitHubTracker::new(config)?;
    cleanup::close_and_delete(&tracker, number).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Sync => run_sync().await,
        Commands::Cleanup => run_cleanup().await,
        Commands::DeleteIssue { number } => run_delete_issue(number).await,
        Commands::Serve { port, bind } => greeter::serve(&bind, port).await.map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("an error occurred: {e}");
            ExitCode::FAILURE
        }
    }
}
