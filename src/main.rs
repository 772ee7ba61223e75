use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use engagement_analysis::api::{self, AppState};
use engagement_analysis::config::{AnalysisConfig, ConfigLoader};
use engagement_analysis::context::AnalysisContext;
use engagement_analysis::error::{AnalysisError, AnalysisResult};
use engagement_analysis::job::run_job;

/// Report departments where most employees are highly satisfied and highly engaged
#[derive(Parser)]
#[command(name = "engagement-analysis", version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Name reported by the analysis context in logs
    #[arg(long, default_value = "engagement-analysis", global = true)]
    app_name: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an employee CSV and write the qualifying departments
    Run {
        /// Employee data CSV with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Destination CSV; replaced if it exists
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Serve the analysis over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 2)
        .init();
}

fn load_config(path: Option<&Path>) -> AnalysisResult<AnalysisConfig> {
    match path {
        Some(path) => Ok(ConfigLoader::load(path)?.into_config()),
        None => {
            debug!("No configuration file given, using defaults");
            Ok(AnalysisConfig::default())
        }
    }
}

fn execute(cli: Cli) -> AnalysisResult<()> {
    let config = load_config(cli.config.as_deref())?;
    let context = AnalysisContext::initialize(cli.app_name, config)?;

    match cli.command {
        Commands::Run { input, output } => {
            let summary = run_job(&context, &input, &output)?;
            info!(
                rows_read = summary.rows_read,
                departments_written = summary.departments_written,
                output = %output.display(),
                "Report written"
            );
            Ok(())
        }
        Commands::Serve { addr } => {
            let runtime = tokio::runtime::Runtime::new().map_err(|e| AnalysisError::Server {
                message: format!("failed to start runtime: {}", e),
            })?;
            runtime.block_on(api::serve(addr, AppState::new(context)))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Analysis failed");
            ExitCode::FAILURE
        }
    }
}
