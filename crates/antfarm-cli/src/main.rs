use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use antfarm_cli::commands::{check, routes, solve};
use antfarm_cli::GlobalOptions;

#[derive(Parser, Debug)]
#[command(
    name = "antfarm",
    author,
    version,
    about = "Move a colony of ants from start to end through a farm of rooms"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a farm and print the move log.
    Solve {
        /// Farm description file, or `-` for stdin.
        file: PathBuf,
    },
    /// Validate a farm and print its size.
    Check {
        /// Farm description file, or `-` for stdin.
        file: PathBuf,
    },
    /// Show candidate and selected routes without moving ants.
    Routes {
        /// Farm description file, or `-` for stdin.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Solve { file } => solve::handle_solve(&cli.global, file),
        Command::Check { file } => check::handle_check(&cli.global, file),
        Command::Routes { file } => routes::handle_routes(&cli.global, file),
    }
}

/// Log to stderr so stdout carries only the report.
fn init_tracing(log_level: Option<&str>) {
    let env_filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
