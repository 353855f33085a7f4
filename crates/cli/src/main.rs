use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use shipit_lib::build::{BuildError, Target};
use shipit_lib::consts::EXIT_FAILURE;

mod cmd;
mod output;

/// shipit - Build release artifacts for the server and its web front-end
#[derive(Parser)]
#[command(name = "shipit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// What to build
  #[arg(value_enum)]
  target: BuildTarget,

  /// Project root containing Cargo.toml and the web/ project
  #[arg(short = 'C', long, env = "SHIPIT_PROJECT_DIR", default_value = ".")]
  project_dir: PathBuf,

  /// Config file (default: shipit.json in the project root, if present)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Print the steps without running anything
  #[arg(short = 'n', long)]
  dry_run: bool,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BuildTarget {
  /// Cross-compiled release binaries
  Server,
  /// Bundled front-end assets
  Web,
}

impl From<BuildTarget> for Target {
  fn from(value: BuildTarget) -> Self {
    match value {
      BuildTarget::Server => Target::Server,
      BuildTarget::Web => Target::Web,
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  // Logs go to stderr; stdout carries the streamed build output.
  let default_filter = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = cmd::BuildArgs {
    target: cli.target.into(),
    project_dir: cli.project_dir,
    config: cli.config,
    dry_run: cli.dry_run,
  };

  match cmd::cmd_build(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => ExitCode::from(report(&err)),
  }
}

/// Print `err` and pick the exit status.
fn report(err: &anyhow::Error) -> u8 {
  match err.downcast_ref::<BuildError>() {
    Some(build_err) => {
      if let Some(cmd) = build_err.failed_command() {
        output::print_error(&format!("Error executing command: `{}`", cmd));
      }
      output::print_error(&build_err.to_string());
      build_err.exit_code()
    }
    None => {
      output::print_error(&format!("{:#}", err));
      EXIT_FAILURE
    }
  }
}
