//! Implementation of the `shipit <target>` command.
//!
//! Loads the project configuration, resolves the target to a plan and either
//! prints it (dry run) or executes it with output streamed to stdout.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use shipit_lib::build::{self, Target};
use shipit_lib::cmd::ProcessRunner;
use shipit_lib::config::BuildConfig;

use crate::output;

pub struct BuildArgs {
  pub target: Target,
  pub project_dir: PathBuf,
  pub config: Option<PathBuf>,
  pub dry_run: bool,
}

/// Execute the build command.
///
/// A failing step surfaces as a [`build::BuildError`] inside the returned
/// error so the caller can derive the exit status from it.
pub fn cmd_build(args: &BuildArgs) -> Result<()> {
  let root = dunce::canonicalize(&args.project_dir)
    .with_context(|| format!("Project directory not found: {}", args.project_dir.display()))?;

  let config = BuildConfig::load(&root, args.config.as_deref()).context("Failed to load config")?;
  let plan = build::plan(args.target, &config);

  if args.dry_run {
    print!("{}", plan);
    output::print_info(&format!("Dry run: {} step(s) for {}", plan.len(), plan.target()));
    return Ok(());
  }

  info!(root = %root.display(), build = %args.target, "starting build");
  let started = Instant::now();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let mut runner = ProcessRunner::stdout();
  rt.block_on(build::execute(&plan, &mut runner))?;

  output::print_success(&format!(
    "Built {} in {}",
    plan.target(),
    output::format_elapsed(started.elapsed())
  ));

  Ok(())
}
