//! Plan execution.
//!
//! Steps run strictly in order through a [`Runner`]. The first error returns
//! immediately, so nothing after a failed step is ever started.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::build::{BuildError, Plan, Step};
use crate::cmd::{Invocation, Runner, ensure_dir};
use crate::util::pattern::find_matching;

/// Run every step of `plan`, stopping at the first failure.
pub async fn execute<R: Runner>(plan: &Plan, runner: &mut R) -> Result<(), BuildError> {
  info!(build = %plan.target(), steps = plan.len(), "executing plan");

  for (index, step) in plan.steps().iter().enumerate() {
    debug!(index, step = %step, "running step");
    run_step(step, runner).await?;
  }

  info!(build = %plan.target(), "plan complete");
  Ok(())
}

async fn run_step<R: Runner>(step: &Step, runner: &mut R) -> Result<(), BuildError> {
  match step {
    Step::Banner(message) => runner.banner(message),
    Step::EnsureDir(path) => ensure_dir(runner, path).await?,
    Step::Remove(path) => runner.run(&Invocation::new("rm").arg("-f").arg(path)).await?,
    Step::Run(invocation) => runner.run(invocation).await?,
    Step::Copy { from, to } => runner.run(&copy(from, to)).await?,
    Step::CopyMatching { dir, pattern, to } => {
      let from = resolve_single(dir, pattern)?;
      runner.run(&copy(&from, to)).await?
    }
  }
  Ok(())
}

fn copy(from: &Path, to: &Path) -> Invocation {
  Invocation::new("cp").arg(from).arg(to)
}

/// The one file in `dir` matching `pattern`.
fn resolve_single(dir: &Path, pattern: &str) -> Result<PathBuf, BuildError> {
  let mut matches = match find_matching(dir, pattern) {
    Ok(matches) => matches,
    // The bundler never created the output directory.
    Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
    Err(source) => {
      return Err(BuildError::Io {
        path: dir.to_path_buf(),
        source,
      });
    }
  };
  debug!(dir = %dir.display(), pattern, matches = ?matches, "resolved wildcard");

  match matches.len() {
    0 => Err(BuildError::NoMatch {
      dir: dir.to_path_buf(),
      pattern: pattern.to_string(),
    }),
    1 => Ok(matches.remove(0)),
    _ => Err(BuildError::AmbiguousMatch {
      dir: dir.to_path_buf(),
      pattern: pattern.to_string(),
      matches,
    }),
  }
}
