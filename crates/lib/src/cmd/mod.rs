//! External command execution.
//!
//! Every side effect of a build goes through a [`Runner`]: toolchain and
//! bundler invocations as well as the directory, copy and removal steps.
//! Commands are launched directly (program plus arguments), never through
//! a shell, so arguments need no escaping.

mod process;
mod types;

use std::path::Path;

pub use process::ProcessRunner;
pub use types::{CmdError, Invocation};

/// Executes invocations one at a time.
pub trait Runner {
  /// Run `invocation` to completion.
  ///
  /// Returns `CmdError::Failed` when the process exits with a non-zero status.
  fn run(&mut self, invocation: &Invocation) -> impl Future<Output = Result<(), CmdError>> + Send;

  /// Emit a progress line between commands.
  fn banner(&mut self, _message: &str) {}
}

/// Create `path` and any missing parents. Succeeds if it already exists.
pub async fn ensure_dir<R: Runner>(runner: &mut R, path: &Path) -> Result<(), CmdError> {
  runner.run(&Invocation::new("mkdir").arg("-p").arg(path)).await
}
