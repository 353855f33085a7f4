//! Invocation and error types for command execution.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A command to launch: program, arguments and an optional working directory.
///
/// Built once with the consuming builder methods and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  program: OsString,
  args: Vec<OsString>,
  cwd: Option<PathBuf>,
}

impl Invocation {
  pub fn new(program: impl AsRef<OsStr>) -> Self {
    Self {
      program: program.as_ref().to_os_string(),
      args: Vec::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
    self.args.push(arg.as_ref().to_os_string());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
    self
  }

  /// Run the command from `dir` instead of the caller's working directory.
  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn program(&self) -> &OsStr {
    &self.program
  }

  pub fn arguments(&self) -> &[OsString] {
    &self.args
  }

  pub fn cwd(&self) -> Option<&Path> {
    self.cwd.as_deref()
  }

  /// Program and arguments joined with single spaces.
  ///
  /// Display only: nothing is quoted, and the string is never handed to a shell.
  pub fn render(&self) -> String {
    std::iter::once(&self.program)
      .chain(&self.args)
      .map(|s| s.to_string_lossy())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render())
  }
}

/// Errors raised while running a command.
#[derive(Debug, Error)]
pub enum CmdError {
  /// The process ran and exited with a non-zero status.
  #[error("command `{cmd}` exited with status: {code}")]
  Failed { cmd: String, code: i32 },

  /// The process was killed by a signal and has no exit status.
  #[error("command `{cmd}` was terminated by a signal")]
  Terminated { cmd: String },

  /// The process could not be started at all.
  #[error("failed to launch `{cmd}`: {source}")]
  Launch {
    cmd: String,
    #[source]
    source: io::Error,
  },

  /// Reading the process output or writing it to the sink failed.
  #[error("io error while running `{cmd}`: {source}")]
  Io {
    cmd: String,
    #[source]
    source: io::Error,
  },
}

impl CmdError {
  /// The rendered command that failed.
  pub fn cmd(&self) -> &str {
    match self {
      CmdError::Failed { cmd, .. }
      | CmdError::Terminated { cmd }
      | CmdError::Launch { cmd, .. }
      | CmdError::Io { cmd, .. } => cmd,
    }
  }
}
