//! Targets, steps, plans and the build error type.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::cmd::{CmdError, Invocation};
use crate::consts::{EXIT_FAILURE, EXIT_LAUNCH_FAILED, EXIT_TERMINATED, EXIT_USAGE};

/// The closed set of things that can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
  Server,
  Web,
}

impl Target {
  pub const ALL: [Target; 2] = [Target::Server, Target::Web];

  pub fn as_str(&self) -> &'static str {
    match self {
      Target::Server => "server",
      Target::Web => "web",
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Target {
  type Err = BuildError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Target::ALL
      .into_iter()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| BuildError::UnknownTarget(s.to_string()))
  }
}

/// A single unit of work in a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
  /// Progress line; runs nothing.
  Banner(String),
  /// `mkdir -p <path>`.
  EnsureDir(PathBuf),
  /// `rm -f <path>`; a missing file is not an error.
  Remove(PathBuf),
  /// An arbitrary toolchain or package manager invocation.
  Run(Invocation),
  /// `cp <from> <to>`.
  Copy { from: PathBuf, to: PathBuf },
  /// Copy the single file in `dir` whose name matches `pattern` to `to`.
  ///
  /// The pattern is resolved when the step runs, after earlier steps have
  /// produced the file.
  CopyMatching { dir: PathBuf, pattern: String, to: PathBuf },
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Step::Banner(message) => write!(f, "** {} **", message),
      Step::EnsureDir(path) => write!(f, "mkdir -p {}", path.display()),
      Step::Remove(path) => write!(f, "rm -f {}", path.display()),
      Step::Run(invocation) => match invocation.cwd() {
        Some(dir) => write!(f, "{} (in {})", invocation, dir.display()),
        None => write!(f, "{}", invocation),
      },
      Step::Copy { from, to } => write!(f, "cp {} {}", from.display(), to.display()),
      Step::CopyMatching { dir, pattern, to } => {
        write!(f, "cp {} {}", dir.join(pattern).display(), to.display())
      }
    }
  }
}

/// The ordered steps a target resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
  target: Target,
  steps: Vec<Step>,
}

impl Plan {
  pub fn new(target: Target) -> Self {
    Self {
      target,
      steps: Vec::new(),
    }
  }

  pub fn push(&mut self, step: Step) {
    self.steps.push(step);
  }

  pub fn target(&self) -> Target {
    self.target
  }

  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

impl fmt::Display for Plan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for step in &self.steps {
      writeln!(f, "{}", step)?;
    }
    Ok(())
  }
}

/// Errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The requested target is not one of [`Target::ALL`].
  #[error("unknown build target `{0}` (expected one of: server, web)")]
  UnknownTarget(String),

  /// A step's command failed or could not be launched.
  #[error(transparent)]
  Cmd(#[from] CmdError),

  /// A wildcard copy found nothing to copy.
  #[error("no file matching `{pattern}` in {}", dir.display())]
  NoMatch { dir: PathBuf, pattern: String },

  /// A wildcard copy found more than one candidate.
  #[error("{} files match `{pattern}` in {}, expected exactly one", matches.len(), dir.display())]
  AmbiguousMatch {
    dir: PathBuf,
    pattern: String,
    matches: Vec<PathBuf>,
  },

  /// Listing a directory for a wildcard copy failed.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl BuildError {
  /// Process exit status to report for this error.
  ///
  /// A failed command yields that command's own status.
  pub fn exit_code(&self) -> u8 {
    match self {
      BuildError::Cmd(CmdError::Failed { code, .. }) => u8::try_from(*code)
        .ok()
        .filter(|code| *code != 0)
        .unwrap_or(EXIT_FAILURE),
      BuildError::Cmd(CmdError::Launch { .. }) => EXIT_LAUNCH_FAILED,
      BuildError::Cmd(CmdError::Terminated { .. }) => EXIT_TERMINATED,
      BuildError::UnknownTarget(_) => EXIT_USAGE,
      BuildError::Cmd(CmdError::Io { .. })
      | BuildError::NoMatch { .. }
      | BuildError::AmbiguousMatch { .. }
      | BuildError::Io { .. } => EXIT_FAILURE,
    }
  }

  /// The command that failed, if the error came from one.
  pub fn failed_command(&self) -> Option<&str> {
    match self {
      BuildError::Cmd(err) => Some(err.cmd()),
      _ => None,
    }
  }
}
