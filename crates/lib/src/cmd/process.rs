//! Runner backed by real child processes.

use std::io::{self, Write};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use super::{CmdError, Invocation, Runner};

/// Launches each invocation as a child process and streams its stdout.
///
/// Before launch the command is echoed as `+ <command>`; every stdout line is
/// then forwarded as `> <line>` as soon as it is read. The exit status is only
/// inspected once stdout reaches end-of-stream. Stderr is inherited.
pub struct ProcessRunner<W> {
  out: W,
}

impl ProcessRunner<io::Stdout> {
  /// Runner that writes to the process's own stdout.
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> ProcessRunner<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  fn emit(&mut self, line: &str) -> io::Result<()> {
    writeln!(self.out, "{}", line)?;
    self.out.flush()
  }
}

impl<W: Write + Send> Runner for ProcessRunner<W> {
  async fn run(&mut self, invocation: &Invocation) -> Result<(), CmdError> {
    let cmd = invocation.render();
    let io_error = |source: io::Error| CmdError::Io {
      cmd: cmd.clone(),
      source,
    };

    self.emit(&format!("+ {}", cmd)).map_err(io_error)?;

    let mut command = Command::new(invocation.program());
    command
      .args(invocation.arguments())
      .stdout(Stdio::piped())
      .stderr(Stdio::inherit());
    if let Some(dir) = invocation.cwd() {
      command.current_dir(dir);
    }

    debug!(cmd = %cmd, cwd = ?invocation.cwd(), "spawning process");

    let mut child = command.spawn().map_err(|source| CmdError::Launch {
      cmd: cmd.clone(),
      source,
    })?;

    if let Some(stdout) = child.stdout.take() {
      let mut reader = BufReader::new(stdout);
      let mut line = Vec::new();
      loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await.map_err(io_error)? == 0 {
          break;
        }
        let text = String::from_utf8_lossy(&line);
        self
          .emit(&format!("> {}", text.trim_end_matches(['\n', '\r'])))
          .map_err(io_error)?;
      }
    }

    let status = child.wait().await.map_err(io_error)?;
    debug!(cmd = %cmd, status = %status, "process exited");

    match status.code() {
      Some(0) => Ok(()),
      Some(code) => Err(CmdError::Failed { cmd, code }),
      None => Err(CmdError::Terminated { cmd }),
    }
  }

  fn banner(&mut self, message: &str) {
    // Progress lines are best effort; a broken sink surfaces on the next command.
    let _ = self.emit(&format!("** {} **", message));
  }
}
