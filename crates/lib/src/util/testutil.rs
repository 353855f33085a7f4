//! Test utilities for shipit-lib.
//!
//! A scripted [`Runner`] that records what it was asked to run instead of
//! launching processes, with optional injected failures.

use std::collections::HashMap;

use crate::cmd::{CmdError, Invocation, Runner};

#[derive(Debug, Default)]
pub struct ScriptedRunner {
  pub invocations: Vec<Invocation>,
  pub banners: Vec<String>,
  failures: HashMap<usize, i32>,
}

impl ScriptedRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fail the `index`-th invocation (zero based) with exit status `code`.
  pub fn failing_at(index: usize, code: i32) -> Self {
    let mut runner = Self::default();
    runner.failures.insert(index, code);
    runner
  }

  pub fn rendered(&self) -> Vec<String> {
    self.invocations.iter().map(Invocation::render).collect()
  }
}

impl Runner for ScriptedRunner {
  async fn run(&mut self, invocation: &Invocation) -> Result<(), CmdError> {
    let index = self.invocations.len();
    self.invocations.push(invocation.clone());

    match self.failures.get(&index) {
      Some(&code) => Err(CmdError::Failed {
        cmd: invocation.render(),
        code,
      }),
      None => Ok(()),
    }
  }

  fn banner(&mut self, message: &str) {
    self.banners.push(message.to_string());
  }
}

/// Write an executable shell script to `dir/name` and return its path.
#[cfg(unix)]
pub fn write_script(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  std::fs::write(&path, format!("#!/bin/sh\nset -e\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}
