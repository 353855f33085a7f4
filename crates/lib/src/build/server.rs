//! Server build: cross-compile release binaries and collect them.

use std::path::Path;

use crate::build::{Plan, Step, Target};
use crate::cmd::Invocation;
use crate::config::{ServerConfig, ServerTarget};

/// Steps for every configured target, in declared order.
///
/// Per target: ensure the output directory, run
/// `<toolchain> build --release --target <triple>` from `root`, then copy the
/// binary from the toolchain's release directory into the output directory.
pub fn plan(config: &ServerConfig, root: &Path) -> Plan {
  let mut plan = Plan::new(Target::Server);

  let triples = config
    .targets
    .iter()
    .map(ServerTarget::triple)
    .collect::<Vec<_>>()
    .join(", ");
  plan.push(Step::Banner(format!(
    "Building rust release artifacts for targets: {}",
    triples
  )));

  for target in &config.targets {
    let triple = target.triple();

    plan.push(Step::EnsureDir(target.out_dir.clone()));
    plan.push(Step::Banner(format!("Building release artifact for {}", triple)));
    plan.push(Step::Run(
      Invocation::new(&config.toolchain)
        .args(["build", "--release", "--target"])
        .arg(&triple)
        .current_dir(root),
    ));
    plan.push(Step::Copy {
      from: config.artifact_path(target),
      to: target.out_dir.clone(),
    });
  }

  plan.push(Step::Banner(format!(
    "Release artifacts copied to {}",
    config.bin_dir.display()
  )));

  plan
}
