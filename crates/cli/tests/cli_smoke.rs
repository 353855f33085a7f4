//! CLI smoke tests for shipit.
//!
//! These run the real binary against throwaway projects whose toolchain and
//! package manager are small shell scripts.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the shipit binary.
fn shipit_cmd() -> Command {
  cargo_bin_cmd!("shipit")
}

/// Write an executable shell script and return its path.
#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  std::fs::write(&path, format!("#!/bin/sh\nset -e\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Point the server build at `toolchain` with artifact name `demo`.
fn write_server_config(project: &Path, toolchain: &str) {
  std::fs::write(
    project.join("shipit.json"),
    format!(r#"{{ "server": {{ "artifact": "demo", "toolchain": "{}" }} }}"#, toolchain),
  )
  .unwrap();
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  shipit_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"))
    .stdout(predicate::str::contains("server"))
    .stdout(predicate::str::contains("web"));
}

#[test]
fn version_flag_works() {
  shipit_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("shipit"));
}

// =============================================================================
// Argument parsing
// =============================================================================

#[test]
fn unknown_target_is_a_usage_error() {
  let temp = TempDir::new().unwrap();

  shipit_cmd()
    .arg("-C")
    .arg(temp.path())
    .arg("docs")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("invalid value"));

  assert!(!temp.path().join("bin").exists());
}

#[test]
fn missing_target_is_a_usage_error() {
  shipit_cmd().assert().code(2);
}

// =============================================================================
// Dry run
// =============================================================================

#[test]
fn dry_run_server_prints_plan() {
  let temp = TempDir::new().unwrap();

  shipit_cmd()
    .arg("-C")
    .arg(temp.path())
    .arg("--dry-run")
    .arg("server")
    .assert()
    .success()
    .stdout(predicate::str::contains("cross build --release --target x86_64-unknown-linux-musl"))
    .stdout(predicate::str::contains("Dry run:"));

  assert!(!temp.path().join("bin").exists());
}

#[test]
fn dry_run_web_prints_plan() {
  let temp = TempDir::new().unwrap();

  shipit_cmd()
    .arg("-C")
    .arg(temp.path())
    .arg("-n")
    .arg("web")
    .assert()
    .success()
    .stdout(predicate::str::contains("yarn install"))
    .stdout(predicate::str::contains("yarn build"))
    .stdout(predicate::str::contains("main.*.js"));

  assert!(!temp.path().join("static").exists());
}

#[test]
fn project_dir_from_env_names_the_artifact() {
  let temp = TempDir::new().unwrap();
  let project = temp.path().join("org_demo");
  std::fs::create_dir(&project).unwrap();

  shipit_cmd()
    .env("SHIPIT_PROJECT_DIR", &project)
    .arg("--dry-run")
    .arg("server")
    .assert()
    .success()
    .stdout(predicate::str::contains("release/org_demo"));
}

// =============================================================================
// Configuration errors
// =============================================================================

#[test]
fn invalid_config_fails() {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("shipit.json"), "{ not json").unwrap();

  shipit_cmd()
    .arg("-C")
    .arg(temp.path())
    .arg("server")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn nonexistent_project_dir_fails() {
  shipit_cmd()
    .arg("-C")
    .arg("/nonexistent/shipit/project")
    .arg("server")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Project directory not found"));
}

// =============================================================================
// Builds
// =============================================================================

#[test]
#[cfg(unix)]
fn server_build_ships_artifact() {
  let temp = TempDir::new().unwrap();
  let toolchain = write_script(
    temp.path(),
    "fake-cross",
    r#"mkdir -p "target/$4/release"
printf 'server binary\n' > "target/$4/release/demo"
echo "Compiling demo v0.1.0""#,
  );
  write_server_config(temp.path(), &toolchain.display().to_string());

  shipit_cmd()
    .arg("-C")
    .arg(temp.path())
    .arg("server")
    .assert()
    .success()
    .stdout(predicate::str::contains("build --release --target x86_64-unknown-linux-musl"))
    .stdout(predicate::str::contains("> Compiling demo v0.1.0"))
    .stdout(predicate::str::contains("Built server in"));

  assert_eq!(
    std::fs::read_to_string(temp.path().join("bin/64/demo")).unwrap(),
    "server binary\n"
  );
}

#[test]
#[cfg(unix)]
fn failing_command_exit_status_is_propagated() {
  let temp = TempDir::new().unwrap();
  let toolchain = write_script(temp.path(), "fake-cross", "echo \"error[E0425]: cannot find value\"\nexit 2");
  write_server_config(temp.path(), &toolchain.display().to_string());

  shipit_cmd()
    .arg("-C")
    .arg(temp.path())
    .arg("server")
    .assert()
    .code(2)
    .stdout(predicate::str::contains("> error[E0425]: cannot find value"))
    .stderr(predicate::str::contains("Error executing command: `"));

  assert!(!temp.path().join("bin/64/demo").exists());
}

#[test]
#[cfg(unix)]
fn missing_toolchain_is_a_launch_failure() {
  let temp = TempDir::new().unwrap();
  write_server_config(temp.path(), "shipit-missing-toolchain");

  shipit_cmd()
    .arg("-C")
    .arg(temp.path())
    .arg("server")
    .assert()
    .code(127)
    .stderr(predicate::str::contains("failed to launch"));
}

#[test]
#[cfg(unix)]
fn web_build_without_bundle_fails() {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir(temp.path().join("web")).unwrap();
  let pm = write_script(temp.path(), "fake-yarn", "echo \"yarn $1\"");
  std::fs::write(
    temp.path().join("shipit.json"),
    format!(r#"{{ "web": {{ "package_manager": "{}" }} }}"#, pm.display()),
  )
  .unwrap();

  shipit_cmd()
    .arg("-C")
    .arg(temp.path())
    .arg("web")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("> yarn install"))
    .stdout(predicate::str::contains("> yarn build"))
    .stderr(predicate::str::contains("main.*.js"));
}
