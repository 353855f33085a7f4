//! Build driver.
//!
//! A [`Target`] resolves to a [`Plan`]: an ordered list of [`Step`]s built
//! from the injected [`BuildConfig`]. Executing a plan runs its steps one
//! after another through a [`Runner`]; the first failure aborts the rest.
//!
//! # Submodules
//!
//! - [`execute`] - Step execution and wildcard resolution
//! - [`server`] - Cross-compiled server binaries
//! - [`web`] - Bundled front-end assets

pub mod execute;
pub mod server;
mod types;
pub mod web;

pub use execute::execute;
pub use types::*;

use crate::cmd::Runner;
use crate::config::BuildConfig;

/// Resolve `target` to its steps.
pub fn plan(target: Target, config: &BuildConfig) -> Plan {
  match target {
    Target::Server => server::plan(&config.server, &config.root),
    Target::Web => web::plan(&config.web),
  }
}

/// Build the target called `name`.
///
/// Fails with [`BuildError::UnknownTarget`] before running anything if the
/// name is not recognized.
pub async fn build<R: Runner>(name: &str, config: &BuildConfig, runner: &mut R) -> Result<(), BuildError> {
  let target: Target = name.parse()?;
  execute(&plan(target, config), runner).await
}
