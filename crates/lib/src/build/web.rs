//! Web build: bundle the front-end and publish the bundles to the static dir.

use crate::build::{Plan, Step, Target};
use crate::cmd::Invocation;
use crate::config::WebConfig;

/// Hashed bundles: (subdirectory, bundler output pattern, published name).
const BUNDLES: &[(&str, &str, &str)] = &[("js", "main.*.js", "main.js"), ("css", "main.*.css", "main.css")];

const MANIFEST: &str = "manifest.json";

/// Clean previously published bundles, install dependencies, run the
/// production build and copy the fresh bundles plus the manifest into place.
pub fn plan(config: &WebConfig) -> Plan {
  let mut plan = Plan::new(Target::Web);
  let pm = &config.package_manager;

  plan.push(Step::Banner("Running web build".to_string()));

  plan.push(Step::Banner("Clearing existing bundled files".to_string()));
  for (subdir, _, published) in BUNDLES {
    plan.push(Step::Remove(config.static_dir.join(subdir).join(published)));
  }
  plan.push(Step::Remove(config.static_dir.join(MANIFEST)));

  plan.push(Step::Banner("Updating dependencies".to_string()));
  plan.push(Step::Run(
    Invocation::new(pm).arg("install").current_dir(&config.project_dir),
  ));

  plan.push(Step::Banner("Building web release".to_string()));
  plan.push(Step::Run(
    Invocation::new(pm).arg("build").current_dir(&config.project_dir),
  ));

  plan.push(Step::Banner(format!(
    "Copying bundled files to {}",
    config.static_dir.display()
  )));
  for (subdir, _, _) in BUNDLES {
    plan.push(Step::EnsureDir(config.static_dir.join(subdir)));
  }

  let build_out = config.build_out();
  for (subdir, pattern, published) in BUNDLES {
    plan.push(Step::CopyMatching {
      dir: build_out.join(subdir),
      pattern: pattern.to_string(),
      to: config.static_dir.join(subdir).join(published),
    });
  }
  plan.push(Step::Copy {
    from: config.public_dir().join(MANIFEST),
    to: config.static_dir.join(MANIFEST),
  });

  plan
}
