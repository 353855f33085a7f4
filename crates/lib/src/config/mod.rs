//! Build configuration.
//!
//! All paths and names the build sequences need are collected here once at
//! startup and then passed to the driver by reference. Defaults follow the
//! usual project layout:
//!
//! ```text
//! <root>/
//!   shipit.json            optional overrides
//!   target/<triple>/release/<artifact>
//!   bin/64/                server artifacts are copied here
//!   web/                   front-end project (package.json)
//!   static/                bundled assets are copied here
//! ```
//!
//! `shipit.json` may override any subset of fields. Relative paths in it are
//! resolved against the project root.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::CONFIG_FILE;

/// Errors loading `shipit.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid config {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// Complete, resolved configuration for both build targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  /// Project root; toolchain invocations run from here.
  pub root: PathBuf,
  pub server: ServerConfig,
  pub web: WebConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  /// Binary name produced by the toolchain.
  pub artifact: String,
  /// Cross-compilation program, invoked as `<toolchain> build --release --target <triple>`.
  pub toolchain: String,
  /// Parent of the per-target output directories, reported when the build finishes.
  pub bin_dir: PathBuf,
  /// Toolchain output root (`<root>/target`).
  pub target_dir: PathBuf,
  pub targets: Vec<ServerTarget>,
}

/// One cross-compilation target and where its binary should land.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerTarget {
  pub arch: String,
  pub env: String,
  pub out_dir: PathBuf,
}

impl ServerTarget {
  /// Linux target triple, e.g. `x86_64-unknown-linux-musl`.
  pub fn triple(&self) -> String {
    format!("{}-unknown-linux-{}", self.arch, self.env)
  }
}

impl ServerConfig {
  /// Where the toolchain leaves the release binary for `target`.
  pub fn artifact_path(&self, target: &ServerTarget) -> PathBuf {
    self
      .target_dir
      .join(target.triple())
      .join("release")
      .join(&self.artifact)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
  /// Package manager used for `install` and `build` (e.g. `yarn`).
  pub package_manager: String,
  /// Front-end project directory; package manager invocations run from here.
  pub project_dir: PathBuf,
  /// Destination for the bundled assets.
  pub static_dir: PathBuf,
}

impl WebConfig {
  /// Directory the bundler writes hashed bundles to.
  pub fn build_out(&self) -> PathBuf {
    self.project_dir.join("build").join("static")
  }

  /// Un-bundled public assets (manifest) shipped with the project.
  pub fn public_dir(&self) -> PathBuf {
    self.project_dir.join("public")
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
  server: ServerSection,
  web: WebSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServerSection {
  artifact: Option<String>,
  toolchain: String,
  bin_dir: PathBuf,
  targets: Vec<ServerTarget>,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self {
      artifact: None,
      toolchain: "cross".to_string(),
      bin_dir: PathBuf::from("bin"),
      targets: vec![ServerTarget {
        arch: "x86_64".to_string(),
        env: "musl".to_string(),
        out_dir: Path::new("bin").join("64"),
      }],
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WebSection {
  package_manager: String,
  project_dir: PathBuf,
  static_dir: PathBuf,
}

impl Default for WebSection {
  fn default() -> Self {
    Self {
      package_manager: "yarn".to_string(),
      project_dir: PathBuf::from("web"),
      static_dir: PathBuf::from("static"),
    }
  }
}

impl BuildConfig {
  /// Configuration with every default applied.
  pub fn defaults(root: &Path) -> Self {
    Self::resolve(root, ConfigFile::default())
  }

  /// Load configuration for the project at `root`.
  ///
  /// Reads `explicit` if given, otherwise `<root>/shipit.json` when it exists,
  /// otherwise falls back to [`BuildConfig::defaults`].
  pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
    let path = match explicit {
      Some(path) => path.to_path_buf(),
      None => {
        let candidate = root.join(CONFIG_FILE);
        if !candidate.is_file() {
          debug!(root = %root.display(), "no config file, using defaults");
          return Ok(Self::defaults(root));
        }
        candidate
      }
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
      path: path.clone(),
      source,
    })?;
    let file: ConfigFile = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
      path: path.clone(),
      source,
    })?;

    debug!(path = %path.display(), "loaded config");
    Ok(Self::resolve(root, file))
  }

  fn resolve(root: &Path, file: ConfigFile) -> Self {
    let ConfigFile { server, web } = file;

    // Cargo names the binary after the package, which is usually the directory name.
    let artifact = server.artifact.unwrap_or_else(|| {
      root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
    });

    let targets = server
      .targets
      .into_iter()
      .map(|t| ServerTarget {
        out_dir: root.join(t.out_dir),
        ..t
      })
      .collect();

    Self {
      root: root.to_path_buf(),
      server: ServerConfig {
        artifact,
        toolchain: server.toolchain,
        bin_dir: root.join(server.bin_dir),
        target_dir: root.join("target"),
        targets,
      },
      web: WebConfig {
        package_manager: web.package_manager,
        project_dir: root.join(web.project_dir),
        static_dir: root.join(web.static_dir),
      },
    }
  }
}
