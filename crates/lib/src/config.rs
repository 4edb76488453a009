//! Build configuration.
//!
//! A [`BuildConfig`] is the complete, immutable input of one dispatch. Host facts
//! are detected once by the caller and stored on it, so planning never reads the
//! ambient environment.
//!
//! [`ConfigFile`] is the on-disk (TOML) form. Every field is optional so files,
//! environment and command line flags can be layered with [`ConfigFile::merge`].

use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ljbuild_platform::{Arch, HostInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default `MACOSX_DEPLOYMENT_TARGET` for macOS builds.
pub const DEFAULT_MACOS_DEPLOYMENT_TARGET: &str = "10.12";

/// Operating system the library is built for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetPlatform {
  Windows,
  MacOs,
  LinuxBsd,
  Android,
  Other(String),
}

impl TargetPlatform {
  /// The platform this binary was compiled for
  pub fn current() -> Self {
    Self::from(std::env::consts::OS)
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Windows => "windows",
      Self::MacOs => "macos",
      Self::LinuxBsd => "linuxbsd",
      Self::Android => "android",
      Self::Other(name) => name,
    }
  }
}

impl From<&str> for TargetPlatform {
  fn from(s: &str) -> Self {
    match s.trim().to_ascii_lowercase().as_str() {
      "windows" => Self::Windows,
      "macos" | "osx" | "darwin" => Self::MacOs,
      "linuxbsd" | "linux" | "linux/bsd" | "bsd" | "freebsd" | "netbsd" | "openbsd" => Self::LinuxBsd,
      "android" => Self::Android,
      other => Self::Other(other.to_string()),
    }
  }
}

impl From<String> for TargetPlatform {
  fn from(s: String) -> Self {
    Self::from(s.as_str())
  }
}

impl FromStr for TargetPlatform {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from(s))
  }
}

impl From<TargetPlatform> for String {
  fn from(platform: TargetPlatform) -> Self {
    platform.as_str().to_string()
  }
}

impl fmt::Display for TargetPlatform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Where the two sibling build trees live.
///
/// The portable tree is `<root>/<portable_dir>`; the native-toolchain tree is
/// `<root>/<portable_dir>/<native_dir>`. Neither is created nor validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  pub root: PathBuf,
  pub portable_dir: String,
  pub native_dir: String,
}

impl Layout {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      ..Self::default()
    }
  }

  /// Working directory of every portable-build command
  pub fn portable_root(&self) -> PathBuf {
    self.root.join(&self.portable_dir)
  }

  /// Working directory of the native-toolchain build script
  pub fn native_root(&self) -> PathBuf {
    self.portable_root().join(&self.native_dir)
  }
}

impl Default for Layout {
  fn default() -> Self {
    Self {
      root: PathBuf::from("."),
      portable_dir: "luaJIT".to_string(),
      native_dir: "src".to_string(),
    }
  }
}

/// Input of a single dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub host: HostInfo,
  pub target_platform: TargetPlatform,
  pub target_arch: Arch,
  /// C compiler for the target (`CC`)
  pub compiler: String,
  /// Compiler usable on the host for helper tools built during cross-compilation
  pub host_compiler: String,
  /// Build with the vendor toolchain script instead of the portable makefile
  pub use_native_toolchain: bool,
  pub android_ndk_root: Option<String>,
  /// Job count for the build tool; defaults to the host CPU count
  pub jobs: Option<usize>,
  pub macos_deployment_target: String,
  pub layout: Layout,
}

impl BuildConfig {
  pub fn new(host: HostInfo, target_platform: TargetPlatform, target_arch: Arch) -> Self {
    Self {
      host,
      target_platform,
      target_arch,
      compiler: "cc".to_string(),
      host_compiler: "cc".to_string(),
      use_native_toolchain: false,
      android_ndk_root: None,
      jobs: None,
      macos_deployment_target: DEFAULT_MACOS_DEPLOYMENT_TARGET.to_string(),
      layout: Layout::default(),
    }
  }

  pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
    self.compiler = compiler.into();
    self
  }

  pub fn with_host_compiler(mut self, host_compiler: impl Into<String>) -> Self {
    self.host_compiler = host_compiler.into();
    self
  }

  pub fn with_native_toolchain(mut self, enabled: bool) -> Self {
    self.use_native_toolchain = enabled;
    self
  }

  pub fn with_android_ndk_root(mut self, root: impl Into<String>) -> Self {
    self.android_ndk_root = Some(root.into());
    self
  }

  pub fn with_jobs(mut self, jobs: usize) -> Self {
    self.jobs = Some(jobs);
    self
  }

  pub fn with_layout(mut self, layout: Layout) -> Self {
    self.layout = layout;
    self
  }

  /// Effective parallelism passed to the build tool
  pub fn jobs(&self) -> usize {
    self.jobs.unwrap_or(self.host.cpu_count).max(1)
  }
}

/// Errors that can occur while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },
}

/// Layerable configuration, as read from `ljbuild.toml` or assembled from flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
  pub platform: Option<TargetPlatform>,
  pub arch: Option<Arch>,
  pub cc: Option<String>,
  pub host_cc: Option<String>,
  /// Use the vendor (MSVC) toolchain script
  pub msvc: Option<bool>,
  pub android_ndk_root: Option<String>,
  pub jobs: Option<usize>,
  pub macos_deployment_target: Option<String>,
  pub source_dir: Option<PathBuf>,
  pub portable_dir: Option<String>,
  pub native_dir: Option<String>,
}

impl ConfigFile {
  /// Load a configuration file from disk
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.display().to_string(),
      source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.display().to_string(),
      source,
    })
  }

  /// Layer `overrides` on top of `self`; any value set in `overrides` wins
  pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
    ConfigFile {
      platform: overrides.platform.or(self.platform),
      arch: overrides.arch.or(self.arch),
      cc: overrides.cc.or(self.cc),
      host_cc: overrides.host_cc.or(self.host_cc),
      msvc: overrides.msvc.or(self.msvc),
      android_ndk_root: overrides.android_ndk_root.or(self.android_ndk_root),
      jobs: overrides.jobs.or(self.jobs),
      macos_deployment_target: overrides.macos_deployment_target.or(self.macos_deployment_target),
      source_dir: overrides.source_dir.or(self.source_dir),
      portable_dir: overrides.portable_dir.or(self.portable_dir),
      native_dir: overrides.native_dir.or(self.native_dir),
    }
  }

  /// Resolve into a [`BuildConfig`] for `host`.
  ///
  /// A missing platform or architecture means "build for the host".
  pub fn into_build_config(self, host: HostInfo) -> BuildConfig {
    let platform = self.platform.unwrap_or_else(TargetPlatform::current);
    let arch = self.arch.unwrap_or_else(|| host.arch.clone());

    let defaults = Layout::default();
    let layout = Layout {
      root: self.source_dir.unwrap_or(defaults.root),
      portable_dir: self.portable_dir.unwrap_or(defaults.portable_dir),
      native_dir: self.native_dir.unwrap_or(defaults.native_dir),
    };

    let mut config = BuildConfig::new(host, platform, arch).with_layout(layout);
    if let Some(cc) = self.cc {
      config.compiler = cc;
    }
    if let Some(host_cc) = self.host_cc {
      config.host_compiler = host_cc;
    }
    config.use_native_toolchain = self.msvc.unwrap_or(false);
    config.android_ndk_root = self.android_ndk_root;
    config.jobs = self.jobs;
    if let Some(target) = self.macos_deployment_target {
      config.macos_deployment_target = target;
    }
    config
  }
}
