//! Types for build dispatch.

use std::fmt;

use ljbuild_platform::Arch;
use serde::Serialize;
use thiserror::Error;

use crate::config::TargetPlatform;
use crate::execute::Step;

/// Build strategy chosen for a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
  /// Vendor toolchain script in the native-toolchain directory.
  NativeToolchain,
  /// Windows target built from a POSIX host.
  WindowsCross,
  #[serde(rename = "macos")]
  MacOs,
  LinuxBsd,
  Android,
}

impl Strategy {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NativeToolchain => "native-toolchain",
      Self::WindowsCross => "windows-cross",
      Self::MacOs => "macos",
      Self::LinuxBsd => "linux-bsd",
      Self::Android => "android",
    }
  }
}

impl fmt::Display for Strategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Ordered steps of one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
  pub strategy: Strategy,
  pub steps: Vec<Step>,
}

impl BuildPlan {
  pub fn commands(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.command.as_str()).collect()
  }
}

/// Configurations the dispatcher refuses.
///
/// All of these are raised while planning, before any step is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
  /// Host and target architectures differ in a way no toolchain setup covers.
  #[error("unsupported cross compile for {platform}: host {host}, target {target}")]
  UnsupportedCrossCompile {
    platform: TargetPlatform,
    host: Arch,
    target: Arch,
  },

  #[error("unsupported platform '{0}'")]
  UnsupportedPlatform(String),

  #[error("unsupported android architecture '{0}', only arm64 is supported")]
  UnsupportedAndroidArch(Arch),

  #[error("android builds need an NDK root (set ANDROID_NDK_ROOT)")]
  MissingAndroidNdkRoot,
}
