//! Build configuration flags shared by `build` and `plan`.
//!
//! Precedence, lowest first: defaults, the config file, then flags and their
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use ljbuild_lib::{Arch, BuildConfig, ConfigFile, HostInfo, TargetPlatform};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ljbuild.toml";

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
  /// Configuration file (default: ./ljbuild.toml if present)
  #[arg(short, long)]
  pub config: Option<PathBuf>,

  /// Target platform: windows, macos, linuxbsd or android (default: host)
  #[arg(short, long)]
  pub platform: Option<TargetPlatform>,

  /// Target architecture: x86_64, x86_32, arm64, arm32 or universal (default: host)
  #[arg(short, long)]
  pub arch: Option<Arch>,

  /// C compiler for the target
  #[arg(long, env = "CC")]
  pub cc: Option<String>,

  /// Compiler for host-side helper tools when cross-compiling
  #[arg(long, env = "HOST_CC")]
  pub host_cc: Option<String>,

  /// Build with the MSVC toolchain script instead of make
  #[arg(long, overrides_with = "no_msvc")]
  pub msvc: bool,

  /// Build with make even if the config file sets `msvc = true`
  #[arg(long, overrides_with = "msvc")]
  pub no_msvc: bool,

  /// Building for an extension: always use make, even with --msvc
  #[arg(long)]
  pub extension: bool,

  /// Android NDK root, required for android targets
  #[arg(long, env = "ANDROID_NDK_ROOT")]
  pub android_ndk_root: Option<String>,

  /// Parallel jobs for make (default: CPU count)
  #[arg(short, long)]
  pub jobs: Option<usize>,

  /// MACOSX_DEPLOYMENT_TARGET for macos builds
  #[arg(long)]
  pub macos_deployment_target: Option<String>,

  /// Directory containing the luaJIT source tree
  #[arg(short = 'C', long)]
  pub source_dir: Option<PathBuf>,
}

impl BuildArgs {
  /// Flag values as a config layer
  fn overrides(&self) -> ConfigFile {
    ConfigFile {
      platform: self.platform.clone(),
      arch: self.arch.clone(),
      cc: self.cc.clone(),
      host_cc: self.host_cc.clone(),
      msvc: self.msvc_override(),
      android_ndk_root: self.android_ndk_root.clone(),
      jobs: self.jobs,
      macos_deployment_target: self.macos_deployment_target.clone(),
      source_dir: self.source_dir.clone(),
      portable_dir: None,
      native_dir: None,
    }
  }

  /// `Some` only when a flag was given; the last of `--msvc`/`--no-msvc` wins
  fn msvc_override(&self) -> Option<bool> {
    match (self.msvc, self.no_msvc) {
      (true, _) => Some(true),
      (_, true) => Some(false),
      _ => None,
    }
  }

  fn config_file(&self) -> Result<ConfigFile> {
    match &self.config {
      Some(path) => Ok(ConfigFile::load(path)?),
      None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
        debug!(path = DEFAULT_CONFIG_FILE, "using config file from working directory");
        Ok(ConfigFile::load(Path::new(DEFAULT_CONFIG_FILE))?)
      }
      None => Ok(ConfigFile::default()),
    }
  }

  /// Merge every source and detect the host
  pub fn resolve(&self) -> Result<BuildConfig> {
    let file = self.config_file().context("Failed to load configuration")?;
    let mut config = file.merge(self.overrides()).into_build_config(HostInfo::detect());

    if let Ok(root) = dunce::canonicalize(&config.layout.root) {
      config.layout.root = root;
    }
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  #[derive(Parser)]
  struct TestCli {
    #[command(flatten)]
    args: BuildArgs,
  }

  fn parse(flags: &[&str]) -> BuildArgs {
    TestCli::parse_from(std::iter::once("ljbuild").chain(flags.iter().copied())).args
  }

  #[test]
  fn msvc_unset_leaves_config_file_value() {
    assert_eq!(parse(&[]).msvc_override(), None);
  }

  #[test]
  fn msvc_flags_last_one_wins() {
    assert_eq!(parse(&["--msvc"]).msvc_override(), Some(true));
    assert_eq!(parse(&["--no-msvc"]).msvc_override(), Some(false));
    assert_eq!(parse(&["--msvc", "--no-msvc"]).msvc_override(), Some(false));
    assert_eq!(parse(&["--no-msvc", "--msvc"]).msvc_override(), Some(true));
  }

  #[test]
  fn no_msvc_overrides_config_file() {
    let file = ConfigFile {
      msvc: Some(true),
      ..Default::default()
    };

    let merged = file.merge(parse(&["--no-msvc"]).overrides());
    assert_eq!(merged.msvc, Some(false));
  }
}
