//! Build dispatch.
//!
//! Turns a [`BuildConfig`] into an ordered [`BuildPlan`] and issues it through a
//! [`Runner`]. Planning is a pure function of the configuration: host facts come
//! from the config, and every refusal happens before the first step runs.
//!
//! Strategies, first match wins:
//! 1. native toolchain requested and not overridden: the vendor build script
//! 2. windows target from a POSIX host: `make` with `CROSS` and `TARGET_SYS=Windows`
//! 3. macos: `make` per architecture, fused with `lipo` for universal builds
//! 4. linux/bsd: `make`, with `CROSS` only for a 64-bit host building 32-bit
//! 5. android arm64: `make` with the NDK compiler and strip tool
//!
//! Anything else is [`DispatchError::UnsupportedPlatform`].

mod types;

use ljbuild_platform::{Arch, HostOs};
use tracing::debug;

pub use types::{BuildPlan, DispatchError, Strategy};

use crate::config::{BuildConfig, TargetPlatform};
use crate::execute::{BuildError, Runner, Step};
use crate::make::{Make, cross_prefix, host_cc_32};

/// Command run in the native-toolchain directory.
pub const NATIVE_BUILD_COMMAND: &str = "msvcbuild static";

/// Static library produced by the portable build, relative to its root.
pub const STATIC_LIB: &str = "src/libluajit.a";

/// Temporary name of the `x86_64` slice during a universal build.
pub const STATIC_LIB_X86_64: &str = "src/libluajit64.a";

/// Strip tool inside an Android NDK.
pub const NDK_STRIP: &str = "toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-strip";

/// How host and target architectures relate for a make-based build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchPair {
  Same,
  /// `x86_64` host, `x86_32` target
  Host64Target32,
}

impl ArchPair {
  fn resolve(config: &BuildConfig) -> Result<Self, DispatchError> {
    let host = &config.host.arch;
    let target = &config.target_arch;

    if host == target {
      Ok(Self::Same)
    } else if *host == Arch::X86_64 && *target == Arch::X86_32 {
      Ok(Self::Host64Target32)
    } else {
      Err(DispatchError::UnsupportedCrossCompile {
        platform: config.target_platform.clone(),
        host: host.clone(),
        target: target.clone(),
      })
    }
  }

  fn host_compiler(self, config: &BuildConfig) -> String {
    match self {
      Self::Same => config.host_compiler.clone(),
      Self::Host64Target32 => host_cc_32(&config.host_compiler),
    }
  }
}

/// Compute the steps for `config` without running anything.
///
/// `force_portable` is set by callers building the library for an extension:
/// it selects the portable build even when the native toolchain is configured.
pub fn plan(config: &BuildConfig, force_portable: bool) -> Result<BuildPlan, DispatchError> {
  if config.use_native_toolchain && !force_portable {
    let cwd = config.layout.native_root();
    return Ok(BuildPlan {
      strategy: Strategy::NativeToolchain,
      steps: vec![Step::new(NATIVE_BUILD_COMMAND, cwd)],
    });
  }

  let (strategy, commands) = match (&config.target_platform, config.host.os) {
    (TargetPlatform::Windows, HostOs::Posix) => (Strategy::WindowsCross, windows_cross(config)?),
    (TargetPlatform::MacOs, _) => (Strategy::MacOs, macos(config)),
    (TargetPlatform::LinuxBsd, _) => (Strategy::LinuxBsd, linux_bsd(config)?),
    (TargetPlatform::Android, _) => (Strategy::Android, android(config)?),
    (other, _) => return Err(DispatchError::UnsupportedPlatform(other.to_string())),
  };

  let cwd = config.layout.portable_root();
  let steps = commands.into_iter().map(|cmd| Step::new(cmd, &cwd)).collect();
  Ok(BuildPlan { strategy, steps })
}

/// Plan `config` and issue every step through `runner`, stopping at the first failure.
///
/// Returns the plan that was carried out.
pub fn dispatch<R: Runner + ?Sized>(
  config: &BuildConfig,
  force_portable: bool,
  runner: &mut R,
) -> Result<BuildPlan, BuildError> {
  let plan = plan(config, force_portable)?;
  debug!(
    strategy = %plan.strategy,
    platform = %config.target_platform,
    arch = %config.target_arch,
    steps = plan.steps.len(),
    "dispatching build"
  );

  for step in &plan.steps {
    runner.run(step)?;
  }
  Ok(plan)
}

fn windows_cross(config: &BuildConfig) -> Result<Vec<String>, DispatchError> {
  let pair = ArchPair::resolve(config)?;
  let build = Make::new()
    .var("HOST_CC", pair.host_compiler(config))
    .var("CROSS", cross_prefix(&config.compiler))
    .var("BUILDMODE", "static")
    .var("TARGET_SYS", "Windows")
    .jobs(config.jobs());

  Ok(vec![Make::clean().render(), build.render()])
}

fn macos(config: &BuildConfig) -> Vec<String> {
  let deployment = config.macos_deployment_target.as_str();
  let clean = Make::clean().var("MACOSX_DEPLOYMENT_TARGET", deployment).render();
  let build = |arch: &str| {
    Make::new()
      .var("CC", config.compiler.as_str())
      .var("TARGET_FLAGS", format!("-arch {}", arch))
      .var("MACOSX_DEPLOYMENT_TARGET", deployment)
      .jobs(config.jobs())
      .render()
  };

  match &config.target_arch {
    Arch::Universal => vec![
      clean.clone(),
      build(Arch::X86_64.as_str()),
      format!("mv {} {}", STATIC_LIB, STATIC_LIB_X86_64),
      clean,
      build(Arch::Arm64.as_str()),
      format!("lipo -create {} {} -output {}", STATIC_LIB, STATIC_LIB_X86_64, STATIC_LIB),
      format!("rm {}", STATIC_LIB_X86_64),
    ],
    arch => vec![clean, build(arch.as_str())],
  }
}

fn linux_bsd(config: &BuildConfig) -> Result<Vec<String>, DispatchError> {
  let build = match ArchPair::resolve(config)? {
    ArchPair::Same => Make::new()
      .var("CC", config.compiler.as_str())
      .var("BUILDMODE", "static")
      .jobs(config.jobs()),
    pair @ ArchPair::Host64Target32 => Make::new()
      .var("HOST_CC", pair.host_compiler(config))
      .var("CROSS", cross_prefix(&config.compiler))
      .var("BUILDMODE", "static")
      .jobs(config.jobs()),
  };

  Ok(vec![Make::clean().render(), build.render()])
}

fn android(config: &BuildConfig) -> Result<Vec<String>, DispatchError> {
  if config.target_arch != Arch::Arm64 {
    return Err(DispatchError::UnsupportedAndroidArch(config.target_arch.clone()));
  }
  let ndk_root = config
    .android_ndk_root
    .as_deref()
    .filter(|root| !root.trim().is_empty())
    .ok_or(DispatchError::MissingAndroidNdkRoot)?;

  let strip = format!("{}/{}", ndk_root.trim_end_matches(['/', '\\']), NDK_STRIP);
  let build = Make::new()
    .var("CC", config.compiler.as_str())
    .var("TARGET_LD", config.compiler.as_str())
    .var("TARGET_STRIP", strip)
    .var("BUILDMODE", "static")
    .jobs(config.jobs());

  Ok(vec![Make::clean().render(), build.render()])
}
