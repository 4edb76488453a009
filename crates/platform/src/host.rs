//! Host facts gathered once at the program boundary

use std::env;

use serde::Serialize;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tracing::debug;

use crate::{Arch, HostOs};

/// Overrides the detected machine architecture.
pub const HOST_ARCH_ENV: &str = "LJBUILD_HOST_ARCH";

/// Everything the dispatcher needs to know about the machine it runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostInfo {
  pub os: HostOs,
  pub arch: Arch,
  pub cpu_count: usize,
}

impl HostInfo {
  pub fn new(os: HostOs, arch: Arch, cpu_count: usize) -> Self {
    Self {
      os,
      arch,
      cpu_count: cpu_count.max(1),
    }
  }

  /// Detect the current host
  ///
  /// The architecture honours `LJBUILD_HOST_ARCH` when it is set and non-empty.
  pub fn detect() -> Self {
    let arch = match env::var(HOST_ARCH_ENV) {
      Ok(value) if !value.trim().is_empty() => Arch::from(value),
      _ => machine_arch(),
    };
    let info = Self::new(HostOs::current(), arch, cpu_count());
    debug!(os = %info.os, arch = %info.arch, cpus = info.cpu_count, "detected host");
    info
  }
}

/// Architecture of the machine, as `uname -m` reports it.
///
/// A 32-bit binary running on a 64-bit machine still sees the 64-bit name.
pub fn machine_arch() -> Arch {
  Arch::from(System::cpu_arch())
}

/// Number of logical CPUs, never less than one
pub fn cpu_count() -> usize {
  let sys = System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
  sys.cpus().len().max(1)
}
