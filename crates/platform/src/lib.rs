//! Host detection for ljbuild
//!
//! This crate provides the host facts the build dispatcher depends on:
//! - OS family and its wait-status encoding
//! - CPU architecture naming shared by host and target
//! - Logical CPU count used to size build parallelism

mod arch;
mod host;
mod os;

pub use arch::Arch;
pub use host::{HOST_ARCH_ENV, HostInfo, cpu_count, machine_arch};
pub use os::HostOs;
