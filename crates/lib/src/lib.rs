//! ljbuild-lib: build orchestration for the LuaJIT static library
//!
//! This crate decides how the library is built for a target:
//! - `config`: the build configuration and its TOML form
//! - `dispatch`: strategy selection and the ordered command plan
//! - `execute`: the runner every command goes through
//! - `make`: portable-build command rendering and toolchain prefixes

pub mod config;
pub mod dispatch;
pub mod execute;
pub mod make;

pub use config::{BuildConfig, ConfigError, ConfigFile, Layout, TargetPlatform};
pub use dispatch::{BuildPlan, DispatchError, Strategy, dispatch, plan};
pub use execute::{BuildError, RecordingRunner, Runner, ShellRunner, Step, UNSUPPORTED_EXIT_CODE};
pub use ljbuild_platform::{Arch, HostInfo, HostOs};
