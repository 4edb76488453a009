//! Implementation of the `ljbuild build` command.
//!
//! Plans the build for the resolved configuration and runs every step through
//! the system shell, echoing each command before it runs.

use std::time::Instant;

use anyhow::Result;

use ljbuild_lib::{ShellRunner, dispatch};

use super::BuildArgs;
use crate::output::{format_elapsed, print_info, print_success};

pub fn cmd_build(args: &BuildArgs) -> Result<()> {
  let config = args.resolve()?;

  print_info(&format!(
    "Building LuaJIT for {} ({}) with {} job(s)",
    config.target_platform,
    config.target_arch,
    config.jobs()
  ));

  let start = Instant::now();
  let mut runner = ShellRunner::new();
  let plan = dispatch(&config, args.extension, &mut runner)?;

  print_success(&format!(
    "Build complete: {} step(s) in {}",
    plan.steps.len(),
    format_elapsed(start.elapsed())
  ));
  Ok(())
}
