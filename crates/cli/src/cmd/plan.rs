//! Implementation of the `ljbuild plan` command.
//!
//! Prints the steps `ljbuild build` would run without running any of them.

use anyhow::Result;

use ljbuild_lib::{BuildError, plan};

use super::BuildArgs;
use crate::output::{OutputFormat, print_directory, print_info, print_json, print_stat, print_step};

pub fn cmd_plan(args: &BuildArgs, format: OutputFormat) -> Result<()> {
  let config = args.resolve()?;
  let plan = plan(&config, args.extension).map_err(BuildError::from)?;

  if format.is_json() {
    return print_json(&plan);
  }

  print_info(&format!("Strategy: {}", plan.strategy));
  print_stat("Platform", config.target_platform.as_str());
  print_stat("Arch", config.target_arch.as_str());
  print_stat("Jobs", &config.jobs().to_string());

  let mut cwd = None;
  for step in &plan.steps {
    if cwd != Some(&step.cwd) {
      print_directory(&step.cwd);
      cwd = Some(&step.cwd);
    }
    print_step(&step.command);
  }
  Ok(())
}
