//! Runs steps through the system shell.

use std::process::{Command, ExitStatus};

use ljbuild_platform::HostOs;
use tracing::{debug, info};

use super::{BuildError, Runner, Step};

/// Runner that hands each step to the system shell.
///
/// The working directory is set on the child process only; the orchestrator's
/// own working directory is never changed.
#[derive(Debug, Clone)]
pub struct ShellRunner {
  echo: bool,
}

impl ShellRunner {
  pub fn new() -> Self {
    Self { echo: true }
  }

  /// Run without printing each command to stdout
  pub fn quiet() -> Self {
    Self { echo: false }
  }
}

impl Default for ShellRunner {
  fn default() -> Self {
    Self::new()
  }
}

impl Runner for ShellRunner {
  fn run(&mut self, step: &Step) -> Result<(), BuildError> {
    info!(cmd = %step.command, cwd = %step.cwd.display(), "running command");
    if self.echo {
      println!("Running: {}", step.command);
    }

    let mut command = shell_command(&step.command);
    command.current_dir(&step.cwd);

    let status = command.status().map_err(|source| BuildError::Spawn {
      cmd: step.command.clone(),
      source,
    })?;

    let code = exit_code(status);
    debug!(code, "command finished");
    if code != 0 {
      return Err(BuildError::CommandFailed {
        cmd: step.command.clone(),
        code,
      });
    }
    Ok(())
  }
}

/// Build the shell invocation for a command line.
///
/// `/bin/sh -c` on Unix, `cmd.exe /C` on Windows. The command is handed to
/// `cmd.exe` verbatim because it does not understand the escaping Rust applies
/// to ordinary arguments.
#[cfg(unix)]
fn shell_command(cmd: &str) -> Command {
  let mut command = Command::new("/bin/sh");
  command.arg("-c").arg(cmd);
  command
}

#[cfg(windows)]
fn shell_command(cmd: &str) -> Command {
  use std::os::windows::process::CommandExt;

  let mut command = Command::new("cmd.exe");
  command.arg("/C").raw_arg(cmd);
  command
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
  use std::os::unix::process::ExitStatusExt;

  HostOs::Posix.normalize_status(status.into_raw())
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
  HostOs::Windows.normalize_status(status.code().unwrap_or(-1))
}
