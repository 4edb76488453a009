//! Types for command execution.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::dispatch::DispatchError;

/// Exit status reported for configurations the dispatcher cannot handle.
///
/// Not derived from any subprocess.
pub const UNSUPPORTED_EXIT_CODE: i32 = -1;

/// One shell command and the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
  pub command: String,
  pub cwd: PathBuf,
}

impl Step {
  pub fn new(command: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
    Self {
      command: command.into(),
      cwd: cwd.as_ref().to_path_buf(),
    }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.command)
  }
}

/// Errors that end a build.
///
/// Nothing in the library recovers from these; they travel up to the program
/// boundary, which turns [`BuildError::exit_code`] into the process status.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The configuration was rejected before any command ran.
  #[error(transparent)]
  Dispatch(#[from] DispatchError),

  /// A command exited with a nonzero (normalized) status.
  #[error("command failed with exit code {code}: {cmd}")]
  CommandFailed { cmd: String, code: i32 },

  /// The system shell could not be started.
  #[error("failed to start shell for `{cmd}`: {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: std::io::Error,
  },
}

impl BuildError {
  /// Process exit status for this error
  pub fn exit_code(&self) -> i32 {
    match self {
      BuildError::CommandFailed { code, .. } => *code,
      BuildError::Dispatch(_) | BuildError::Spawn { .. } => UNSUPPORTED_EXIT_CODE,
    }
  }
}
