//! Command execution.
//!
//! Every shell side effect of a build goes through a [`Runner`]. The dispatcher
//! only produces [`Step`]s; runners decide what issuing one means.

mod recording;
mod shell;
mod types;

pub use recording::RecordingRunner;
pub use shell::ShellRunner;
pub use types::{BuildError, Step, UNSUPPORTED_EXIT_CODE};

/// Issues a single step and blocks until it has finished.
///
/// Returning `Err` stops the build: callers never continue past a failed step.
pub trait Runner {
  fn run(&mut self, step: &Step) -> Result<(), BuildError>;
}
