use tracing::debug;

use super::{BuildError, Runner, Step};

/// Runner that records steps instead of running them.
///
/// Used for dry runs. It can also be told to fail at a given step, which makes it
/// the test double for failure sequencing.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  steps: Vec<Step>,
  fail_at: Option<(usize, i32)>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fail the step at `index` (zero-based) with exit code `code`
  pub fn failing_at(index: usize, code: i32) -> Self {
    Self {
      steps: Vec::new(),
      fail_at: Some((index, code)),
    }
  }

  /// Steps issued so far, including a failed one
  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  pub fn commands(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.command.as_str()).collect()
  }
}

impl Runner for RecordingRunner {
  fn run(&mut self, step: &Step) -> Result<(), BuildError> {
    let index = self.steps.len();
    debug!(index, cmd = %step.command, "recording step");
    self.steps.push(step.clone());

    match self.fail_at {
      Some((at, code)) if at == index => Err(BuildError::CommandFailed {
        cmd: step.command.clone(),
        code,
      }),
      _ => Ok(()),
    }
  }
}
