//! Rendering of portable-build (`make`) command lines.

use tracing::warn;

/// A single `make` invocation.
///
/// Variables are rendered as `NAME="value"` in insertion order, followed by the
/// job-count flag when one is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Make {
  target: Option<String>,
  vars: Vec<(String, String)>,
  jobs: Option<usize>,
}

impl Make {
  pub fn new() -> Self {
    Self::default()
  }

  /// `make clean`
  pub fn clean() -> Self {
    Self::new().target("clean")
  }

  pub fn target(mut self, target: impl Into<String>) -> Self {
    self.target = Some(target.into());
    self
  }

  pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.vars.push((name.into(), value.into()));
    self
  }

  pub fn jobs(mut self, jobs: usize) -> Self {
    self.jobs = Some(jobs);
    self
  }

  pub fn render(&self) -> String {
    let mut cmd = String::from("make");
    if let Some(target) = &self.target {
      cmd.push(' ');
      cmd.push_str(target);
    }
    for (name, value) in &self.vars {
      cmd.push_str(&format!(" {}=\"{}\"", name, value));
    }
    if let Some(jobs) = self.jobs {
      cmd.push_str(&format!(" -j{}", jobs));
    }
    cmd
  }
}

/// Derive the cross-toolchain prefix (`CROSS`) from a target compiler name.
///
/// `x86_64-w64-mingw32-gcc` becomes `x86_64-w64-mingw32-`. Only a trailing
/// `-gcc` or `-clang` is recognised; any other name is returned unchanged and the
/// build itself is left to fail on it.
pub fn cross_prefix(compiler: &str) -> String {
  for suffix in ["-gcc", "-clang"] {
    if let Some(stem) = compiler.strip_suffix(suffix) {
      return format!("{}-", stem);
    }
  }
  warn!(compiler = %compiler, "compiler has no -gcc or -clang suffix, using it as CROSS unchanged");
  compiler.to_string()
}

/// Host compiler forced to emit 32-bit code, for building a 32-bit target on a 64-bit host
pub fn host_cc_32(host_compiler: &str) -> String {
  format!("{} -m32", host_compiler)
}
