use std::fmt;

use serde::Serialize;

/// Host operating system family.
///
/// Only the distinction that changes how commands run and how their status is
/// reported matters here: a POSIX shell versus the Windows command interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
  Posix,
  Windows,
}

impl HostOs {
  /// Detect the host OS family at compile time
  pub const fn current() -> Self {
    if cfg!(windows) { Self::Windows } else { Self::Posix }
  }

  /// Returns the lowercase string identifier for this OS family
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Posix => "posix",
      Self::Windows => "windows",
    }
  }

  /// Decode a raw status returned by the system shell into an exit code.
  ///
  /// On POSIX hosts the raw value is a wait status: the exit code lives in bits
  /// 8..16 and the low seven bits carry the terminating signal. A child killed by
  /// a signal is reported as `128 + signal`, the shell convention, so it can
  /// never decode to zero. On Windows the raw value already is the exit code.
  pub const fn normalize_status(&self, raw: i32) -> i32 {
    match self {
      Self::Windows => raw,
      Self::Posix => {
        let signal = raw & 0x7f;
        if signal == 0 { (raw >> 8) & 0xff } else { 128 + signal }
      }
    }
  }
}

impl fmt::Display for HostOs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
