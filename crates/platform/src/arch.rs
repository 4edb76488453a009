use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CPU architecture, named the way the build configuration names it.
///
/// Host machines report several spellings for the same ISA (`aarch64`, `arm64`,
/// `amd64`, ...). Parsing folds them onto one variant so a host and a target can
/// be compared directly. Unknown names are kept verbatim in [`Arch::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Arch {
  X86_64,
  X86_32,
  Arm64,
  Arm32,
  /// Fat binary covering `x86_64` and `arm64`; only meaningful for macOS.
  Universal,
  Other(String),
}

impl Arch {
  /// Returns the canonical identifier for this architecture
  pub fn as_str(&self) -> &str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86_32 => "x86_32",
      Self::Arm64 => "arm64",
      Self::Arm32 => "arm32",
      Self::Universal => "universal",
      Self::Other(name) => name,
    }
  }
}

impl From<&str> for Arch {
  fn from(s: &str) -> Self {
    match s.trim().to_ascii_lowercase().as_str() {
      "x86_64" | "amd64" | "x64" => Self::X86_64,
      "x86_32" | "x86" | "i386" | "i686" => Self::X86_32,
      "arm64" | "aarch64" => Self::Arm64,
      "arm32" | "arm" | "armv7" => Self::Arm32,
      "universal" => Self::Universal,
      other => Self::Other(other.to_string()),
    }
  }
}

impl From<String> for Arch {
  fn from(s: String) -> Self {
    Self::from(s.as_str())
  }
}

impl FromStr for Arch {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from(s))
  }
}

impl From<Arch> for String {
  fn from(arch: Arch) -> Self {
    arch.as_str().to_string()
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
