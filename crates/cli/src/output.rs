//! Terminal output for ljbuild.
//!
//! Status lines go to stdout so a build log reads top to bottom: the plan, each
//! step as it is issued, then a summary. Only the final error goes to stderr.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

mod marks {
  pub const DONE: &str = "✓";
  pub const FAILED: &str = "✗";
  pub const NOTE: &str = "•";
  pub const STEP: &str = "→";
  pub const DIR: &str = "in";
}

/// Wall time of a build, e.g. `850ms`, `12.3s`, `4m 05s`
pub fn format_elapsed(elapsed: Duration) -> String {
  let secs = elapsed.as_secs();
  match secs {
    0 => format!("{}ms", elapsed.subsec_millis()),
    1..=59 => format!("{}.{}s", secs, elapsed.subsec_millis() / 100),
    _ => format!("{}m {:02}s", secs / 60, secs % 60),
  }
}

pub fn print_success(message: &str) {
  println!("{} {}", marks::DONE.if_supports_color(Stream::Stdout, |s| s.green()), message);
}

/// Final error line; the process exits right after it
pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    marks::FAILED.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!("{} {}", marks::NOTE.if_supports_color(Stream::Stdout, |s| s.blue()), message);
}

/// Indented `Label: value` line under a heading
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

/// Heading for the steps that share a working directory
pub fn print_directory(dir: &Path) {
  println!();
  println!(
    "{} {}",
    marks::DIR.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    dir.display().if_supports_color(Stream::Stdout, |s| s.bold())
  );
}

/// One planned command
pub fn print_step(command: &str) {
  println!("  {} {}", marks::STEP.if_supports_color(Stream::Stdout, |s| s.cyan()), command);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn elapsed_under_a_second_is_millis() {
    assert_eq!(format_elapsed(Duration::from_millis(850)), "850ms");
  }

  #[test]
  fn elapsed_seconds_keep_one_decimal() {
    assert_eq!(format_elapsed(Duration::from_millis(12_345)), "12.3s");
    assert_eq!(format_elapsed(Duration::from_secs(1)), "1.0s");
  }

  #[test]
  fn elapsed_minutes_pad_seconds() {
    assert_eq!(format_elapsed(Duration::from_secs(245)), "4m 05s");
  }

  #[test]
  fn json_format_flag() {
    assert!(OutputFormat::Json.is_json());
    assert!(!OutputFormat::Text.is_json());
  }
}
