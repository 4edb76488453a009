//! CLI smoke tests for ljbuild.
//!
//! These tests verify that commands run without panicking, print the steps they
//! issue and exit with the code of the failing step.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the ljbuild binary with a predictable environment.
fn ljbuild_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("ljbuild");
  cmd
    .env_remove("CC")
    .env_remove("HOST_CC")
    .env_remove("ANDROID_NDK_ROOT")
    .env_remove("RUST_LOG")
    .env("LJBUILD_HOST_ARCH", "x86_64");
  cmd
}

/// Create a temp directory holding an empty `luaJIT/src` tree.
fn source_tree() -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir_all(temp.path().join("luaJIT").join("src")).unwrap();
  temp
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  ljbuild_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  ljbuild_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("ljbuild"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["build", "plan", "info"] {
    ljbuild_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// info
// =============================================================================

#[test]
fn info_reports_host() {
  ljbuild_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("Arch: x86_64"));
}

#[test]
fn info_json_is_valid() {
  let output = ljbuild_cmd().args(["info", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["arch"], "x86_64");
  assert!(json["cpu_count"].as_u64().unwrap() >= 1);
}

// =============================================================================
// plan
// =============================================================================

#[test]
fn plan_linux_native() {
  let temp = source_tree();

  ljbuild_cmd()
    .args(["plan", "--platform", "linuxbsd", "--arch", "x86_64", "--cc", "/usr/bin/clang", "--jobs", "4"])
    .arg("-C")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Strategy: linux-bsd"))
    .stdout(predicate::str::contains("make clean"))
    .stdout(predicate::str::contains(r#"make CC="/usr/bin/clang" BUILDMODE="static" -j4"#));
}

#[test]
fn plan_json_lists_steps() {
  let temp = source_tree();

  let output = ljbuild_cmd()
    .args(["plan", "--platform", "macos", "--arch", "universal", "--format", "json"])
    .arg("-C")
    .arg(temp.path())
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["strategy"], "macos");
  assert_eq!(json["steps"].as_array().unwrap().len(), 7);
}

#[test]
fn plan_reads_config_file() {
  let temp = source_tree();
  let config = temp.path().join("android.toml");
  std::fs::write(
    &config,
    r#"
platform = "android"
arch = "arm64"
cc = "aarch64-linux-android21-clang"
android_ndk_root = "/ndk"
"#,
  )
  .unwrap();

  ljbuild_cmd()
    .arg("plan")
    .arg("--config")
    .arg(&config)
    .arg("-C")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "/ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-strip",
    ));
}

#[test]
fn plan_flags_override_config_file() {
  let temp = source_tree();
  let config = temp.path().join("ljbuild.toml");
  std::fs::write(&config, "platform = \"linuxbsd\"\ncc = \"gcc\"\n").unwrap();

  ljbuild_cmd()
    .arg("plan")
    .arg("--config")
    .arg(&config)
    .args(["--cc", "clang"])
    .arg("-C")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains(r#"CC="clang""#));
}

#[test]
fn plan_no_msvc_overrides_config_file() {
  let temp = source_tree();
  let config = temp.path().join("ljbuild.toml");
  std::fs::write(&config, "platform = \"linuxbsd\"\nmsvc = true\n").unwrap();

  ljbuild_cmd()
    .arg("plan")
    .arg("--config")
    .arg(&config)
    .arg("-C")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Strategy: native-toolchain"));

  ljbuild_cmd()
    .arg("plan")
    .arg("--config")
    .arg(&config)
    .arg("--no-msvc")
    .arg("-C")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Strategy: linux-bsd"));
}

#[test]
fn plan_unreadable_config_fails() {
  ljbuild_cmd()
    .args(["plan", "--config", "/nonexistent/ljbuild.toml"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
#[cfg(unix)]
fn plan_unsupported_platform_exits_with_sentinel() {
  // -1 as a process status reads back as 255 on unix
  ljbuild_cmd()
    .args(["plan", "--platform", "solaris"])
    .assert()
    .code(255)
    .stderr(predicate::str::contains("unsupported platform 'solaris'"));
}

#[test]
#[cfg(unix)]
fn plan_unsupported_cross_exits_with_sentinel() {
  ljbuild_cmd()
    .args(["plan", "--platform", "linuxbsd", "--arch", "arm64"])
    .assert()
    .code(255)
    .stderr(predicate::str::contains("unsupported cross compile"));
}

// =============================================================================
// build
// =============================================================================

#[cfg(unix)]
mod build {
  use std::os::unix::fs::PermissionsExt;
  use std::path::Path;

  use super::*;

  /// Put a fake `make` on PATH that records its arguments and exits with `code`.
  fn fake_make(dir: &Path, code: i32) -> String {
    let bin = dir.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let log = dir.join("make.log");
    let script = bin.join("make");
    std::fs::write(
      &script,
      format!("#!/bin/sh\necho \"$@\" >> \"{}\"\nexit {}\n", log.display(), code),
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let path = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", bin.display(), path)
  }

  #[test]
  #[serial]
  fn build_runs_every_step() {
    let temp = source_tree();
    let path = fake_make(temp.path(), 0);

    ljbuild_cmd()
      .env("PATH", path)
      .args(["build", "--platform", "linuxbsd", "--arch", "x86_64", "--cc", "gcc", "--jobs", "2"])
      .arg("-C")
      .arg(temp.path())
      .assert()
      .success()
      .stdout(predicate::str::contains("Running: make clean"))
      .stdout(predicate::str::contains("Build complete: 2 step(s)"));

    let log = std::fs::read_to_string(temp.path().join("make.log")).unwrap();
    assert_eq!(log, "clean\nCC=gcc BUILDMODE=static -j2\n");
  }

  #[test]
  #[serial]
  fn build_exits_with_failing_step_code() {
    let temp = source_tree();
    let path = fake_make(temp.path(), 2);

    ljbuild_cmd()
      .env("PATH", path)
      .args(["build", "--platform", "linuxbsd", "--arch", "x86_64"])
      .arg("-C")
      .arg(temp.path())
      .assert()
      .code(2)
      .stdout(predicate::str::contains("Running: make clean"))
      .stdout(predicate::str::contains("Running: make CC=").not())
      .stderr(predicate::str::contains("command failed with exit code 2: make clean"));
  }

  #[test]
  #[serial]
  fn build_refuses_before_running_anything() {
    let temp = source_tree();
    let path = fake_make(temp.path(), 0);

    ljbuild_cmd()
      .env("PATH", path)
      .args(["build", "--platform", "windows", "--arch", "arm64"])
      .arg("-C")
      .arg(temp.path())
      .assert()
      .code(255)
      .stdout(predicate::str::contains("Running:").not());

    assert!(!temp.path().join("make.log").exists());
  }

  #[test]
  #[serial]
  fn build_native_toolchain_runs_in_src() {
    let temp = source_tree();
    let src = temp.path().join("luaJIT").join("src");
    let script = src.join("msvcbuild");
    std::fs::write(&script, "#!/bin/sh\ntouch built_static\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let path = format!("{}:{}", src.display(), std::env::var("PATH").unwrap_or_default());

    ljbuild_cmd()
      .env("PATH", path)
      .args(["build", "--msvc"])
      .arg("-C")
      .arg(temp.path())
      .assert()
      .success()
      .stdout(predicate::str::contains("Running: msvcbuild static"));

    assert!(src.join("built_static").exists());
  }
}
