use anyhow::Result;

use ljbuild_lib::HostInfo;

use crate::output::{OutputFormat, print_info, print_json, print_stat};

pub fn cmd_info(format: OutputFormat) -> Result<()> {
  let host = HostInfo::detect();

  if format.is_json() {
    return print_json(&host);
  }

  print_info(&format!("ljbuild v{}", env!("CARGO_PKG_VERSION")));
  print_stat("OS", host.os.as_str());
  print_stat("Arch", host.arch.as_str());
  print_stat("CPUs", &host.cpu_count.to_string());
  Ok(())
}
