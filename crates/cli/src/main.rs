mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ljbuild_lib::BuildError;

use cmd::{BuildArgs, cmd_build, cmd_info, cmd_plan};
use output::{OutputFormat, print_error};

/// ljbuild - build the LuaJIT static library for a target platform
#[derive(Parser)]
#[command(name = "ljbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the library, running each step through the system shell
  Build {
    #[command(flatten)]
    args: BuildArgs,
  },

  /// Show the steps a build would run (dry-run)
  Plan {
    #[command(flatten)]
    args: BuildArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show detected host information
  Info {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(err) = run(cli.command) {
    print_error(&format!("{:#}", err));
    std::process::exit(exit_code(&err));
  }
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::Build { args } => cmd_build(&args),
    Commands::Plan { args, format } => cmd_plan(&args, format),
    Commands::Info { format } => cmd_info(format),
  }
}

/// The only place the process status is decided.
///
/// A failed command exits with that command's code and a refused configuration
/// with -1. Anything else (bad flags, unreadable config) exits with 1.
fn exit_code(err: &anyhow::Error) -> i32 {
  err.downcast_ref::<BuildError>().map(BuildError::exit_code).unwrap_or(1)
}
