mod args;
mod build;
mod info;
mod plan;

pub use args::BuildArgs;
pub use build::cmd_build;
pub use info::cmd_info;
pub use plan::cmd_plan;
