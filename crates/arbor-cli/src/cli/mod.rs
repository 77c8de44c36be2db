//! The `arbor` command line.

mod commands;

use clap::{Args, Parser};

pub use commands::{BuildArgs, Command, DevArgs, ProjectArgs};

#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    version,
    about = "Compile route directories into route tables and run the development loop"
)]
pub struct Cli {
    #[command(flatten)]
    pub output: OutputArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// What reaches the terminal. Accepted before or after the subcommand.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Log route classification and build cycle detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print status lines and logs without ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,
}
