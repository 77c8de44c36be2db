use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one build cycle and exit non-zero if it fails
    ///
    /// Runs the pre-build hook, regenerates `_main.tsx`/`_main.ts` in every
    /// route root, bundles the entry point and runs the post-build hook.
    Build(BuildArgs),

    /// Rebuild, restart the app and reload browsers on every change
    Dev(DevArgs),
}

/// Where the project lives. Shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project directory that route roots, the entry point and the public
    /// directory are resolved against [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of `<DIR>/arbor.config.json`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Empty the output directory after the pre-build hook
    #[arg(long)]
    pub clean: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DevArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Live-reload port; the app reports readiness with `GET /listening` here
    /// [overrides `DEV_PORT` and `dev.port`]
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}
