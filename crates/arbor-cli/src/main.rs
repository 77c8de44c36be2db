use arbor_cli::cli::{Cli, Command};
use arbor_cli::{commands, error, logger, ui};
use clap::Parser;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let Cli { output, command } = Cli::parse();

    let color = ui::init(output.no_color);
    logger::init_logger(output.verbose, output.quiet, color);

    match command {
        Command::Build(args) => commands::build_execute(args).await,
        Command::Dev(args) => commands::dev_execute(args).await,
    }
    .map_err(error::cli_error_to_miette)
}
