//! CLI entry point for the Game of Life board store

use clap::Parser;
use lifeboard::io::cli::Cli;

fn main() -> lifeboard::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let mut controller = cli.controller();
    let mut out = std::io::stdout().lock();
    cli.execute(&mut controller, &mut out)
}
