use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use trawl_runtime::logging;

#[derive(Debug, Parser)]
#[command(name = "trawl", version, about = "Trigram LIKE-index engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => commands::build::run(args),
        Command::Query(args) => commands::query::run(args),
        Command::Bench(args) => commands::bench::run(args),
    }
}
