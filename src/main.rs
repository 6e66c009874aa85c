mod action;
mod commands;
mod config;
mod diagnostics;
mod error;
mod logging;
mod opener;
mod parser;
mod sink;
mod types;

use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::LinkArgs;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "mdnav", about = "Follow markdown links under the cursor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log every resolution step to stderr
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the link under the cursor and open its target
    Open {
        #[command(flatten)]
        link: LinkArgs,
    },
    /// Print what opening the link under the cursor would do
    Resolve {
        #[command(flatten)]
        link: LinkArgs,
        /// Print the action as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            diagnostics::print_error(&e);
            return ExitCode::FAILURE;
        },
    };
    logging::init(cli.debug || config.debug);

    let result = match &cli.command {
        Commands::Open { link } => commands::open(link, &config),
        Commands::Resolve { link, json } => commands::resolve(link, &config, *json),
    };

    return match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}
