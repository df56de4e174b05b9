mod cli;
mod draft;
mod error;
mod init;
mod progress;
mod query;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

/// Exit code used when a query ended on the error page.
const EXIT_FALLBACK: i32 = 2;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Query {
            file,
            variables,
            config,
            route,
            embed,
            locale,
        } => query::execute(query::QueryArgs {
            file,
            variables,
            config_path: config,
            route,
            embed,
            locale,
        })
        .map(|shown_fallback| {
            if shown_fallback {
                process::exit(EXIT_FALLBACK);
            }
        }),
        Commands::Init { config, force } => init::execute(config, force),
        Commands::Draft {
            block,
            realm,
            index,
            series,
            event,
            text,
        } => draft::execute(draft::DraftArgs {
            block,
            realm,
            index,
            series,
            event,
            text,
        }),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
