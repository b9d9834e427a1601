use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use transloader::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match transloader::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitStatus::Error.into()
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "transloader=debug"
    } else {
        "transloader=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
