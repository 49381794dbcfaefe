use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::prelude::*;

use mmseqs_web_config::LaunchArgs;

fn main() -> ExitCode {
    let args = LaunchArgs::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let action = args.action();
    match args.into_builder().handle_and_print(&action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
