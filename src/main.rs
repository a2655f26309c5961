//! Gostall CLI - build Go executables under any name you want
//!
//! Entry point for the gostall command-line application.

use clap::Parser;

use gostall::cli::output::{display_error, OutputConfig};
use gostall::cli::Cli;
use gostall::core::install::{program_name, Invocation};

#[tokio::main]
async fn main() {
    let program = program_name(std::env::args_os().next().as_deref());
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let output_config = OutputConfig::new(cli.quiet, cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(output_config.env_filter())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let result = match Invocation::from_process() {
        Ok(invocation) => cli.run(invocation).await,
        Err(e) => Err(e.into()),
    };

    // Run the command and handle errors
    if let Err(e) = result {
        display_error(&program, &e);
        std::process::exit(1);
    }
}
