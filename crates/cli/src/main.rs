// cmdpath CLI entry point.

use std::process;

use clap::Parser;

mod commands;
mod config;
mod exit_code;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "cmdpath", about = "Resolve input against a tree of named commands")]
struct Cli {
    #[command(flatten)]
    source: commands::SourceArgs,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match commands::run(&cli.source, cli.command) {
        Ok(code) => code.into(),
        Err(error) => {
            output::print_anyhow_error(OutputFormat::detect(cli.source.json), &error);
            exit_code::ExitCode::from_error(&error).into()
        }
    }
}
