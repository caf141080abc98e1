use clap::Parser;
use fdesk_cli::Cli;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match fdesk_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fdesk_cli::report(&err),
    }
}
