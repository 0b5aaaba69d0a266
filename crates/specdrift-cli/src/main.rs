use std::process::ExitCode;

use clap::Parser;

mod args;
mod cmd;
mod error;
mod executor;
mod io;
mod llm;
mod logging;
mod output;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = args::Cli::parse();
    output::init(cli.json);
    logging::init(cli.verbose);

    match cmd::dispatch(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            output::error(&e);
            cmd::Outcome::Failed.exit_code()
        }
    }
}
