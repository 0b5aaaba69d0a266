use std::process::ExitCode;

use anyhow::Result;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::args::{Cli, Command};

mod analyze;
mod check;
mod doctor;
mod endpoints;

/// How a command finished, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Drift,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::SUCCESS,
            Self::Drift => ExitCode::from(1),
            Self::Failed => ExitCode::from(2),
        }
    }
}

pub async fn dispatch(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Command::Analyze(args) => analyze::run(args).await,
        Command::Check(args) => check::run(args).await,
        Command::Endpoints { spec } => endpoints::run(&spec).await,
        Command::Doctor { spec } => doctor::run(spec.as_deref()).await,
    }
}

/// Current UTC time, RFC 3339.
pub fn timestamp() -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().format(&Rfc3339)
}
