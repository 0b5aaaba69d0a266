use std::io::{self, IsTerminal, Write};
use std::sync::OnceLock;

use serde::Serialize;
use serde_json::json;
use termcolor::{ColorChoice, StandardStream};

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn init(json: bool) {
    let _ = JSON_MODE.set(json);
}

pub fn is_json() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// Report a fatal error. JSON mode also emits a machine-readable object on stdout.
pub fn error(e: &anyhow::Error) {
    if is_json() {
        let code = e
            .downcast_ref::<specdrift_core::DriftError>()
            .map(|d| d.code())
            .unwrap_or("error");
        let payload = json!({"error": {"code": code, "message": format!("{e:#}")}});
        println!("{payload}");
    }
    eprintln_line(&format!("error: {e:#}"));
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}

/// Colored stdout, plain when stdout is not a terminal.
pub fn stdout() -> StandardStream {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}
