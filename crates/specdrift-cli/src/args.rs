use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use specdrift_core::model::HttpMethod;
use specdrift_core::DriftError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "specdrift",
    version,
    about = "Detect and reconcile drift between API behavior and OpenAPI specs"
)]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Call a live endpoint, diff the response against the spec and reconcile drift.
    Analyze(AnalyzeArgs),

    /// Diff a recorded response body against the spec (offline, no LLM).
    Check(CheckArgs),

    /// List the operations indexed from a spec.
    Endpoints {
        /// OpenAPI spec file or URL (YAML or JSON).
        #[arg(short, long)]
        spec: String,
    },

    /// Run environment checks.
    Doctor {
        /// Optionally verify that this spec parses.
        #[arg(short, long)]
        spec: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// OpenAPI spec file or URL (YAML or JSON).
    #[arg(short, long)]
    pub spec: String,

    /// Base URL of the API under test.
    #[arg(short, long)]
    pub endpoint: String,

    /// Concrete API path to call (e.g. /users/42).
    #[arg(short, long)]
    pub path: String,

    #[arg(short, long, default_value = "GET", value_parser = parse_method)]
    pub method: HttpMethod,

    /// Documented status whose schema the response is checked against.
    #[arg(long, default_value_t = specdrift_core::defaults::EXPECTED_STATUS)]
    pub status: u16,

    /// Bearer token sent as `Authorization`.
    #[arg(short, long)]
    pub auth: Option<String>,

    /// Extra request header, `Name: value`. Repeatable.
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Query parameter, `name=value`. Repeatable.
    #[arg(long = "query", value_name = "NAME=VALUE")]
    pub query: Vec<String>,

    /// JSON file sent as the request body.
    #[arg(long)]
    pub body: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Reconciliation model.
    #[arg(long, env = "SPECDRIFT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key for the reconciliation model.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the generative language API.
    #[arg(long, default_value = DEFAULT_LLM_BASE_URL)]
    pub llm_base_url: String,

    /// Minimum confidence for an UPDATE_SPEC decision to be auto-applied.
    #[arg(long, default_value_t = specdrift_core::defaults::AUTO_UPDATE_CONFIDENCE_THRESHOLD)]
    pub threshold: f64,

    /// Write the patched spec here when an auto-update is recommended.
    #[arg(long)]
    pub write_spec: Option<PathBuf>,

    /// Also write the JSON report to this file.
    #[arg(long)]
    pub report_out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// OpenAPI spec file or URL (YAML or JSON).
    #[arg(short, long)]
    pub spec: String,

    /// Concrete API path the response was recorded from.
    #[arg(short, long)]
    pub path: String,

    #[arg(short, long, default_value = "GET", value_parser = parse_method)]
    pub method: HttpMethod,

    /// Documented status whose schema the response is checked against.
    #[arg(long, default_value_t = specdrift_core::defaults::EXPECTED_STATUS)]
    pub status: u16,

    /// Recorded response body (JSON file).
    #[arg(short, long)]
    pub response: PathBuf,

    /// Status the response was recorded with (defaults to --status).
    #[arg(long)]
    pub response_status: Option<u16>,
}

fn parse_method(s: &str) -> Result<HttpMethod, String> {
    s.parse().map_err(|e: DriftError| e.to_string())
}
