use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose {
        "debug,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"
    } else {
        "info,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(verbose)
        .try_init();
}
