// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset, chosen by the number of `-v` flags.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "md_section_tree=info",
        1 => "md_section_tree=debug",
        _ => "md_section_tree=trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `-v`.
/// Logs go to stderr; repeated calls are no-ops.
pub fn setup_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging setup complete (verbosity {}).", verbosity);
    }
}
