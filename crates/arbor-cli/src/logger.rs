//! `tracing` subscriber for the arbor binary.
//!
//! `--verbose` and `--quiet` pick a fixed filter over the arbor crates;
//! without either flag `RUST_LOG` is honoured, then [`DEFAULT_FILTER`].
//!
//! ```rust,no_run
//! use arbor_cli::logger::init_logger;
//!
//! init_logger(false, false, true);
//! tracing::debug!(path = "routes/index.tsx", "classified route file");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const VERBOSE_FILTER: &str = "arbor=debug,arbor_cli=debug,arbor_routes=debug";

pub const QUIET_FILTER: &str = "arbor=error,arbor_cli=error,arbor_routes=error";

pub const DEFAULT_FILTER: &str = "arbor=info,arbor_cli=info,arbor_routes=info";

/// Install the global subscriber. `color` comes from [`crate::ui::init`].
pub fn init_logger(verbose: bool, quiet: bool, color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(color)
        .compact();

    // A second initialisation (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(select_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_wins_over_quiet() {
        assert!(select_filter(true, true).to_string().contains("debug"));
    }

    #[test]
    fn test_quiet_reports_errors_only() {
        let filter = select_filter(false, true).to_string();
        assert!(filter.contains("arbor_routes=error"));
        assert!(!filter.contains("info"));
    }

    #[test]
    fn test_repeated_init_does_not_panic() {
        init_logger(false, true, false);
        init_logger(true, false, false);
    }
}
