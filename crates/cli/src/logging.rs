use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

pub(crate) const LOG_ENV: &str = "ADVISOR_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directives: `--verbose`, then `ADVISOR_LOG`, then the
/// config file, then `warn`.
pub(crate) fn filter_directives(
    verbose: bool,
    env: Option<String>,
    configured: Option<&str>,
) -> String {
    if verbose {
        return "debug".to_owned();
    }
    env.filter(|s| !s.trim().is_empty())
        .or_else(|| configured.map(str::to_owned))
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

/// Install the stderr fmt subscriber. Safe to call more than once.
pub(crate) fn init_tracing(verbose: bool, configured: Option<&str>) {
    INIT.call_once(|| {
        let directives = filter_directives(verbose, std::env::var(LOG_ENV).ok(), configured);
        let filter =
            EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
