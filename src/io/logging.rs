//! Global logging setup

use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a `tracing` subscriber writing compact lines to stderr
///
/// `default_filter` applies first; a `RUST_LOG` value is appended so it can
/// override individual targets. Calling this twice keeps the first subscriber.
pub fn init_logging(default_filter: &str) {
    let mut filter = default_filter.to_owned();
    if let Ok(env_filter) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    let format = fmt::format().compact().with_target(false);
    let stderr_log = fmt::layer()
        .event_format(format)
        .with_writer(std::io::stderr);

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(stderr_log)
        .try_init()
        .is_ok();

    if installed {
        tracing::trace!("installed log subscriber");
    }
}
