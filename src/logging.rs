//! Logging setup for the `rime-switcher` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job. `RUST_LOG` takes precedence over the verbosity flag.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count to a level: warn, info, debug, then trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr subscriber. A second call is a no-op.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(level_for_verbosity(verbosity).as_str().to_lowercase())
    });

    let layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
