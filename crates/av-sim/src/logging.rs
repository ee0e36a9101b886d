//! Tracing subscriber setup for hosts and demos.

use std::io;

use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, Layer};

/// Install a thread-local stdout subscriber at INFO level.
///
/// Keep the returned guard alive for as long as logging should stay
/// installed; dropping it restores the previous subscriber.
pub fn init_stdout_logging() -> DefaultGuard {
    let collector = tracing_subscriber::registry().with(
        fmt::Layer::new()
            .with_writer(io::stdout)
            .with_filter(LevelFilter::INFO),
    );
    tracing::subscriber::set_default(collector)
}
