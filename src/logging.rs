use tracing::{Level, Metadata};
use tracing_subscriber::{
    filter, fmt::format::FmtSpan, prelude::*, util::TryInitError,
};

const CRATE_MODULE: &str = "closure_inspector";

/// Installs a compact stderr logger showing this crate's events up to
/// `level`. Other crates only get their errors shown.
///
/// Fails if a global subscriber is already set.
pub fn init_logger(level: Level) -> Result<(), TryInitError> {
    let console_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter::filter_fn(move |metadata| {
            metadata.level() <= &Level::ERROR || (is_own(metadata) && metadata.level() <= &level)
        }));
    tracing_subscriber::registry().with(console_log).try_init()
}

fn is_own(metadata: &Metadata) -> bool {
    metadata
        .module_path()
        .unwrap_or_default()
        .starts_with(CRATE_MODULE)
}
