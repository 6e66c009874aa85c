//! Debug logging to stderr. Stdout is left to command output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Filter used when neither `RUST_LOG` nor debug mode asks for more.
const DEFAULT_FILTER: &str = "warn";

/// Filter used in debug mode.
const DEBUG_FILTER: &str = "warn,mdnav=debug";

/// Install the global subscriber. `RUST_LOG` wins over `debug` when set.
/// Calling this twice is harmless; the second call is ignored.
pub fn init(debug: bool) {
    let fallback = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
