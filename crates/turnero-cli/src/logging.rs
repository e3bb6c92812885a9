use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "TURNERO_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs the stderr subscriber. `TURNERO_LOG` takes `RUST_LOG` syntax,
/// e.g. `TURNERO_LOG=turnero_client=debug`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
}
