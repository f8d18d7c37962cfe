use super::SystemError;

/// Installs the global subscriber: `RUST_LOG` when set, else `default_filter`,
/// with uptime timestamps and compact output.
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=khetflow_market::clients=debug,info cargo run
/// ```
pub fn setup_tracing(default_filter: &str) -> Result<(), SystemError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .try_init()
        .map_err(|e| SystemError::Tracing(e.to_string()))
}
