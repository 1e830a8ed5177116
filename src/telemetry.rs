//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "vector_vault_core=info";

/// Install a formatting subscriber filtered by `RUST_LOG`
///
/// Falls back to `vector_vault_core=info` when `RUST_LOG` is unset or
/// unparsable. Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!("subscriber installed");
    }
}
