//! Logging and tracing bootstrap for the catalog service.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use catalog_kernel::settings::{LogFormat, TelemetrySettings};

/// Initialize the global tracing subscriber.
///
/// A `RUST_LOG` value wins over the configured filter; one that fails to
/// parse is an error.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let env_spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = resolve_filter(env_spec.as_deref(), &settings.log_filter)?;

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|err| anyhow!("failed to install tracing subscriber: {}", err))?;

    tracing::debug!(format = ?settings.log_format, "telemetry initialized");
    Ok(())
}

fn resolve_filter(env_spec: Option<&str>, configured: &str) -> anyhow::Result<EnvFilter> {
    match env_spec {
        Some(spec) => {
            EnvFilter::try_new(spec).map_err(|err| anyhow!("invalid RUST_LOG '{}': {}", spec, err))
        }
        None => EnvFilter::try_new(configured)
            .map_err(|err| anyhow!("invalid log filter '{}': {}", configured, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_installs_exactly_once() {
        let settings = TelemetrySettings::default();
        assert!(init(&settings).is_ok());
        assert!(init(&settings).is_err());
    }

    #[test]
    fn valid_rust_log_wins_over_the_configured_filter() {
        // The configured filter here cannot parse, so success proves the
        // environment value was the one consulted.
        assert!(resolve_filter(Some("debug"), "app=notalevel").is_ok());
    }

    #[test]
    fn unparseable_rust_log_is_an_error() {
        let err = resolve_filter(Some("app=notalevel"), "info").unwrap_err();
        assert!(err.to_string().contains("RUST_LOG"));
    }

    #[test]
    fn absent_rust_log_falls_back_to_the_configured_filter() {
        assert!(resolve_filter(None, "info").is_ok());
        assert!(resolve_filter(None, "app=notalevel").is_err());
    }
}
