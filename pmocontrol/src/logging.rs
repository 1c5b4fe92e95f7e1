//! Initialisation du logging (`tracing-subscriber`)

use pmoconfig::Config;
use tracing_subscriber::EnvFilter;

/// Installe un subscriber `fmt` global
///
/// Le filtre vient de `RUST_LOG` s'il est défini, sinon de
/// `host.logger.min_level`. Retourne `false` si un subscriber était déjà
/// installé.
pub fn init_logging(config: &Config) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config
            .get_log_min_level()
            .unwrap_or_else(|_| "INFO".to_string());
        EnvFilter::try_new(level.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .try_init()
        .is_ok()
}
