pub mod config;
pub mod locale;
pub mod models;
pub mod store; // Explicit clinic state
pub mod fixtures;
pub mod capabilities; // Role → capability resolution
pub mod timeline; // Monthly key indicators
pub mod comparison; // Before/after slider
pub mod dashboard;
pub mod calendar;
pub mod follow_up; // "Resultados Tardios" reminders
pub mod photos;
pub mod portal; // Composition root

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use capabilities::Role;
use config::PortalConfig;
use portal::{Portal, PortalError};

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// built-in filter. Later calls are no-ops.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}

/// Tracing plus a portal over the mock clinic for `today`.
pub fn bootstrap(config: PortalConfig, role: Role, today: NaiveDate) -> Result<Portal, PortalError> {
    init_tracing();
    Portal::with_fixtures(config, role, today)
}
