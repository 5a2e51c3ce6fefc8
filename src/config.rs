use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "DermApp";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clinic shown on new appointments and welcome messages.
pub const CLINIC_NAME: &str = "Clínica DermApp";

/// The practice's single clinician.
pub const DOCTOR_NAME: &str = "Dra. Flavia Novis";

/// Sender name used for messages posted by the front desk.
pub const CLINIC_CONTACT: &str = "Clínica";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,dermapp_lib=debug"
}

/// Runtime knobs for the portal.
///
/// Everything here is presentation or demo tuning; none of it changes
/// the aggregation or selection semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Fake latency applied to photo uploads in the photo dialog.
    #[serde(with = "duration_millis")]
    pub upload_latency: Duration,
    /// How many procedure types each monthly summary ranks.
    pub top_types_per_month: usize,
    /// Reveal percent a fresh comparison starts at.
    pub default_reveal_percent: f64,
    /// Bookable times of day, "HH:MM".
    pub booking_slots: Vec<String>,
    /// Seed for the generated procedure fixtures.
    pub fixture_seed: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            upload_latency: Duration::from_millis(1500),
            top_types_per_month: 3,
            default_reveal_percent: 50.0,
            booking_slots: ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fixture_seed: 42,
        }
    }
}

impl PortalConfig {
    /// Parse a config from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_dermapp() {
        assert_eq!(APP_NAME, "DermApp");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_config_values() {
        let config = PortalConfig::default();
        assert_eq!(config.upload_latency, Duration::from_millis(1500));
        assert_eq!(config.top_types_per_month, 3);
        assert_eq!(config.default_reveal_percent, 50.0);
        assert_eq!(config.booking_slots.len(), 6);
        assert_eq!(config.booking_slots[0], "09:00");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PortalConfig::from_json(r#"{"upload_latency": 10, "fixture_seed": 7}"#).unwrap();
        assert_eq!(config.upload_latency, Duration::from_millis(10));
        assert_eq!(config.fixture_seed, 7);
        assert_eq!(config.top_types_per_month, 3);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(PortalConfig::from_json("{not json").is_err());
    }

    #[test]
    fn log_filter_mentions_crate() {
        assert!(default_log_filter().contains("dermapp_lib"));
    }
}
