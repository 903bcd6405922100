//! Host-level defaults for primitive instances.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PrimitiveError;

/// Tooltip open delay used when no provider or instance overrides it.
pub const DEFAULT_TOOLTIP_DELAY_MS: u64 = 700;
/// Prefix for generated DOM ids.
pub const DEFAULT_ID_PREFIX: &str = "ui";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Defaults shared by every primitive created under one host.
pub struct PrimitiveDefaults {
    /// Tooltip open delay in milliseconds.
    pub tooltip_delay_ms: u64,
    /// Prefix for generated accessibility ids.
    pub id_prefix: String,
}

impl Default for PrimitiveDefaults {
    fn default() -> Self {
        Self {
            tooltip_delay_ms: DEFAULT_TOOLTIP_DELAY_MS,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl PrimitiveDefaults {
    /// Parses host-supplied JSON; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::Config`] for malformed JSON or an empty id prefix.
    pub fn from_json(raw: &str) -> Result<Self, PrimitiveError> {
        let defaults: Self =
            serde_json::from_str(raw).map_err(|err| PrimitiveError::Config(err.to_string()))?;
        if defaults.id_prefix.trim().is_empty() {
            return Err(PrimitiveError::Config("id_prefix must not be empty".into()));
        }
        Ok(defaults)
    }

    /// Tooltip open delay as a [`Duration`].
    pub fn tooltip_delay(&self) -> Duration {
        Duration::from_millis(self.tooltip_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let defaults = PrimitiveDefaults::from_json(r#"{ "tooltip_delay_ms": 250 }"#).expect("parse");
        assert_eq!(defaults.tooltip_delay(), Duration::from_millis(250));
        assert_eq!(defaults.id_prefix, "ui");
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let error = PrimitiveDefaults::from_json(r#"{ "id_prefix": " " }"#).expect_err("reject");
        assert!(matches!(error, PrimitiveError::Config(message) if message.contains("id_prefix")));
    }

    #[test]
    fn malformed_json_maps_to_config_error() {
        assert!(matches!(
            PrimitiveDefaults::from_json("{"),
            Err(PrimitiveError::Config(_))
        ));
    }
}
