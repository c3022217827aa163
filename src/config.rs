//! Resolver configuration

use chrono::{Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VitalsError;
use crate::types::Platform;

/// Default hard timeout for native reads
pub const DEFAULT_NATIVE_TIMEOUT_MS: u64 = 5_000;

/// Default nightly sleep window: 18 hours ending at local noon
pub const DEFAULT_NIGHTLY_LOOKBACK_HOURS: u32 = 18;
pub const DEFAULT_NIGHTLY_ANCHOR_HOUR: u32 = 12;

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Settings for a [`crate::resolver::MetricResolver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Platform the caller runs on
    pub platform: Platform,
    /// Hard timeout for each native read
    pub native_timeout_ms: u64,
    /// Offset that defines local calendar days
    pub utc_offset_minutes: i32,
    /// Length of the nightly sleep window
    pub nightly_lookback_hours: u32,
    /// Local hour at which the nightly sleep window ends
    pub nightly_anchor_hour: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            platform: Platform::HealthKit,
            native_timeout_ms: DEFAULT_NATIVE_TIMEOUT_MS,
            utc_offset_minutes: 0,
            nightly_lookback_hours: DEFAULT_NIGHTLY_LOOKBACK_HOURS,
            nightly_anchor_hour: DEFAULT_NIGHTLY_ANCHOR_HOUR,
        }
    }
}

impl ResolverConfig {
    /// Default configuration for a platform
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    pub fn native_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.native_timeout_ms)
    }

    pub fn nightly_lookback(&self) -> Duration {
        Duration::hours(self.nightly_lookback_hours as i64)
    }

    /// Fixed offset for local calendar arithmetic
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Reject settings the resolver cannot honor
    pub fn validate(&self) -> Result<(), VitalsError> {
        if self.native_timeout_ms == 0 {
            return Err(VitalsError::InvalidConfig(
                "native_timeout_ms must be positive".to_string(),
            ));
        }
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(VitalsError::InvalidConfig(format!(
                "utc_offset_minutes {} is outside ±{}",
                self.utc_offset_minutes, MAX_OFFSET_MINUTES
            )));
        }
        if self.nightly_anchor_hour >= 24 {
            return Err(VitalsError::InvalidConfig(format!(
                "nightly_anchor_hour {} is not an hour of the day",
                self.nightly_anchor_hour
            )));
        }
        if self.nightly_lookback_hours == 0 || self.nightly_lookback_hours > 48 {
            return Err(VitalsError::InvalidConfig(format!(
                "nightly_lookback_hours {} must be within 1..=48",
                self.nightly_lookback_hours
            )));
        }
        Ok(())
    }

    /// Load and validate configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, VitalsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, VitalsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.native_timeout(), std::time::Duration::from_secs(5));
        assert_eq!(config.nightly_lookback(), Duration::hours(18));
        assert_eq!(config.nightly_anchor_hour, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            ResolverConfig::from_json(r#"{"platform": "health_connect", "utc_offset_minutes": -300}"#)
                .unwrap();
        assert_eq!(config.platform, Platform::HealthConnect);
        assert_eq!(config.native_timeout_ms, DEFAULT_NATIVE_TIMEOUT_MS);
        assert_eq!(config.offset().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn test_round_trip() {
        let config = ResolverConfig {
            utc_offset_minutes: 120,
            ..ResolverConfig::for_platform(Platform::HealthConnect)
        };
        let loaded = ResolverConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(ResolverConfig::from_json(r#"{"native_timeout_ms": 0}"#).is_err());
        assert!(ResolverConfig::from_json(r#"{"utc_offset_minutes": 900}"#).is_err());
        assert!(ResolverConfig::from_json(r#"{"nightly_anchor_hour": 24}"#).is_err());
        assert!(ResolverConfig::from_json(r#"{"nightly_lookback_hours": 0}"#).is_err());
        assert!(ResolverConfig::from_json("not json").is_err());
    }
}
