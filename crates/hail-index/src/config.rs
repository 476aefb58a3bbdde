//! Configuration for an accumulation session.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Configuration for an accumulation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Expected spacing between scans in seconds.
    ///
    /// The radar product updates on a volume-scan cadence of roughly
    /// five minutes; actual intervals are irregular.
    pub nominal_scan_interval_secs: u64,

    /// How many nominal intervals without a contribution before a cell
    /// is annotated stale in emitted frames.
    pub stale_after_intervals: f64,

    /// Length of the compositing window in seconds when reducing
    /// multi-site scans to one grid per interval.
    pub composite_window_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            nominal_scan_interval_secs: 300,
            stale_after_intervals: 3.0,
            composite_window_secs: 300,
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("HAIL_SCAN_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                config.nominal_scan_interval_secs = secs;
            }
        }

        if let Ok(val) = std::env::var("HAIL_STALE_AFTER_INTERVALS") {
            if let Ok(intervals) = val.parse() {
                config.stale_after_intervals = intervals;
            }
        }

        if let Ok(val) = std::env::var("HAIL_COMPOSITE_WINDOW_SECS") {
            if let Ok(secs) = val.parse() {
                config.composite_window_secs = secs;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.nominal_scan_interval_secs == 0 {
            return Err("nominal_scan_interval_secs must be > 0".to_string());
        }

        if self.stale_after_intervals <= 0.0 || !self.stale_after_intervals.is_finite() {
            return Err("stale_after_intervals must be a positive finite number".to_string());
        }

        if self.composite_window_secs == 0 {
            return Err("composite_window_secs must be > 0".to_string());
        }

        Ok(())
    }

    /// The nominal scan interval as a duration.
    pub fn nominal_interval(&self) -> Duration {
        Duration::seconds(self.nominal_scan_interval_secs as i64)
    }

    /// The compositing window as a duration.
    pub fn composite_window(&self) -> Duration {
        Duration::seconds(self.composite_window_secs as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.nominal_scan_interval_secs, 300);
        assert_eq!(config.stale_after_intervals, 3.0);
        assert_eq!(config.composite_window_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SessionConfig::default();
        config.nominal_scan_interval_secs = 0;
        assert!(config.validate().is_err());

        config = SessionConfig::default();
        config.stale_after_intervals = 0.0;
        assert!(config.validate().is_err());

        config = SessionConfig::default();
        config.stale_after_intervals = f64::NAN;
        assert!(config.validate().is_err());

        config = SessionConfig::default();
        config.composite_window_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_durations() {
        let config = SessionConfig::default();
        assert_eq!(config.nominal_interval(), Duration::minutes(5));
        assert_eq!(config.composite_window(), Duration::minutes(5));
    }
}
