//! Sentinel configuration: worker count, check cadence, and the verified
//! computation's operands. Loaded from TOML with defaults matching the
//! classic integer-math demo this pattern descends from.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{LsnError, Result};
use crate::worker::ComputePlan;

/// Operands of the verified computation `((term_a + term_b) * factor) / divisor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComputationConfig {
    /// First addend.
    pub term_a: i64,
    /// Second addend.
    pub term_b: i64,
    /// Multiplier applied to the sum.
    pub factor: i64,
    /// Divisor applied last; must be nonzero.
    pub divisor: i64,
    /// Override for the expected result. When unset, the expected value is
    /// derived from the operands; setting a mismatching value here makes
    /// every worker fault on its first iteration (fault injection).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<i64>,
}

impl Default for ComputationConfig {
    fn default() -> Self {
        Self {
            term_a: 123,
            term_b: 234_567,
            factor: -3,
            divisor: 7,
            expected: None,
        }
    }
}

/// Top-level sentinel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SentinelConfig {
    /// Number of worker threads publishing liveness.
    pub worker_count: usize,
    /// Period of the automatic check trigger, in milliseconds.
    pub check_interval_ms: u64,
    /// Monitor idle-poll interval, in milliseconds.
    pub poll_interval_ms: u64,
    /// The verified computation.
    pub computation: ComputationConfig,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            worker_count: 1,
            check_interval_ms: 2000,
            poll_interval_ms: 50,
            computation: ComputationConfig::default(),
        }
    }
}

impl SentinelConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(LsnError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|err| LsnError::io(path, err))?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the runtime cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(LsnError::InvalidConfig {
                details: "worker_count must be at least 1".to_string(),
            });
        }
        if self.check_interval_ms == 0 {
            return Err(LsnError::InvalidConfig {
                details: "check_interval_ms must be at least 1".to_string(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(LsnError::InvalidConfig {
                details: "poll_interval_ms must be at least 1".to_string(),
            });
        }
        if self.computation.divisor == 0 {
            return Err(LsnError::InvalidConfig {
                details: "computation.divisor must be nonzero".to_string(),
            });
        }
        Ok(())
    }

    /// Period of the automatic check trigger.
    #[must_use]
    pub const fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    /// Monitor idle-poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The computation every worker runs, as an executable plan.
    #[must_use]
    pub const fn compute_plan(&self) -> ComputePlan {
        ComputePlan {
            term_a: self.computation.term_a,
            term_b: self.computation.term_b,
            factor: self.computation.factor,
            divisor: self.computation.divisor,
            expected_override: self.computation.expected,
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| LsnError::Serialization {
            context: "toml",
            details: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::SentinelConfig;
    use crate::core::errors::LsnError;

    #[test]
    fn defaults_match_the_classic_demo() {
        let config = SentinelConfig::default();
        assert_eq!(config.worker_count, 1);
        assert_eq!(config.check_interval_ms, 2000);
        assert_eq!(config.computation.term_a, 123);
        assert_eq!(config.computation.term_b, 234_567);
        assert_eq!(config.computation.factor, -3);
        assert_eq!(config.computation.divisor, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_without_path_uses_defaults() {
        let config = SentinelConfig::load(None).expect("defaults should load");
        assert_eq!(config, SentinelConfig::default());
    }

    #[test]
    fn load_round_trips_through_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "worker_count = 3\ncheck_interval_ms = 250\n\n[computation]\nterm_a = 1\nterm_b = 2\nfactor = 3\ndivisor = 4\n"
        )
        .expect("write config");
        let config = SentinelConfig::load(Some(file.path())).expect("config should parse");
        assert_eq!(config.worker_count, 3);
        assert_eq!(config.check_interval_ms, 250);
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.computation.divisor, 4);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = SentinelConfig::load(Some(std::path::Path::new("/nonexistent/lsn.toml")))
            .expect_err("missing file must fail");
        assert!(matches!(err, LsnError::MissingConfig { .. }));
        assert_eq!(err.code(), "LSN-1002");
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let mut config = SentinelConfig::default();
        config.computation.divisor = 0;
        let err = config.validate().expect_err("zero divisor must fail");
        assert_eq!(err.code(), "LSN-1001");
    }

    #[test]
    fn zero_workers_are_rejected() {
        let config = SentinelConfig {
            worker_count: 0,
            ..SentinelConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
