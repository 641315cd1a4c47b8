//! Configuration Module - Collector Tuning Parameters
//!
//! Holds the handful of implementation constants that are not part of the
//! client-visible contract. The collector's public surface (`src/lib.rs`)
//! takes no config files and reads no environment variables; this module
//! exists only for the crate-internal/test constructor `Collector::with_config`.

use crate::error::Result;

/// Internal configuration for a `Collector` instance.
///
/// # Examples
///
/// ```rust
/// use tricolor_gc::CollectorConfig;
///
/// let config = CollectorConfig::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Number of gray objects scanned per `step_mark()` call when the
    /// caller does not override the budget.
    ///
    /// Default: 64
    pub mark_step_budget: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            mark_step_budget: 64,
        }
    }
}

impl CollectorConfig {
    /// Validate configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tricolor_gc::CollectorConfig;
    ///
    /// let config = CollectorConfig {
    ///     mark_step_budget: 0,
    ///     ..Default::default()
    /// };
    ///
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        use crate::error::CollectorError;

        if self.mark_step_budget == 0 {
            return Err(CollectorError::Configuration(
                "mark_step_budget must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CollectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mark_step_budget, 64);
    }

    #[test]
    fn test_invalid_mark_step_budget() {
        let config = CollectorConfig {
            mark_step_budget: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
