//! Configuration settings for code construction.
//!
//! This module defines the options that control how codes are built and
//! analysed: whether the Hartmann-Tzeng refinement runs on top of the BCH
//! bound, and the resource limits for splitting fields and exhaustive
//! weight enumeration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration settings for code construction and analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether to attempt the Hartmann-Tzeng refinement of the BCH bound
    hartmann_tzeng_refinement: bool,
    /// Largest splitting field order a cyclic construction may build
    max_field_order: usize,
    /// Largest number of codewords an exhaustive enumeration may visit
    max_enumeration_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hartmann_tzeng_refinement: true,
            max_field_order: 1 << 20,
            max_enumeration_size: 1 << 22,
        }
    }
}

impl Config {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the Hartmann-Tzeng refinement is attempted.
    pub fn with_hartmann_tzeng_refinement(mut self, enabled: bool) -> Self {
        self.hartmann_tzeng_refinement = enabled;
        self
    }

    /// Sets the largest splitting field order a cyclic construction may build.
    ///
    /// # Arguments
    ///
    /// * `max_field_order` - Upper limit on `q^m` for the splitting field `GF(q^m)`
    pub fn with_max_field_order(mut self, max_field_order: usize) -> Self {
        self.max_field_order = max_field_order;
        self
    }

    /// Sets the largest number of codewords an exhaustive enumeration may visit.
    pub fn with_max_enumeration_size(mut self, max_enumeration_size: u64) -> Self {
        self.max_enumeration_size = max_enumeration_size;
        self
    }

    /// Returns whether the Hartmann-Tzeng refinement is attempted.
    pub fn hartmann_tzeng_refinement(&self) -> bool {
        self.hartmann_tzeng_refinement
    }

    /// Returns the largest splitting field order a cyclic construction may build.
    pub fn max_field_order(&self) -> usize {
        self.max_field_order
    }

    /// Returns the largest number of codewords an exhaustive enumeration may visit.
    pub fn max_enumeration_size(&self) -> u64 {
        self.max_enumeration_size
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, or an error if it's invalid
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_field_order < 2 {
            return Err(crate::Error::InvalidConfiguration(format!(
                "Maximum field order must be at least 2, got {}",
                self.max_field_order
            )));
        }

        if u32::try_from(self.max_field_order).is_err() {
            return Err(crate::Error::InvalidConfiguration(format!(
                "Maximum field order ({}) does not fit field element codes",
                self.max_field_order
            )));
        }

        if self.max_enumeration_size == 0 {
            return Err(crate::Error::InvalidConfiguration(
                "Maximum enumeration size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Parses a configuration from JSON. Missing keys take their default values.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
