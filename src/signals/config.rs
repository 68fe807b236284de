use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of the pivot-based divergence predicates.
///
/// Defaults follow the usual charting defaults: 5 bars either side of a pivot
/// and a previous pivot between 5 and 60 bars older.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DivergenceConfig {
    /// Older bars a pivot must dominate
    pub pivot_left: usize,

    /// Newer bars a pivot must dominate (confirmation delay)
    pub pivot_right: usize,

    /// Minimum distance, in bars, between the two compared pivots
    pub range_min: usize,

    /// Maximum distance, in bars, between the two compared pivots
    pub range_max: usize,
}

impl Default for DivergenceConfig {
    fn default() -> Self {
        Self {
            pivot_left: 5,
            pivot_right: 5,
            range_min: 5,
            range_max: 60,
        }
    }
}

impl DivergenceConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.pivot_left == 0 {
            anyhow::bail!("pivot_left must be greater than 0");
        }

        if self.pivot_right == 0 {
            anyhow::bail!("pivot_right must be greater than 0");
        }

        if self.range_min == 0 {
            anyhow::bail!("range_min must be greater than 0");
        }

        if self.range_min > self.range_max {
            anyhow::bail!(
                "range_min ({}) must not exceed range_max ({})",
                self.range_min,
                self.range_max
            );
        }

        Ok(())
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read divergence config {}", path.display()))?;
        let config: DivergenceConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid divergence config {}", path.display()))?;
        config.validate()?;
        debug!("loaded divergence config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Bars of history needed to evaluate a divergence on the present bar.
    pub fn min_history(&self) -> usize {
        self.pivot_right.saturating_add(self.pivot_left).saturating_add(1)
    }
}
