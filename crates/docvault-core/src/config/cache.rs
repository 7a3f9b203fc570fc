//! Ephemeral cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lifespan used when none is configured.
pub const DEFAULT_LIFESPAN: Duration = Duration::from_secs(15);

/// Token validation cache configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifespan in seconds (`0` means the 15 second default).
    #[serde(default)]
    pub lifespan_seconds: u64,
    /// Interval of the expired-entry sweeper in seconds (`0` disables it).
    #[serde(default)]
    pub sweep_interval_seconds: u64,
}

impl CacheConfig {
    /// Effective entry lifespan.
    pub fn lifespan(&self) -> Duration {
        match self.lifespan_seconds {
            0 => DEFAULT_LIFESPAN,
            secs => Duration::from_secs(secs),
        }
    }

    /// Sweeper interval, if the sweeper is enabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_seconds > 0).then(|| Duration::from_secs(self.sweep_interval_seconds))
    }
}
