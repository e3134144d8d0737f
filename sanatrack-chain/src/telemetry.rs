//! Device telemetry collaborator.
//!
//! Online state, battery level, and last-seen time do not live on the
//! contract; they come from tracker hardware. The client never fabricates
//! them: deployments plug a real [`TelemetrySource`] in, and everything
//! else gets [`TelemetryReading::unknown`] from the [`NoTelemetry`]
//! default.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A point-in-time device reading for one child. `None` means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TelemetryReading {
    /// Whether the tracker device is currently reachable.
    pub online: Option<bool>,
    /// Battery charge, 0–100.
    pub battery_percent: Option<u8>,
    /// Unix timestamp of the last device report.
    pub last_seen: Option<u64>,
}

impl TelemetryReading {
    /// The all-unknown reading.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            online: None,
            battery_percent: None,
            last_seen: None,
        }
    }
}

/// Source of device telemetry, keyed by child id.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch the latest reading for a child.
    async fn reading(&self, child_id: u64) -> TelemetryReading;
}

/// Telemetry source for deployments without device integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTelemetry;

#[async_trait]
impl TelemetrySource for NoTelemetry {
    async fn reading(&self, _child_id: u64) -> TelemetryReading {
        TelemetryReading::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_telemetry_reports_unknown() {
        let reading = NoTelemetry.reading(7).await;
        assert_eq!(reading, TelemetryReading::unknown());
        assert!(reading.online.is_none());
        assert!(reading.battery_percent.is_none());
        assert!(reading.last_seen.is_none());
    }
}
