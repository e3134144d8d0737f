//! Application-domain records mirrored from the on-chain registry.
//!
//! The contract is the sole source of truth for these; the client only
//! holds transient, decoded copies with no freshness guarantee.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryReading;

/// A registered child, as stored by the registry contract.
///
/// Created exactly once by the register command and never mutated through
/// this client. `id` and `registered_at` are contract-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Contract-assigned identifier, immutable once created.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Free-text emergency contact.
    pub emergency_contact: String,
    /// Wallet address of the registering parent.
    pub primary_parent: Address,
    /// Unix timestamp assigned by the contract at registration.
    pub registered_at: u64,
}

/// A point-in-time position report for a child.
///
/// Coordinates are floating-point degrees here and micro-degree integers
/// on the wire; the codec round-trips them within 1e-6 degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Free-text zone descriptor, e.g. a neighborhood name.
    pub zone: String,
    /// Unix timestamp assigned by the contract.
    pub timestamp: u64,
    /// Whether the report was flagged as an emergency.
    pub is_emergency: bool,
}

/// Everything the application displays for one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSnapshot {
    /// The registered child record.
    pub child: Child,
    /// Latest reported location; `None` until the first report lands
    /// on chain.
    pub location: Option<LocationRecord>,
    /// Device telemetry, unknown unless a telemetry source is plugged in.
    pub telemetry: TelemetryReading,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = ChildSnapshot {
            child: Child {
                id: 1,
                name: "Asha".to_owned(),
                age: 9,
                emergency_contact: "+27 82 000 0000".to_owned(),
                primary_parent: Address::repeat_byte(0x42),
                registered_at: 1_754_000_000,
            },
            location: None,
            telemetry: TelemetryReading::unknown(),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ChildSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
