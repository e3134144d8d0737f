//! Read operations: best-effort batch fetches over the registry views.
//!
//! Queries never fail a whole batch for one bad item. The id listing
//! returns empty instead of erroring; per-child detail and location are
//! fetched independently, a missing location becomes the unknown-location
//! sentinel (`None`), and a child whose detail cannot be fetched is
//! dropped with a log line.

use alloy::primitives::{Address, U256};
use futures::join;
use tracing::{debug, warn};

use super::TrackerClient;
use crate::codec;
use crate::contract::BoundRegistry;
use crate::error::{Error, Result};
use crate::telemetry::TelemetryReading;
use crate::types::{Child, ChildSnapshot, LocationRecord};

impl TrackerClient {
    /// List the ids of all children registered to `parent`.
    ///
    /// Returns an empty list when the parent has none, when the session
    /// is unconnected, or when the view call fails (logged).
    pub async fn children_for_parent(&self, parent: Address) -> Vec<u64> {
        let Ok(registry) = self.registry().await else {
            warn!("children_for_parent called without a connection");
            return Vec::new();
        };
        match registry.getChildrenForParent(parent).call().await {
            Ok(ids) => ids
                .iter()
                .filter_map(|id| codec::narrow_u256(*id, "child id").ok())
                .collect(),
            Err(e) => {
                warn!(%parent, error = %e, "failed to list children");
                Vec::new()
            }
        }
    }

    /// Fetch the display snapshot for one child.
    ///
    /// Detail and latest location are fetched independently; `None` means
    /// the child's detail could not be fetched (logged, never raised).
    pub async fn child_snapshot(&self, child_id: u64) -> Option<ChildSnapshot> {
        let registry = match self.registry().await {
            Ok(registry) => registry,
            Err(_) => {
                warn!(child_id, "snapshot requested without a connection");
                return None;
            }
        };

        let (detail, location) = join!(
            fetch_detail(&registry, child_id),
            fetch_location(&registry, child_id),
        );
        let telemetry = self.telemetry.reading(child_id).await;
        assemble_snapshot(child_id, detail, location, telemetry)
    }

    /// Fetch snapshots for every child of `parent`.
    ///
    /// Partial success is favored over all-or-nothing: children whose
    /// detail fetch fails are skipped, everything else is returned.
    pub async fn snapshots_for_parent(&self, parent: Address) -> Vec<ChildSnapshot> {
        let ids = self.children_for_parent(parent).await;
        let mut snapshots = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(snapshot) = self.child_snapshot(id).await {
                snapshots.push(snapshot);
            }
        }
        snapshots
    }
}

async fn fetch_detail(registry: &BoundRegistry, child_id: u64) -> Result<Child> {
    let raw = registry
        .getChild(U256::from(child_id))
        .call()
        .await
        .map_err(|e| Error::Submission(format!("getChild call failed: {e}")))?;
    codec::decode_child(raw)
}

async fn fetch_location(registry: &BoundRegistry, child_id: u64) -> Result<LocationRecord> {
    let raw = registry
        .getLatestLocation(U256::from(child_id))
        .call()
        .await
        .map_err(|e| Error::Submission(format!("getLatestLocation call failed: {e}")))?;
    codec::decode_location(raw)
}

/// Combine the two independent per-child fetches into a snapshot.
///
/// A failed location is tolerated and becomes the unknown-location
/// sentinel; a failed detail drops the child.
fn assemble_snapshot(
    child_id: u64,
    detail: Result<Child>,
    location: Result<LocationRecord>,
    telemetry: TelemetryReading,
) -> Option<ChildSnapshot> {
    let child = match detail {
        Ok(child) => child,
        Err(e) => {
            warn!(child_id, error = %e, "failed to fetch child detail; dropping from batch");
            return None;
        }
    };
    let location = match location {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(child_id, error = %e, "no location recorded yet");
            None
        }
    };
    Some(ChildSnapshot {
        child,
        location,
        telemetry,
    })
}
