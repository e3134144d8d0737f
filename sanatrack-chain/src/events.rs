//! Typed decoding of registry events from logs and receipts.
//!
//! Event absence is not exceptional: decoders return `Option` and callers
//! decide what absence means. The register command, for instance, still
//! succeeds when a confirmed receipt carries no `ChildRegistered` log.

use alloy::rpc::types::{Log, TransactionReceipt};
use alloy::sol_types::SolEvent;

use crate::codec::narrow_u256;
use crate::contract::ChildRegistry;

/// Application-level view of the registry's emitted events.
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A child was registered.
    ChildRegistered(ChildRegistry::ChildRegistered),
    /// A location report was appended.
    LocationUpdated(ChildRegistry::LocationUpdated),
}

fn decode_event<E: SolEvent>(log: &Log) -> Option<E> {
    E::decode_log(log.as_ref()).ok().map(|decoded| decoded.data)
}

/// Decode a raw log into a registry event, if it is one.
#[must_use]
pub fn decode_registry_event(log: &Log) -> Option<RegistryEvent> {
    decode_event::<ChildRegistry::ChildRegistered>(log)
        .map(RegistryEvent::ChildRegistered)
        .or_else(|| {
            decode_event::<ChildRegistry::LocationUpdated>(log)
                .map(RegistryEvent::LocationUpdated)
        })
}

/// Find the contract-assigned child id in a registration receipt's logs.
#[must_use]
pub fn registered_child_id(receipt: &TransactionReceipt) -> Option<u64> {
    first_registered_id(receipt.inner.logs())
}

pub(crate) fn first_registered_id(logs: &[Log]) -> Option<u64> {
    logs.iter().find_map(|log| {
        let event = decode_event::<ChildRegistry::ChildRegistered>(log)?;
        narrow_u256(event.childId, "child id").ok()
    })
}
