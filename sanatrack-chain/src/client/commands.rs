//! Write operations: submit, await confirmation, parse emitted events.
//!
//! Each command validates its preconditions before any network call, then
//! moves through submission, confirmation, and receipt parsing. Exactly
//! one on-chain mutation happens per success and zero on any failure;
//! atomicity comes from the ledger, not from this client. Concurrent
//! commands are independent; nothing here queues or serializes them.

use alloy::primitives::{I256, U256};
use alloy::providers::PendingTransactionBuilder;
use alloy::rpc::types::TransactionReceipt;
use tracing::{info, warn};

use super::TrackerClient;
use crate::codec;
use crate::error::{Error, Result};
use crate::events;

/// Result of a successful child registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    /// Contract-assigned id, when the `ChildRegistered` event was present
    /// in the receipt. The write succeeded even when this is `None`.
    pub child_id: Option<u64>,
    /// Hash of the confirmed transaction.
    pub tx_hash: String,
}

/// Result of a successful location update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Hash of the confirmed transaction.
    pub tx_hash: String,
}

impl TrackerClient {
    /// Register a child on the registry.
    ///
    /// # Errors
    ///
    /// [`Error::Precondition`] for an empty name, [`Error::NotConnected`]
    /// before a session exists, [`Error::Submission`] when the signer or
    /// transport rejects the call, [`Error::Confirmation`] when the
    /// transaction reverts or times out.
    pub async fn register_child(
        &self,
        name: &str,
        age: u32,
        emergency_contact: &str,
    ) -> Result<RegisterOutcome> {
        let result = self.do_register(name, age, emergency_contact).await;
        if let Err(e) = &result {
            self.record_failure(e).await;
        }
        result
    }

    async fn do_register(
        &self,
        name: &str,
        age: u32,
        emergency_contact: &str,
    ) -> Result<RegisterOutcome> {
        if name.trim().is_empty() {
            return Err(Error::precondition("child name must not be empty"));
        }
        let registry = self.registry().await?;
        let _flight = self.begin_flight();

        info!(name, age, "registering child");
        let pending = registry
            .registerChild(name.to_owned(), U256::from(age), emergency_contact.to_owned())
            .send()
            .await
            .map_err(|e| Error::Submission(format!("registerChild rejected: {e}")))?;

        let receipt = self.await_receipt(pending).await?;

        let child_id = events::registered_child_id(&receipt);
        if child_id.is_none() {
            warn!(
                tx = %receipt.transaction_hash,
                "registration confirmed but no ChildRegistered event in receipt"
            );
        }
        let outcome = RegisterOutcome {
            child_id,
            tx_hash: format!("{:#x}", receipt.transaction_hash),
        };
        info!(child_id = ?outcome.child_id, tx = %outcome.tx_hash, "child registered");
        Ok(outcome)
    }

    /// Report a new location for a registered child.
    ///
    /// Coordinates are degrees; they are encoded to wire micro-degrees
    /// with deterministic rounding before submission.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`register_child`](Self::register_child), with
    /// [`Error::Precondition`] for coordinates outside geographic range.
    pub async fn update_location(
        &self,
        child_id: u64,
        latitude: f64,
        longitude: f64,
        zone: &str,
    ) -> Result<UpdateOutcome> {
        let result = self.do_update(child_id, latitude, longitude, zone).await;
        if let Err(e) = &result {
            self.record_failure(e).await;
        }
        result
    }

    async fn do_update(
        &self,
        child_id: u64,
        latitude: f64,
        longitude: f64,
        zone: &str,
    ) -> Result<UpdateOutcome> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::precondition(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::precondition(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        let registry = self.registry().await?;
        let _flight = self.begin_flight();

        let lat = codec::encode_coordinate(latitude)?;
        let lng = codec::encode_coordinate(longitude)?;
        info!(child_id, lat, lng, zone, "updating location");

        let pending = registry
            .updateLocation(
                U256::from(child_id),
                I256::try_from(lat)
                    .map_err(|e| Error::precondition(format!("latitude not encodable: {e}")))?,
                I256::try_from(lng)
                    .map_err(|e| Error::precondition(format!("longitude not encodable: {e}")))?,
                zone.to_owned(),
            )
            .send()
            .await
            .map_err(|e| Error::Submission(format!("updateLocation rejected: {e}")))?;

        let receipt = self.await_receipt(pending).await?;
        let outcome = UpdateOutcome {
            tx_hash: format!("{:#x}", receipt.transaction_hash),
        };
        info!(child_id, tx = %outcome.tx_hash, "location updated");
        Ok(outcome)
    }

    /// Await inclusion with the configured confirmations and timeout.
    async fn await_receipt(
        &self,
        pending: PendingTransactionBuilder<alloy::network::Ethereum>,
    ) -> Result<TransactionReceipt> {
        let receipt = pending
            .with_required_confirmations(self.config.tx_confirmations)
            .with_timeout(Some(self.config.tx_receipt_timeout))
            .get_receipt()
            .await
            .map_err(|e| Error::Confirmation(format!("failed to retrieve receipt: {e}")))?;

        if !receipt.status() {
            return Err(Error::Confirmation(format!(
                "transaction {:#x} reverted",
                receipt.transaction_hash
            )));
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::NoWalletConnector;
    use super::*;
    use crate::config::ChainConfig;

    fn unconnected_client() -> TrackerClient {
        TrackerClient::new(
            ChainConfig::default()
                .with_contract_address("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            NoWalletConnector,
        )
    }

    #[tokio::test]
    async fn register_before_connect_rejects_without_network() {
        let client = unconnected_client();
        let err = client
            .register_child("Asha", 9, "+27 82 000 0000")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotConnected));
    }

    #[tokio::test]
    async fn update_before_connect_rejects_without_network() {
        let client = unconnected_client();
        let err = client
            .update_location(1, -33.918861, 18.4233, "Gardens")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotConnected));
    }

    #[tokio::test]
    async fn empty_name_is_a_precondition_failure() {
        let client = unconnected_client();
        let err = client.register_child("   ", 9, "").await.unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_precondition_failures() {
        let client = unconnected_client();
        let err = client
            .update_location(1, 91.0, 18.4233, "nowhere")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));

        let err = client
            .update_location(1, -33.9, 181.0, "nowhere")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[tokio::test]
    async fn command_failures_are_recorded_on_the_session() {
        let client = unconnected_client();
        let _ = client.register_child("Asha", 9, "").await;
        let last = client.last_error().await.unwrap();
        assert!(last.contains("no wallet connection"));
    }
}
