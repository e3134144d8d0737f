//! The contract interaction client.
//!
//! One [`TrackerClient`] holds one session: a wallet connection, the bound
//! registry handle, the last human-readable error, and a busy counter.
//! Commands submit transactions and surface every failure
//! kind; queries are best-effort batch reads that favor
//! partial success.
//!
//! ```text
//! TrackerClient
//!   ├── connect()               → wallet + registry binding
//!   ├── register_child(..)      → RegisterOutcome { child_id, tx_hash }
//!   ├── update_location(..)     → UpdateOutcome { tx_hash }
//!   ├── children_for_parent(..) → Vec<u64>
//!   └── snapshots_for_parent(..)→ Vec<ChildSnapshot>
//! ```

mod commands;
mod queries;

pub use commands::{RegisterOutcome, UpdateOutcome};

use std::sync::atomic::{AtomicUsize, Ordering};

use alloy::primitives::Address;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::ChainConfig;
use crate::connection::{Connection, WalletConnector};
use crate::contract::{self, BoundRegistry};
use crate::error::{Error, Result};
use crate::telemetry::{NoTelemetry, TelemetrySource};

/// Live per-session state: the connection and the bound registry.
struct Session {
    connection: Connection,
    registry: BoundRegistry,
}

/// Client for the on-chain child registry.
///
/// Construction is cheap and offline; nothing talks to the network until
/// [`connect`](Self::connect). Commands and queries may run concurrently;
/// the binding itself is never mutated after connection, and ordering
/// between concurrent submissions is up to the ledger.
pub struct TrackerClient {
    config: ChainConfig,
    connector: Box<dyn WalletConnector>,
    telemetry: Box<dyn TelemetrySource>,
    session: RwLock<Option<Session>>,
    last_error: RwLock<Option<String>>,
    in_flight: AtomicUsize,
}

impl TrackerClient {
    /// Create a client with no telemetry integration.
    pub fn new(config: ChainConfig, connector: impl WalletConnector + 'static) -> Self {
        Self::with_telemetry(config, connector, NoTelemetry)
    }

    /// Create a client with a device telemetry source.
    pub fn with_telemetry(
        config: ChainConfig,
        connector: impl WalletConnector + 'static,
        telemetry: impl TelemetrySource + 'static,
    ) -> Self {
        Self {
            config,
            connector: Box::new(connector),
            telemetry: Box::new(telemetry),
            session: RwLock::new(None),
            last_error: RwLock::new(None),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Establish the wallet connection and bind the registry.
    ///
    /// Idempotent once connected. A failure leaves the session
    /// unconnected with [`last_error`](Self::last_error) set; it is not
    /// retried automatically; call again to retry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unusable configuration and
    /// [`Error::Connection`] when wallet or provider acquisition fails.
    pub async fn connect(&self) -> Result<()> {
        let mut session = self.session.write().await;
        if session.is_some() {
            return Ok(());
        }
        match self.establish().await {
            Ok(established) => {
                *session = Some(established);
                *self.last_error.write().await = None;
                Ok(())
            }
            Err(e) => {
                *self.last_error.write().await = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn establish(&self) -> Result<Session> {
        let contract_address = self.config.validate()?;
        let connection = self.connector.connect().await?;
        let registry = contract::bind(contract_address, connection.provider().clone())?;
        info!(
            contract = %contract_address,
            signer = %connection.signer_address(),
            "registry bound"
        );
        Ok(Session {
            connection,
            registry,
        })
    }

    /// Whether a session is currently active.
    pub async fn is_connected(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Address of the active signing account, if connected.
    pub async fn signer_address(&self) -> Option<Address> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.connection.signer_address())
    }

    /// Human-readable description of the most recent failure, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Whether any command is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Relaxed) > 0
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Cloned registry handle, or [`Error::NotConnected`].
    async fn registry(&self) -> Result<BoundRegistry> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.registry.clone())
            .ok_or(Error::NotConnected)
    }

    fn begin_flight(&self) -> FlightGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        FlightGuard(&self.in_flight)
    }

    async fn record_failure(&self, error: &Error) {
        *self.last_error.write().await = Some(error.to_string());
    }
}

impl std::fmt::Debug for TrackerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerClient")
            .field("contract_address", &self.config.contract_address)
            .field("chain_id", &self.config.chain_id)
            .finish_non_exhaustive()
    }
}

struct FlightGuard<'a>(&'a AtomicUsize);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::connection::{Connection, WalletConnector};
    use crate::error::{Error, Result};

    /// Connector double for hosts without a wallet.
    pub struct NoWalletConnector;

    #[async_trait]
    impl WalletConnector for NoWalletConnector {
        async fn connect(&self) -> Result<Connection> {
            Err(Error::Connection("no wallet detected".to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::NoWalletConnector;
    use super::*;

    fn deployed_config() -> ChainConfig {
        ChainConfig::default()
            .with_contract_address("0x5FbDB2315678afecb367f032d93F642f64180aa3")
    }

    #[tokio::test]
    async fn failed_connection_leaves_session_unconnected() {
        let client = TrackerClient::new(deployed_config(), NoWalletConnector);
        let err = client.connect().await.unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
        assert!(!client.is_connected().await);
        assert!(client.signer_address().await.is_none());
        let last = client.last_error().await.unwrap();
        assert!(last.contains("no wallet detected"));
    }

    #[tokio::test]
    async fn placeholder_address_is_a_config_error() {
        let client = TrackerClient::new(ChainConfig::default(), NoWalletConnector);
        let err = client.connect().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(client.last_error().await.is_some());
    }

    #[tokio::test]
    async fn fresh_client_is_idle_and_unconnected() {
        let client = TrackerClient::new(deployed_config(), NoWalletConnector);
        assert!(!client.is_connected().await);
        assert!(!client.is_busy());
        assert!(client.last_error().await.is_none());
    }
}
