//! Signer-backed connection to the chain.
//!
//! Wallet acquisition is behind the [`WalletConnector`] trait so that the
//! client never probes its environment directly and tests can substitute
//! a double. The production [`SignerConnector`] builds an alloy
//! `PrivateKeySigner` from a locally held key and connects a wallet-backed
//! provider to the configured RPC endpoint.
//!
//! Connection is established once, lazily, and never retried on its own;
//! re-connection requires calling the connector again.

use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::info;

use crate::config::ChainConfig;
use crate::error::{Error, Result};

/// A live wallet-backed connection: provider, signer identity, chain id.
#[derive(Clone)]
pub struct Connection {
    provider: DynProvider<Ethereum>,
    signer_address: Address,
    chain_id: u64,
}

impl Connection {
    /// Assemble a connection from its parts.
    #[must_use]
    pub fn new(provider: DynProvider<Ethereum>, signer_address: Address, chain_id: u64) -> Self {
        Self {
            provider,
            signer_address,
            chain_id,
        }
    }

    /// The wallet-backed provider.
    #[must_use]
    pub fn provider(&self) -> &DynProvider<Ethereum> {
        &self.provider
    }

    /// Address of the active signing account.
    #[must_use]
    pub const fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Chain id the provider reported at connection time.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("signer_address", &self.signer_address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

/// Capability to produce a wallet-backed connection.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Detect a signing capability and connect to the chain.
    async fn connect(&self) -> Result<Connection>;
}

/// Connector that signs with a locally held private key.
pub struct SignerConnector {
    config: ChainConfig,
    private_key: String,
}

impl SignerConnector {
    /// Create a connector for `config` signing with `private_key`.
    pub fn new(config: ChainConfig, private_key: impl Into<String>) -> Self {
        Self {
            config,
            private_key: private_key.into(),
        }
    }

    /// Create a connector reading the key from `SANATRACK_PRIVATE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] when the variable is unset: the
    /// host has no signing capability, so nothing downstream can work.
    pub fn from_env(config: ChainConfig) -> Result<Self> {
        let key = std::env::var("SANATRACK_PRIVATE_KEY").map_err(|_| {
            Error::Connection("no signing key found; set SANATRACK_PRIVATE_KEY".to_owned())
        })?;
        Ok(Self::new(config, key))
    }

    fn signer(&self) -> Result<PrivateKeySigner> {
        let key = self
            .private_key
            .strip_prefix("0x")
            .unwrap_or(&self.private_key);
        key.parse()
            .map_err(|e| Error::config(format!("invalid private key: {e}")))
    }
}

impl std::fmt::Debug for SignerConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConnector")
            .field("rpc_url", &self.config.rpc_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletConnector for SignerConnector {
    async fn connect(&self) -> Result<Connection> {
        self.config.validate()?;
        let signer = self.signer()?;
        let signer_address = signer.address();

        let provider: DynProvider<Ethereum> = ProviderBuilder::new()
            .wallet(signer)
            .connect(&self.config.rpc_url)
            .await
            .map_err(|e| {
                Error::Connection(format!(
                    "failed to connect to '{}': {e}",
                    self.config.rpc_url
                ))
            })?
            .erased();

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| Error::Connection(format!("failed to query chain id: {e}")))?;
        if chain_id != self.config.chain_id {
            return Err(Error::Connection(format!(
                "connected to chain {chain_id}, expected {}",
                self.config.chain_id
            )));
        }

        info!(address = %signer_address, chain_id, "wallet connected");
        Ok(Connection::new(provider, signer_address, chain_id))
    }
}
