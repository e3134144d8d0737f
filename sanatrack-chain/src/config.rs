//! Chain and contract configuration surface.
//!
//! All values here are externally supplied: the deployed registry address,
//! the RPC endpoint, and the chain identity. [`ChainConfig::from_env`]
//! reads the `SANATRACK_*` environment variables and falls back to the
//! BlockDAG testnet defaults the tracker ships with. A config that still
//! carries the deployment placeholder address is rejected by
//! [`ChainConfig::validate`] before any call is attempted.

use std::time::Duration;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Address value that ships in config templates before deployment.
const PLACEHOLDER_ADDRESS: &str = "0xYOUR_DEPLOYED_CONTRACT_ADDRESS_HERE";

/// The chain's native token, for display and fee accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Token name, e.g. "BDAG".
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Number of decimals in the smallest unit.
    pub decimals: u8,
}

/// Configuration for one registry deployment on one chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Deployed `ChildRegistry` contract address, hex-encoded.
    pub contract_address: String,
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Numeric chain identifier.
    pub chain_id: u64,
    /// Hex representation of the chain identifier, as wallets expect it.
    pub chain_id_hex: String,
    /// Human-readable network name.
    pub chain_name: String,
    /// Native token of the network.
    pub native_currency: NativeCurrency,
    /// Confirmations to wait for before a transaction counts as final.
    pub tx_confirmations: u64,
    /// Ceiling on how long to await a transaction receipt.
    pub tx_receipt_timeout: Duration,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            contract_address: PLACEHOLDER_ADDRESS.to_owned(),
            rpc_url: "https://testnet-rpc.blockdag.network".to_owned(),
            chain_id: 12345,
            chain_id_hex: "0x3039".to_owned(),
            chain_name: "BlockDAG Testnet".to_owned(),
            native_currency: NativeCurrency {
                name: "BDAG".to_owned(),
                symbol: "BDAG".to_owned(),
                decimals: 18,
            },
            tx_confirmations: 1,
            tx_receipt_timeout: Duration::from_secs(90),
        }
    }
}

impl ChainConfig {
    /// Build a config from `SANATRACK_*` environment variables, falling
    /// back to the defaults for anything unset.
    ///
    /// Recognized variables: `SANATRACK_CONTRACT_ADDRESS`,
    /// `SANATRACK_RPC_URL`, `SANATRACK_CHAIN_ID`, `SANATRACK_CHAIN_ID_HEX`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `SANATRACK_CHAIN_ID` is set but not a
    /// decimal integer.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(address) = std::env::var("SANATRACK_CONTRACT_ADDRESS") {
            config.contract_address = address;
        }
        if let Ok(url) = std::env::var("SANATRACK_RPC_URL") {
            config.rpc_url = url;
        }
        if let Ok(id) = std::env::var("SANATRACK_CHAIN_ID") {
            config.chain_id = id
                .parse()
                .map_err(|_| Error::config(format!("SANATRACK_CHAIN_ID '{id}' is not a number")))?;
            config.chain_id_hex = format!("{:#x}", config.chain_id);
        }
        if let Ok(hex) = std::env::var("SANATRACK_CHAIN_ID_HEX") {
            config.chain_id_hex = hex;
        }
        Ok(config)
    }

    /// Set the contract address.
    #[must_use]
    pub fn with_contract_address(mut self, address: impl Into<String>) -> Self {
        self.contract_address = address.into();
        self
    }

    /// Set the RPC endpoint URL.
    #[must_use]
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    /// Check the configuration and return the parsed contract address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the address is unset, still the
    /// deployment placeholder, or the zero address; when the RPC URL does
    /// not parse as http(s); or when `chain_id_hex` disagrees with
    /// `chain_id`.
    pub fn validate(&self) -> Result<Address> {
        let url = Url::parse(&self.rpc_url)
            .map_err(|e| Error::config(format!("invalid RPC URL '{}': {e}", self.rpc_url)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::config(format!(
                "unsupported RPC URL scheme '{}'",
                url.scheme()
            )));
        }

        let hex = self.chain_id_hex.trim_start_matches("0x");
        let hex_id = u64::from_str_radix(hex, 16).map_err(|_| {
            Error::config(format!("chain_id_hex '{}' is not hex", self.chain_id_hex))
        })?;
        if hex_id != self.chain_id {
            return Err(Error::config(format!(
                "chain_id_hex {} does not match chain_id {}",
                self.chain_id_hex, self.chain_id
            )));
        }

        if self.contract_address.is_empty() || self.contract_address == PLACEHOLDER_ADDRESS {
            return Err(Error::config(
                "contract address is not set; deploy the registry and configure its address",
            ));
        }
        let address = self
            .contract_address
            .parse::<Address>()
            .map_err(|e| Error::config(format!("invalid contract address: {e}")))?;
        if address == Address::ZERO {
            return Err(Error::config("contract address is the zero address"));
        }
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYED: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[test]
    fn default_config_rejects_placeholder_address() {
        let err = ChainConfig::default().validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn deployed_address_validates() {
        let config = ChainConfig::default().with_contract_address(DEPLOYED);
        let address = config.validate().unwrap();
        assert_eq!(format!("{address:#x}"), DEPLOYED.to_lowercase());
    }

    #[test]
    fn zero_address_is_a_config_error() {
        let config = ChainConfig::default()
            .with_contract_address("0x0000000000000000000000000000000000000000");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn default_chain_id_hex_matches_numeric_id() {
        let config = ChainConfig::default().with_contract_address(DEPLOYED);
        assert_eq!(config.chain_id, 12345);
        assert_eq!(config.chain_id_hex, "0x3039");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mismatched_chain_id_hex_is_rejected() {
        let mut config = ChainConfig::default().with_contract_address(DEPLOYED);
        config.chain_id_hex = "0x1".to_owned();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn non_http_rpc_url_is_rejected() {
        let config = ChainConfig::default()
            .with_contract_address(DEPLOYED)
            .with_rpc_url("ftp://example.com");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
