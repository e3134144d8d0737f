//! Contract client for the SanaTrack child location tracker.
//!
//! SanaTrack stores child registrations and location reports on a smart
//! contract; this crate is the integration layer between the application
//! and that contract. It connects a signer-backed provider, binds the
//! fixed registry ABI, translates between application units (degrees)
//! and the contract's fixed-point encoding, and exposes the write and
//! read flows the app needs.
//!
//! # Architecture
//!
//! ```text
//! TrackerClient (session: connection + bound registry)
//!   ├── connection  → WalletConnector trait, SignerConnector (alloy)
//!   ├── contract    → fixed ChildRegistry ABI, bound handles
//!   ├── codec       → degrees ⇄ micro-degree wire integers, tuple decode
//!   ├── events      → typed event extraction from receipts
//!   ├── commands    → register / update-location write flows
//!   ├── queries     → best-effort batch reads
//!   └── telemetry   → device-data collaborator seam (never fabricated)
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use sanatrack_chain::{ChainConfig, SignerConnector, TrackerClient};
//!
//! let config = ChainConfig::from_env()?;
//! let connector = SignerConnector::from_env(config.clone())?;
//! let client = TrackerClient::new(config, connector);
//! client.connect().await?;
//!
//! let outcome = client.register_child("Asha", 9, "+27 82 000 0000").await?;
//! client
//!     .update_location(outcome.child_id.unwrap_or_default(), -33.918861, 18.4233, "Gardens")
//!     .await?;
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod connection;
pub mod contract;
pub mod error;
pub mod events;
pub mod telemetry;
pub mod types;

pub use client::{RegisterOutcome, TrackerClient, UpdateOutcome};
pub use codec::{decode_coordinate, encode_coordinate};
pub use config::{ChainConfig, NativeCurrency};
pub use connection::{Connection, SignerConnector, WalletConnector};
pub use error::{Error, Result};
pub use events::{RegistryEvent, decode_registry_event, registered_child_id};
pub use telemetry::{NoTelemetry, TelemetryReading, TelemetrySource};
pub use types::{Child, ChildSnapshot, LocationRecord};
