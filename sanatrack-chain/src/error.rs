//! Error types for the chain client.
//!
//! Every failure a caller can observe is one of the kinds below. Command
//! flows always surface their failure kind; query flows log per-item
//! failures and report them as absence instead (see [`crate::client`]).
//! Nothing is retried automatically: retry policy belongs to the caller.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error taxonomy of the contract client.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No wallet session is active. Returned by commands issued before
    /// [`connect`](crate::client::TrackerClient::connect) has succeeded.
    #[error("no wallet connection; call connect() first")]
    NotConnected,

    /// The configuration surface is unusable (placeholder contract address,
    /// malformed RPC URL, inconsistent chain id).
    #[error("configuration error: {0}")]
    Config(String),

    /// A required argument was missing or invalid. Raised before any
    /// network call is issued.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Wallet or provider acquisition failed (no signing key, unreachable
    /// node, wrong chain).
    #[error("wallet connection failed: {0}")]
    Connection(String),

    /// The signer or transport rejected the call before inclusion.
    #[error("transaction submission failed: {0}")]
    Submission(String),

    /// The transaction was not included, reverted, or timed out while
    /// awaiting its receipt.
    #[error("transaction confirmation failed: {0}")]
    Confirmation(String),

    /// An on-chain result did not match the expected schema.
    #[error("failed to decode on-chain data: {0}")]
    Decode(String),
}

impl Error {
    /// Create a [`Error::Config`] with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a [`Error::Precondition`] with a message.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create a [`Error::Decode`] with a message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
