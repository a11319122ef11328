use crate::sanitize::sanitize_message;
use serde::{Deserialize, Serialize};
use solana_client::client_error::ClientError;
use solana_sdk::signature::SignerError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub enum SolsendError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Wallet returned no authorized accounts")]
    AuthorizationDenied,

    #[error("Wallet returned no signed transaction")]
    NoSignatureReturned,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Failed to submit transaction after {attempts} attempts: {last_error}")]
    SubmissionFailed { attempts: u8, last_error: String },

    #[error("Transaction {signature} failed on chain: {error}")]
    TransactionRejected { signature: String, error: String },

    #[error("Transaction {signature} was not confirmed before its blockhash expired: {reason}")]
    ConfirmationTimeout { signature: String, reason: String },

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Another {0} operation is already in progress")]
    Busy(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl SolsendError {
    /// Transport-level failures that a submission attempt may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SolsendError::RpcError(_) | SolsendError::SubmissionFailed { .. })
    }

    /// True when the transaction may or may not have landed.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, SolsendError::ConfirmationTimeout { .. })
    }
}

impl From<ClientError> for SolsendError {
    fn from(e: ClientError) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            SolsendError::RpcError(e.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            SolsendError::RpcError(sanitize_message(&e.to_string()))
        }
    }
}

impl From<SignerError> for SolsendError {
    fn from(_e: SignerError) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            SolsendError::SigningFailed(_e.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            SolsendError::SigningFailed(sanitize_message(&_e.to_string()))
        }
    }
}

impl From<bincode::Error> for SolsendError {
    fn from(_e: bincode::Error) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            SolsendError::SerializationError(_e.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            SolsendError::SerializationError(sanitize_message(&_e.to_string()))
        }
    }
}

impl From<base64::DecodeError> for SolsendError {
    fn from(_e: base64::DecodeError) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            SolsendError::SerializationError(_e.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            SolsendError::SerializationError(sanitize_message(&_e.to_string()))
        }
    }
}

impl From<std::io::Error> for SolsendError {
    fn from(_e: std::io::Error) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            SolsendError::InternalError(_e.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            SolsendError::InternalError(sanitize_message(&_e.to_string()))
        }
    }
}

impl From<serde_json::Error> for SolsendError {
    fn from(_e: serde_json::Error) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            SolsendError::SerializationError(_e.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            SolsendError::SerializationError(sanitize_message(&_e.to_string()))
        }
    }
}

// Anything the wallet transport raises is a signer-session failure.
impl From<jsonrpsee::core::Error> for SolsendError {
    fn from(_e: jsonrpsee::core::Error) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            SolsendError::SigningFailed(_e.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            SolsendError::SigningFailed(sanitize_message(&_e.to_string()))
        }
    }
}
