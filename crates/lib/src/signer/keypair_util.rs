use crate::{error::SolsendError, sanitize_error};
use solana_sdk::signature::Keypair;
use std::{fs, path::Path};

const KEYPAIR_BYTES: usize = 64;

/// Loads local keypairs from the formats the Solana tooling writes.
pub struct KeypairUtil;

impl KeypairUtil {
    /// Accepts, in order of precedence:
    /// - a path to a JSON keypair file (`[12, 34, ...]`)
    /// - inline `[u8]` array text
    /// - a base58 encoded 64-byte secret key
    pub fn from_private_key_string(private_key: &str) -> Result<Keypair, SolsendError> {
        let private_key = private_key.trim();

        if Path::new(private_key).is_file() {
            let contents = fs::read_to_string(private_key).map_err(|e| {
                SolsendError::ConfigError(format!(
                    "Failed to read keypair file: {}",
                    sanitize_error!(e)
                ))
            })?;
            return Self::from_u8_array_string(&contents);
        }

        if private_key.starts_with('[') {
            return Self::from_u8_array_string(private_key);
        }

        Self::from_base58(private_key)
    }

    pub fn from_base58(private_key: &str) -> Result<Keypair, SolsendError> {
        let decoded = bs58::decode(private_key).into_vec().map_err(|e| {
            SolsendError::ConfigError(format!("Invalid base58 keypair: {}", sanitize_error!(e)))
        })?;

        Self::from_bytes(&decoded)
    }

    pub fn from_u8_array_string(array_str: &str) -> Result<Keypair, SolsendError> {
        let bytes: Vec<u8> = serde_json::from_str(array_str.trim()).map_err(|e| {
            SolsendError::ConfigError(format!("Invalid keypair array: {}", sanitize_error!(e)))
        })?;

        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Keypair, SolsendError> {
        if bytes.len() != KEYPAIR_BYTES {
            return Err(SolsendError::ConfigError(format!(
                "Keypair must be exactly {KEYPAIR_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        Keypair::try_from(bytes).map_err(|e| {
            SolsendError::ConfigError(format!("Invalid keypair bytes: {}", sanitize_error!(e)))
        })
    }
}
