use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_sdk::pubkey::Pubkey;

use crate::{constant::PUBKEY_BYTES, error::SolsendError};

// Characters that never appear in base58 but do in standard base64.
const BASE64_ONLY_CHARS: [char; 3] = ['=', '+', '/'];

/// Normalizes account addresses handed to us by wallets and users.
///
/// Wallet adapter endpoints report accounts base64 encoded, while users paste
/// base58. Both decode to the same 32 byte key.
pub struct AddressCodec;

impl AddressCodec {
    pub fn decode(text: &str) -> Result<Pubkey, SolsendError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SolsendError::InvalidAddress("address is empty".to_string()));
        }

        let bytes = if Self::looks_like_base64(text) {
            STANDARD.decode(text).map_err(|e| {
                SolsendError::InvalidAddress(format!("invalid base64 address {text}: {e}"))
            })?
        } else {
            bs58::decode(text).into_vec().map_err(|e| {
                SolsendError::InvalidAddress(format!("invalid base58 address {text}: {e}"))
            })?
        };

        let key: [u8; PUBKEY_BYTES] = bytes.as_slice().try_into().map_err(|_| {
            SolsendError::InvalidAddress(format!(
                "address {text} decodes to {} bytes, expected {PUBKEY_BYTES}",
                bytes.len()
            ))
        })?;

        Ok(Pubkey::new_from_array(key))
    }

    pub fn encode(pubkey: &Pubkey) -> String {
        pubkey.to_string()
    }

    /// `abcd1234...wxyz` form used for labels.
    pub fn shorten(pubkey: &Pubkey) -> String {
        let encoded = pubkey.to_string();
        if encoded.len() <= 12 {
            return encoded;
        }
        format!("{}...{}", &encoded[..8], &encoded[encoded.len() - 4..])
    }

    fn looks_like_base64(text: &str) -> bool {
        text.contains(BASE64_ONLY_CHARS)
    }
}
