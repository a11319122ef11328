use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_message::VersionedMessage;
use solana_sdk::{
    signature::Signature,
    transaction::{Transaction, VersionedTransaction},
};

use crate::error::SolsendError;

pub struct TransactionUtil {}

impl TransactionUtil {
    pub fn new_unsigned_versioned_transaction(message: VersionedMessage) -> VersionedTransaction {
        let num_required_signatures = message.header().num_required_signatures as usize;
        VersionedTransaction {
            signatures: vec![Signature::default(); num_required_signatures],
            message,
        }
    }

    pub fn serialize(transaction: &VersionedTransaction) -> Result<Vec<u8>, SolsendError> {
        Ok(bincode::serialize(transaction)?)
    }

    /// Accepts both wire formats; legacy transactions are lifted into a
    /// `VersionedTransaction` with a legacy message.
    pub fn deserialize(bytes: &[u8]) -> Result<VersionedTransaction, SolsendError> {
        if let Ok(transaction) = bincode::deserialize::<VersionedTransaction>(bytes) {
            return Ok(transaction);
        }

        let legacy: Transaction = bincode::deserialize(bytes)?;
        Ok(VersionedTransaction {
            signatures: legacy.signatures,
            message: VersionedMessage::Legacy(legacy.message),
        })
    }

    pub fn encode_b64(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    /// The transaction id: the fee payer's signature, or `None` while unsigned.
    pub fn first_signature(transaction: &VersionedTransaction) -> Option<Signature> {
        transaction.signatures.first().copied().filter(|signature| *signature != Signature::default())
    }
}
