use solana_message::{Message, VersionedMessage};
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::VersionedTransaction};
use solana_system_interface::instruction::transfer;

use crate::{
    error::SolsendError,
    rpc::Checkpoint,
    transaction::{intent::TransferIntent, TransactionUtil},
};

/// A transfer ready for the wallet: every signature slot is zeroed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    transaction: VersionedTransaction,
    checkpoint: Checkpoint,
}

impl UnsignedTransaction {
    pub fn transaction(&self) -> &VersionedTransaction {
        &self.transaction
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SolsendError> {
        TransactionUtil::serialize(&self.transaction)
    }
}

/// Serialized transaction bytes as the wallet returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedArtifact {
    bytes: Vec<u8>,
}

impl SignedArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The signature the network will report for this transaction, when the
    /// bytes decode and the fee payer slot is filled.
    pub fn signature(&self) -> Option<Signature> {
        TransactionUtil::deserialize(&self.bytes)
            .ok()
            .and_then(|transaction| TransactionUtil::first_signature(&transaction))
    }
}

pub struct TransactionBuilder;

impl TransactionBuilder {
    /// Pure: the same inputs always produce the same bytes.
    pub fn build(
        intent: &TransferIntent,
        checkpoint: &Checkpoint,
        fee_payer: &Pubkey,
    ) -> UnsignedTransaction {
        let instruction = transfer(&intent.sender, &intent.recipient, intent.lamports);
        let message = VersionedMessage::Legacy(Message::new_with_blockhash(
            &[instruction],
            Some(fee_payer),
            &checkpoint.blockhash,
        ));

        UnsignedTransaction {
            transaction: TransactionUtil::new_unsigned_versioned_transaction(message),
            checkpoint: *checkpoint,
        }
    }
}
