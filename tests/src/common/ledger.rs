use solana_sdk::{hash::Hash, signature::Signature, transaction::VersionedTransaction};
use solsend_lib::{
    error::SolsendError,
    rpc::{Checkpoint, MockLedgerRpc, SignatureState},
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use super::constants::{DEFAULT_BLOCK_HEIGHT, LAST_VALID_BLOCK_HEIGHT};

/// Everything the scripted ledger saw.
#[derive(Default)]
pub struct LedgerLog {
    checkpoint_calls: AtomicUsize,
    sent: Mutex<Vec<Vec<u8>>>,
}

impl LedgerLog {
    pub fn checkpoint_calls(&self) -> usize {
        self.checkpoint_calls.load(Ordering::SeqCst)
    }

    /// Raw bytes of every send attempt, accepted or not.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_sent_transaction(&self) -> VersionedTransaction {
        let sent = self.sent();
        let raw = sent.last().expect("nothing was sent");
        bincode::deserialize(raw).expect("sent bytes are not a transaction")
    }
}

/// Builds a `MockLedgerRpc` that behaves like a cluster with a fixed script.
pub struct LedgerScript {
    blockhash: Hash,
    failing_sends: usize,
    signature_state: SignatureState,
    block_height: u64,
    balance: u64,
}

impl Default for LedgerScript {
    fn default() -> Self {
        Self {
            blockhash: Hash::new_unique(),
            failing_sends: 0,
            signature_state: SignatureState::Confirmed,
            block_height: DEFAULT_BLOCK_HEIGHT,
            balance: 0,
        }
    }
}

impl LedgerScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first `count` sends fail with a transport error.
    pub fn failing_sends(mut self, count: usize) -> Self {
        self.failing_sends = count;
        self
    }

    pub fn signature_state(mut self, state: SignatureState) -> Self {
        self.signature_state = state;
        self
    }

    /// The transaction never lands and the blockhash is already past its
    /// last valid height.
    pub fn expired(mut self) -> Self {
        self.signature_state = SignatureState::Pending;
        self.block_height = LAST_VALID_BLOCK_HEIGHT + 1;
        self
    }

    pub fn balance(mut self, lamports: u64) -> Self {
        self.balance = lamports;
        self
    }

    pub fn build(self) -> (MockLedgerRpc, Arc<LedgerLog>) {
        let log = Arc::new(LedgerLog::default());
        let mut rpc = MockLedgerRpc::new();

        let checkpoint =
            Checkpoint { blockhash: self.blockhash, last_valid_block_height: LAST_VALID_BLOCK_HEIGHT };
        let calls = Arc::clone(&log);
        rpc.expect_get_latest_checkpoint().returning(move || {
            calls.checkpoint_calls.fetch_add(1, Ordering::SeqCst);
            Ok(checkpoint)
        });

        let sends = Arc::clone(&log);
        let failing_sends = self.failing_sends;
        rpc.expect_send_raw_transaction().returning(move |raw, _| {
            let mut sent = sends.sent.lock().unwrap();
            sent.push(raw.to_vec());
            if sent.len() <= failing_sends {
                return Err(SolsendError::RpcError("connection reset by peer".to_string()));
            }
            first_signature(raw)
        });

        let state = self.signature_state;
        rpc.expect_get_signature_state().returning(move |_| Ok(state.clone()));

        let block_height = self.block_height;
        rpc.expect_get_block_height().returning(move || Ok(block_height));

        let balance = self.balance;
        rpc.expect_get_balance().returning(move |_| Ok(balance));

        (rpc, log)
    }
}

fn first_signature(raw: &[u8]) -> Result<Signature, SolsendError> {
    let transaction: VersionedTransaction = bincode::deserialize(raw)
        .map_err(|e| SolsendError::SerializationError(e.to_string()))?;
    transaction
        .signatures
        .first()
        .copied()
        .ok_or_else(|| SolsendError::RpcError("transaction has no signatures".to_string()))
}
