use solana_sdk::signature::Signature;
use std::{fmt, sync::Arc, time::Duration};
use tokio::time::sleep;

use crate::{
    config::SubmissionConfig,
    constant::{MAX_CONSECUTIVE_POLL_ERRORS, MAX_SEND_ATTEMPTS},
    error::SolsendError,
    rpc::{Checkpoint, LedgerRpc, SendOptions, SignatureState},
    transaction::SignedArtifact,
};

/// Lifecycle of one transfer. `Confirmed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Built,
    Signed,
    Submitting,
    Submitted,
    Confirming,
    Confirmed,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Built => "built",
            Stage::Signed => "signed",
            Stage::Submitting => "submitting",
            Stage::Submitted => "submitted",
            Stage::Confirming => "confirming",
            Stage::Confirmed => "confirmed",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a single send attempt that did not end the submission outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Sent(Signature),
    Transient(SolsendError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPolicy {
    pub post_sign_quiescence: Duration,
    pub retry_backoff: Duration,
    pub max_rpc_retries: usize,
    pub poll_interval: Duration,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self::from(&SubmissionConfig::default())
    }
}

impl From<&SubmissionConfig> for SubmissionPolicy {
    fn from(config: &SubmissionConfig) -> Self {
        Self {
            post_sign_quiescence: Duration::from_millis(config.post_sign_quiescence_ms),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            max_rpc_retries: config.max_rpc_retries,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub signature: Signature,
    /// Send attempts used, including the one that succeeded.
    pub attempts: u8,
}

/// Submits one signed transaction and waits for the network to confirm it.
///
/// Create the engine once the transaction is built, then hand it the signed
/// artifact. Send failures are retried up to [`MAX_SEND_ATTEMPTS`] times;
/// confirmation ends on a confirmed or failed status, or when the blockhash
/// expires.
pub struct BroadcastEngine {
    rpc: Arc<dyn LedgerRpc>,
    policy: SubmissionPolicy,
    history: Vec<Stage>,
}

impl BroadcastEngine {
    pub fn new(rpc: Arc<dyn LedgerRpc>, policy: SubmissionPolicy) -> Self {
        log::debug!("Transaction stage: {}", Stage::Built);
        Self { rpc, policy, history: vec![Stage::Built] }
    }

    pub fn stage(&self) -> Stage {
        self.history.last().copied().unwrap_or(Stage::Built)
    }

    /// Every stage entered so far, oldest first.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    fn transition(&mut self, stage: Stage) {
        log::info!("Transaction stage: {} -> {stage}", self.stage());
        self.history.push(stage);
    }

    pub async fn run(
        &mut self,
        artifact: &SignedArtifact,
        checkpoint: &Checkpoint,
    ) -> Result<SubmissionReceipt, SolsendError> {
        self.transition(Stage::Signed);

        let result = self.submit_and_confirm(artifact, checkpoint).await;
        match &result {
            Ok(receipt) => {
                self.transition(Stage::Confirmed);
                log::info!(
                    "Transaction {} confirmed after {} attempt(s)",
                    receipt.signature,
                    receipt.attempts
                );
            }
            Err(e) => {
                self.transition(Stage::Failed);
                log::error!("Transaction failed: {e}");
            }
        }
        result
    }

    async fn submit_and_confirm(
        &mut self,
        artifact: &SignedArtifact,
        checkpoint: &Checkpoint,
    ) -> Result<SubmissionReceipt, SolsendError> {
        let receipt = self.submit(artifact).await?;
        self.confirm(&receipt.signature, checkpoint).await?;
        Ok(receipt)
    }

    async fn submit(&mut self, artifact: &SignedArtifact) -> Result<SubmissionReceipt, SolsendError> {
        // Give the wallet hand-off time to settle before the first send
        sleep(self.policy.post_sign_quiescence).await;
        self.transition(Stage::Submitting);

        let options =
            SendOptions { skip_preflight: true, max_retries: self.policy.max_rpc_retries };
        let mut last_error = None;

        for attempt in 1..=MAX_SEND_ATTEMPTS {
            match self.attempt(artifact, options).await? {
                AttemptOutcome::Sent(signature) => {
                    self.transition(Stage::Submitted);
                    log::info!("Transaction {signature} sent on attempt {attempt}");
                    return Ok(SubmissionReceipt { signature, attempts: attempt });
                }
                AttemptOutcome::Transient(e) => {
                    log::warn!("Send attempt {attempt}/{MAX_SEND_ATTEMPTS} failed: {e}");
                    last_error = Some(e);

                    if attempt < MAX_SEND_ATTEMPTS {
                        sleep(self.policy.retry_backoff).await;
                    }
                }
            }
        }

        Err(SolsendError::SubmissionFailed {
            attempts: MAX_SEND_ATTEMPTS,
            last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    /// Transport failures are transient; anything else ends the submission.
    async fn attempt(
        &self,
        artifact: &SignedArtifact,
        options: SendOptions,
    ) -> Result<AttemptOutcome, SolsendError> {
        match self.rpc.send_raw_transaction(artifact.as_bytes(), options).await {
            Ok(signature) => Ok(AttemptOutcome::Sent(signature)),
            Err(e) if e.is_retryable() => Ok(AttemptOutcome::Transient(e)),
            Err(e) => Err(e),
        }
    }

    async fn confirm(
        &mut self,
        signature: &Signature,
        checkpoint: &Checkpoint,
    ) -> Result<(), SolsendError> {
        self.transition(Stage::Confirming);
        let mut consecutive_errors: u32 = 0;

        loop {
            let round = self.poll_once(signature, checkpoint).await;
            match round {
                Ok(Some(result)) => return result,
                Ok(None) => consecutive_errors = 0,
                Err(e) => {
                    consecutive_errors += 1;
                    log::warn!(
                        "Status poll for {signature} failed ({consecutive_errors}/{MAX_CONSECUTIVE_POLL_ERRORS}): {e}"
                    );
                    if consecutive_errors >= MAX_CONSECUTIVE_POLL_ERRORS {
                        return Err(SolsendError::ConfirmationTimeout {
                            signature: signature.to_string(),
                            reason: format!(
                                "status unknown after {consecutive_errors} consecutive RPC errors: {e}"
                            ),
                        });
                    }
                }
            }

            sleep(self.policy.poll_interval).await;
        }
    }

    /// One status check plus an expiry check. `Ok(None)` means keep waiting.
    async fn poll_once(
        &self,
        signature: &Signature,
        checkpoint: &Checkpoint,
    ) -> Result<Option<Result<(), SolsendError>>, SolsendError> {
        if let Some(settled) = settle(signature, self.rpc.get_signature_state(signature).await?) {
            return Ok(Some(settled));
        }

        let height = self.rpc.get_block_height().await?;
        if height <= checkpoint.last_valid_block_height {
            return Ok(None);
        }

        // The transaction may have landed between the two reads
        let last_look = self.rpc.get_signature_state(signature).await?;
        Ok(Some(settle(signature, last_look).unwrap_or_else(|| {
            Err(SolsendError::ConfirmationTimeout {
                signature: signature.to_string(),
                reason: format!(
                    "block height {height} passed last valid block height {}",
                    checkpoint.last_valid_block_height
                ),
            })
        })))
    }
}

fn settle(signature: &Signature, state: SignatureState) -> Option<Result<(), SolsendError>> {
    match state {
        SignatureState::Pending => None,
        SignatureState::Confirmed => Some(Ok(())),
        SignatureState::Failed(error) => Some(Err(SolsendError::TransactionRejected {
            signature: signature.to_string(),
            error,
        })),
    }
}
