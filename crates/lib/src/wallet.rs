use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use crate::{
    balance::BalanceQuery,
    broadcast::{BroadcastEngine, SubmissionPolicy, SubmissionReceipt},
    config::Network,
    error::SolsendError,
    rpc::{ClusterRpc, LedgerRpc},
    signer::SigningSessionManager,
    state::{BusyFlag, BusyGuard, Session, SessionStore},
    transaction::{TransactionBuilder, TransferIntent},
};

/// Read-only view of what the client is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WalletStatus {
    pub connecting: bool,
    pub sending: bool,
    pub connected: bool,
}

/// The surface a front end talks to: connect, read the balance, send SOL.
pub struct WalletClient {
    session: Arc<SessionStore>,
    signer: SigningSessionManager,
    rpc: ClusterRpc<dyn LedgerRpc>,
    policy: SubmissionPolicy,
    connecting: Arc<BusyFlag>,
    sending: Arc<BusyFlag>,
    /// Held while a wallet session is open; the wallet serves one at a time.
    wallet_session: Arc<BusyFlag>,
}

impl WalletClient {
    pub fn new(
        session: Arc<SessionStore>,
        signer: SigningSessionManager,
        rpc: ClusterRpc<dyn LedgerRpc>,
        policy: SubmissionPolicy,
    ) -> Self {
        Self {
            session,
            signer,
            rpc,
            policy,
            connecting: Arc::new(BusyFlag::default()),
            sending: Arc::new(BusyFlag::default()),
            wallet_session: Arc::new(BusyFlag::default()),
        }
    }

    pub fn session(&self) -> Session {
        self.session.read()
    }

    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn set_network(&self, network: Network) {
        self.session.set_network(network);
    }

    pub fn status(&self) -> WalletStatus {
        WalletStatus {
            connecting: self.connecting.is_set(),
            sending: self.sending.is_set(),
            connected: self.session.read().is_connected(),
        }
    }

    pub async fn connect(&self) -> Result<Pubkey, SolsendError> {
        let _guard =
            self.connecting.try_acquire().ok_or_else(|| SolsendError::Busy("connect".to_string()))?;

        let network = self.session.read().network;
        let account = {
            let _wallet = self.claim_wallet()?;
            self.signer.connect(network).await?
        };
        self.session.set_connected(account);
        Ok(account)
    }

    fn claim_wallet(&self) -> Result<BusyGuard, SolsendError> {
        self.wallet_session
            .try_acquire()
            .ok_or_else(|| SolsendError::Busy("wallet session".to_string()))
    }

    pub fn disconnect(&self) {
        self.session.clear();
    }

    pub async fn get_balance(&self) -> Result<f64, SolsendError> {
        let session = self.session.read();
        let rpc = self.rpc.for_network(session.network);
        BalanceQuery::get_balance(rpc.as_ref(), session.account.as_ref()).await
    }

    /// Builds, signs, submits and confirms a transfer of `amount_sol` to
    /// `recipient`.
    ///
    /// Once the wallet has signed, the rest runs on its own task: dropping
    /// the returned future does not stop a transaction that may already be
    /// on the wire, and `status().sending` stays set until it settles.
    pub async fn send_value(
        &self,
        recipient: &str,
        amount_sol: f64,
    ) -> Result<SubmissionReceipt, SolsendError> {
        let guard =
            self.sending.try_acquire().ok_or_else(|| SolsendError::Busy("send".to_string()))?;

        let session = self.session.read();
        let sender = session.account.ok_or(SolsendError::NotConnected)?;
        let intent = TransferIntent::new(sender, recipient, amount_sol)?;
        log::info!(
            "Sending {} lamports from {} to {} on {}",
            intent.lamports,
            intent.sender,
            intent.recipient,
            session.network
        );

        let rpc = self.rpc.for_network(session.network);
        let checkpoint = rpc.get_latest_checkpoint().await?;
        let unsigned = TransactionBuilder::build(&intent, &checkpoint, &sender);
        let mut engine = BroadcastEngine::new(rpc, self.policy);

        let artifact = {
            let _wallet = self.claim_wallet()?;
            self.signer.sign_transaction(&unsigned, session.network).await?
        };
        if let Some(signature) = artifact.signature() {
            log::info!("Wallet signed transaction {signature}");
        }

        let task = tokio::spawn(async move {
            let _guard = guard;
            engine.run(&artifact, &checkpoint).await
        });

        task.await
            .map_err(|e| SolsendError::InternalError(format!("Broadcast task failed: {e}")))?
    }
}
