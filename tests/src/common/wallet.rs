use async_trait::async_trait;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use solsend_lib::{
    config::{AppIdentity, Network},
    error::SolsendError,
    signer::{AuthorizationResult, KeypairWallet, WalletAdapter, WalletSession},
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// How the fake wallet answers once a session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletBehavior {
    Approve,
    /// Authorizes, but grants no accounts
    GrantNoAccounts,
    /// Signs nothing and returns an empty list
    ReturnNothing,
    /// The user dismissed the signing prompt
    Cancel,
}

/// What the fake wallet was asked to do.
#[derive(Default)]
pub struct WalletLog {
    opened: AtomicUsize,
    closed: AtomicUsize,
    authorized_networks: Mutex<Vec<Network>>,
    sign_requests: Mutex<Vec<usize>>,
}

impl WalletLog {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn authorized_networks(&self) -> Vec<Network> {
        self.authorized_networks.lock().unwrap().clone()
    }

    /// Number of payloads in each signing request, in order.
    pub fn sign_requests(&self) -> Vec<usize> {
        self.sign_requests.lock().unwrap().clone()
    }
}

/// A wallet that signs with a local keypair and records every interaction.
pub struct FakeWallet {
    inner: KeypairWallet,
    behavior: WalletBehavior,
    log: Arc<WalletLog>,
}

impl FakeWallet {
    pub fn new(behavior: WalletBehavior) -> Self {
        Self {
            inner: KeypairWallet::new(Keypair::new()),
            behavior,
            log: Arc::new(WalletLog::default()),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.inner.pubkey()
    }

    pub fn log(&self) -> Arc<WalletLog> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl WalletAdapter for FakeWallet {
    async fn open_session(&self) -> Result<Box<dyn WalletSession>, SolsendError> {
        self.log.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            inner: self.inner.open_session().await?,
            behavior: self.behavior,
            log: Arc::clone(&self.log),
        }))
    }
}

struct FakeSession {
    inner: Box<dyn WalletSession>,
    behavior: WalletBehavior,
    log: Arc<WalletLog>,
}

#[async_trait]
impl WalletSession for FakeSession {
    async fn authorize(
        &mut self,
        network: Network,
        identity: &AppIdentity,
    ) -> Result<AuthorizationResult, SolsendError> {
        self.log.authorized_networks.lock().unwrap().push(network);

        let mut result = self.inner.authorize(network, identity).await?;
        if self.behavior == WalletBehavior::GrantNoAccounts {
            result.accounts.clear();
        }
        Ok(result)
    }

    async fn sign_transactions(
        &mut self,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, SolsendError> {
        self.log.sign_requests.lock().unwrap().push(payloads.len());

        match self.behavior {
            WalletBehavior::ReturnNothing => Ok(vec![]),
            WalletBehavior::Cancel => {
                Err(SolsendError::SigningFailed("User declined the request".to_string()))
            }
            _ => self.inner.sign_transactions(payloads).await,
        }
    }

    async fn close(&mut self) {
        self.inner.close().await;
        self.log.closed.fetch_add(1, Ordering::SeqCst);
    }
}
