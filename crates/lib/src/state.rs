use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::{
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{config::Network, error::SolsendError};

/// What the app currently knows about the user's wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub account: Option<Pubkey>,
    pub network: Network,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}

/// Serializable form of a [`Session`], for front ends that keep it between runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub account: Option<String>,
    pub network: Network,
}

/// Process-wide session state shared behind an `Arc`.
///
/// Every mutation replaces the whole session under one write lock, so a
/// connect racing a disconnect leaves one of the two results, never a mix.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Session>,
}

impl SessionStore {
    pub fn new(network: Network) -> Self {
        Self { inner: RwLock::new(Session { account: None, network }) }
    }

    pub fn read(&self) -> Session {
        *self.inner.read()
    }

    pub fn set_connected(&self, account: Pubkey) {
        let mut session = self.inner.write();
        log::info!("Session connected: {account} on {}", session.network);
        session.account = Some(account);
    }

    pub fn clear(&self) {
        let mut session = self.inner.write();
        if let Some(account) = session.account.take() {
            log::info!("Session disconnected: {account}");
        }
    }

    /// The network selection is independent of the connection; switching it
    /// keeps the account.
    pub fn set_network(&self, network: Network) {
        let mut session = self.inner.write();
        if session.network != network {
            log::info!("Switching network from {} to {network}", session.network);
            session.network = network;
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.read();
        SessionSnapshot {
            account: session.account.map(|account| account.to_string()),
            network: session.network,
        }
    }

    pub fn restore(&self, snapshot: &SessionSnapshot) -> Result<(), SolsendError> {
        let account = snapshot
            .account
            .as_deref()
            .map(|account| {
                Pubkey::from_str(account).map_err(|e| {
                    SolsendError::InvalidAddress(format!("Stored account {account}: {e}"))
                })
            })
            .transpose()?;

        *self.inner.write() = Session { account, network: snapshot.network };
        Ok(())
    }
}

/// One busy flag per user action. Only one holder at a time.
#[derive(Debug, Default)]
pub struct BusyFlag {
    busy: AtomicBool,
}

impl BusyFlag {
    pub fn is_set(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The guard is owned so it can move into a spawned task.
    pub fn try_acquire(self: &Arc<Self>) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { flag: Arc::clone(self) })
    }
}

/// Clears its flag on drop.
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<BusyFlag>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::Release);
    }
}
