use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::{
    config::{AppIdentity, Network},
    error::SolsendError,
};

/// One account the wallet granted access to. `address` is the wallet's
/// encoding of the public key, usually base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedAccount {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResult {
    pub accounts: Vec<AuthorizedAccount>,
    #[serde(default)]
    pub auth_token: String,
}

/// An open, exclusive channel to the wallet. Every call happens between
/// `open_session` and `close`.
#[automock]
#[async_trait]
pub trait WalletSession: Send {
    async fn authorize(
        &mut self,
        network: Network,
        identity: &AppIdentity,
    ) -> Result<AuthorizationResult, SolsendError>;

    /// Takes serialized transactions and returns them with the wallet's
    /// signature filled in, in the same order.
    async fn sign_transactions(
        &mut self,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, SolsendError>;

    async fn close(&mut self);
}

#[automock]
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn WalletSession>, SolsendError>;
}
