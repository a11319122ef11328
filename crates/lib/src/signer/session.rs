use futures::future::BoxFuture;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use crate::{
    address::AddressCodec,
    config::{AppIdentity, Network},
    error::SolsendError,
    signer::protocol::{AuthorizationResult, WalletAdapter, WalletSession},
    transaction::{SignedArtifact, TransactionUtil, UnsignedTransaction},
};

/// Drives the wallet through short-lived sessions. Each public operation
/// opens its own session and closes it before returning.
#[derive(Clone)]
pub struct SigningSessionManager {
    adapter: Arc<dyn WalletAdapter>,
    identity: AppIdentity,
}

impl SigningSessionManager {
    pub fn new(adapter: Arc<dyn WalletAdapter>, identity: AppIdentity) -> Self {
        Self { adapter, identity }
    }

    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    /// Runs `f` inside a freshly opened session and closes the session
    /// afterwards, whatever `f` returned. If the returned future is dropped
    /// while `f` is still running, the close is handed to the runtime.
    pub async fn with_session<T, F>(&self, f: F) -> Result<T, SolsendError>
    where
        T: Send,
        F: for<'s> FnOnce(&'s mut dyn WalletSession) -> BoxFuture<'s, Result<T, SolsendError>>,
    {
        let session = self.adapter.open_session().await.map_err(into_signing_error)?;
        log::debug!("Wallet session opened");
        let mut open = OpenSession { session: Some(session) };

        let result = match open.session.as_deref_mut() {
            Some(session) => f(session).await,
            None => Err(SolsendError::InternalError("Wallet session missing".to_string())),
        };

        open.close().await;
        result.map_err(into_signing_error)
    }

    /// Asks the wallet for access and returns the first account it grants.
    pub async fn connect(&self, network: Network) -> Result<Pubkey, SolsendError> {
        let identity = self.identity.clone();
        let address = self
            .with_session(move |session| {
                Box::pin(async move {
                    let authorization = session.authorize(network, &identity).await?;
                    first_account(authorization)
                })
            })
            .await?;

        AddressCodec::decode(&address)
    }

    /// Re-authorizes and signs exactly one transaction in a new session.
    pub async fn sign_transaction(
        &self,
        unsigned: &UnsignedTransaction,
        network: Network,
    ) -> Result<SignedArtifact, SolsendError> {
        let identity = self.identity.clone();
        let payload = unsigned.to_bytes()?;

        let signed = self
            .with_session(move |session| {
                Box::pin(async move {
                    let authorization = session.authorize(network, &identity).await?;
                    first_account(authorization)?;

                    let signed = session.sign_transactions(vec![payload]).await?;
                    signed.into_iter().next().ok_or(SolsendError::NoSignatureReturned)
                })
            })
            .await?;

        // Legacy-encoded answers are re-encoded so the network always gets the
        // versioned wire format
        let transaction = TransactionUtil::deserialize(&signed).map_err(|_| {
            SolsendError::SigningFailed(
                "Wallet returned a payload that is not a transaction".to_string(),
            )
        })?;

        Ok(SignedArtifact::new(TransactionUtil::serialize(&transaction)?))
    }
}

/// Owns an open wallet session until it is closed.
struct OpenSession {
    session: Option<Box<dyn WalletSession>>,
}

impl OpenSession {
    async fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close().await;
            log::debug!("Wallet session closed");
        }
    }
}

impl Drop for OpenSession {
    fn drop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        log::warn!("Wallet session abandoned mid-operation; closing it");
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    session.close().await;
                    log::debug!("Abandoned wallet session closed");
                });
            }
            Err(_) => log::error!("No runtime to close the abandoned wallet session"),
        }
    }
}

fn first_account(authorization: AuthorizationResult) -> Result<String, SolsendError> {
    authorization
        .accounts
        .into_iter()
        .next()
        .map(|account| account.address)
        .ok_or(SolsendError::AuthorizationDenied)
}

/// The two named wallet outcomes keep their kind; everything else that goes
/// wrong inside a session is a signing failure.
fn into_signing_error(error: SolsendError) -> SolsendError {
    match error {
        SolsendError::AuthorizationDenied
        | SolsendError::NoSignatureReturned
        | SolsendError::SigningFailed(_) => error,
        other => SolsendError::SigningFailed(other.to_string()),
    }
}
