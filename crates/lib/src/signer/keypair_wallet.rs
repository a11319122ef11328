use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::VersionedTransaction,
};
use std::sync::Arc;

use crate::{
    config::{AppIdentity, Network},
    error::SolsendError,
    signer::{
        keypair_util::KeypairUtil,
        protocol::{AuthorizationResult, AuthorizedAccount, WalletAdapter, WalletSession},
    },
};

/// A wallet backed by a keypair held in this process. It answers the same
/// session protocol a remote wallet does, so the rest of the flow cannot
/// tell the two apart.
#[derive(Clone)]
pub struct KeypairWallet {
    keypair: Arc<Keypair>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair: Arc::new(keypair) }
    }

    pub fn from_private_key_string(private_key: &str) -> Result<Self, SolsendError> {
        Ok(Self::new(KeypairUtil::from_private_key_string(private_key)?))
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    async fn open_session(&self) -> Result<Box<dyn WalletSession>, SolsendError> {
        Ok(Box::new(KeypairSession { keypair: Arc::clone(&self.keypair), authorized: false }))
    }
}

struct KeypairSession {
    keypair: Arc<Keypair>,
    authorized: bool,
}

impl KeypairSession {
    fn sign_one(&self, payload: &[u8]) -> Result<Vec<u8>, SolsendError> {
        let mut transaction: VersionedTransaction = bincode::deserialize(payload)?;
        let pubkey = self.keypair.pubkey();

        let num_signers = transaction.message.header().num_required_signatures as usize;
        let position = transaction
            .message
            .static_account_keys()
            .iter()
            .take(num_signers)
            .position(|key| *key == pubkey)
            .ok_or_else(|| {
                SolsendError::SigningFailed(format!("Transaction does not need a signature from {pubkey}"))
            })?;

        if transaction.signatures.len() != num_signers {
            transaction.signatures.resize(num_signers, Default::default());
        }
        transaction.signatures[position] =
            self.keypair.try_sign_message(&transaction.message.serialize())?;

        Ok(bincode::serialize(&transaction)?)
    }
}

#[async_trait]
impl WalletSession for KeypairSession {
    async fn authorize(
        &mut self,
        network: Network,
        identity: &AppIdentity,
    ) -> Result<AuthorizationResult, SolsendError> {
        log::debug!("Local keypair authorizing {} on {}", identity.name, network.cluster());
        self.authorized = true;

        Ok(AuthorizationResult {
            accounts: vec![AuthorizedAccount {
                address: STANDARD.encode(self.keypair.pubkey().to_bytes()),
                label: Some("local keypair".to_string()),
            }],
            auth_token: String::new(),
        })
    }

    async fn sign_transactions(
        &mut self,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, SolsendError> {
        if !self.authorized {
            return Err(SolsendError::SigningFailed("Session is not authorized".to_string()));
        }

        payloads.iter().map(|payload| self.sign_one(payload)).collect()
    }

    async fn close(&mut self) {
        self.authorized = false;
    }
}
