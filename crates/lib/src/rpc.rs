use async_trait::async_trait;
use mockall::automock;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Signature, transaction::VersionedTransaction,
};
use std::{sync::Arc, time::Duration};

use crate::{
    config::{Network, NetworkConfig},
    error::SolsendError,
};

pub fn get_rpc_client(rpc_url: &str, timeout: Duration) -> Arc<RpcClient> {
    Arc::new(RpcClient::new_with_timeout_and_commitment(
        rpc_url.to_string(),
        timeout,
        CommitmentConfig::confirmed(),
    ))
}

/// A blockhash together with the last block height at which a transaction
/// bound to it can still land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    pub skip_preflight: bool,
    pub max_retries: usize,
}

/// Where a signature stands from the network's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureState {
    /// Unknown to the node, or below the confirmed commitment.
    Pending,
    Confirmed,
    /// Landed with an execution error; carries the ledger's error payload.
    Failed(String),
}

/// The slice of the Solana JSON-RPC API the send pipeline depends on.
#[automock]
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    async fn get_latest_checkpoint(&self) -> Result<Checkpoint, SolsendError>;

    async fn send_raw_transaction(
        &self,
        raw: &[u8],
        options: SendOptions,
    ) -> Result<Signature, SolsendError>;

    async fn get_signature_state(&self, signature: &Signature)
        -> Result<SignatureState, SolsendError>;

    async fn get_block_height(&self) -> Result<u64, SolsendError>;

    async fn get_balance(&self, account: &Pubkey) -> Result<u64, SolsendError>;
}

#[async_trait]
impl LedgerRpc for RpcClient {
    async fn get_latest_checkpoint(&self) -> Result<Checkpoint, SolsendError> {
        let (blockhash, last_valid_block_height) =
            self.get_latest_blockhash_with_commitment(CommitmentConfig::confirmed()).await?;
        Ok(Checkpoint { blockhash, last_valid_block_height })
    }

    async fn send_raw_transaction(
        &self,
        raw: &[u8],
        options: SendOptions,
    ) -> Result<Signature, SolsendError> {
        let transaction: VersionedTransaction = bincode::deserialize(raw)?;
        let config = RpcSendTransactionConfig {
            skip_preflight: options.skip_preflight,
            max_retries: Some(options.max_retries),
            ..Default::default()
        };

        Ok(self.send_transaction_with_config(&transaction, config).await?)
    }

    async fn get_signature_state(
        &self,
        signature: &Signature,
    ) -> Result<SignatureState, SolsendError> {
        let response = self.get_signature_statuses(&[*signature]).await?;

        let Some(Some(status)) = response.value.into_iter().next() else {
            return Ok(SignatureState::Pending);
        };

        if let Some(err) = status.err.as_ref() {
            let payload = serde_json::to_string(err).unwrap_or_else(|_| format!("{err:?}"));
            return Ok(SignatureState::Failed(payload));
        }

        if status.satisfies_commitment(CommitmentConfig::confirmed()) {
            Ok(SignatureState::Confirmed)
        } else {
            Ok(SignatureState::Pending)
        }
    }

    async fn get_block_height(&self) -> Result<u64, SolsendError> {
        Ok(RpcClient::get_block_height(self).await?)
    }

    async fn get_balance(&self, account: &Pubkey) -> Result<u64, SolsendError> {
        Ok(RpcClient::get_balance(self, account).await?)
    }
}

/// One RPC client per cluster; the session's network picks which one is used.
pub struct ClusterRpc<R: ?Sized> {
    devnet: Arc<R>,
    mainnet: Arc<R>,
}

impl<R: ?Sized> Clone for ClusterRpc<R> {
    fn clone(&self) -> Self {
        Self { devnet: Arc::clone(&self.devnet), mainnet: Arc::clone(&self.mainnet) }
    }
}

impl<R: ?Sized> ClusterRpc<R> {
    pub fn new(devnet: Arc<R>, mainnet: Arc<R>) -> Self {
        Self { devnet, mainnet }
    }

    pub fn for_network(&self, network: Network) -> Arc<R> {
        match network {
            Network::Devnet => Arc::clone(&self.devnet),
            Network::Mainnet => Arc::clone(&self.mainnet),
        }
    }
}

impl<R: LedgerRpc + 'static> ClusterRpc<R> {
    pub fn into_dyn(self) -> ClusterRpc<dyn LedgerRpc> {
        ClusterRpc::new(self.devnet, self.mainnet)
    }
}

impl ClusterRpc<RpcClient> {
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(
            get_rpc_client(config.rpc_url(Network::Devnet), config.rpc_timeout()),
            get_rpc_client(config.rpc_url(Network::Mainnet), config.rpc_timeout()),
        )
    }
}
