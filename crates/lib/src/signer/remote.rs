use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonrpsee::{
    core::client::ClientT,
    http_client::{HttpClient, HttpClientBuilder},
    rpc_params,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    config::{AppIdentity, Network},
    error::SolsendError,
    sanitize_error,
    signer::protocol::{AuthorizationResult, WalletAdapter, WalletSession},
    transaction::TransactionUtil,
};

const AUTHORIZE_METHOD: &str = "authorize";
const SIGN_TRANSACTIONS_METHOD: &str = "sign_transactions";

#[derive(Debug, Serialize)]
struct AuthorizeRequest<'a> {
    identity: &'a AppIdentity,
    cluster: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
struct SignTransactionsRequest {
    auth_token: String,
    payloads: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SignTransactionsResponse {
    signed_payloads: Vec<String>,
}

/// A wallet reached over HTTP JSON-RPC, e.g. a wallet bridge running on the
/// user's device.
#[derive(Debug, Clone)]
pub struct RemoteWallet {
    url: String,
    timeout: Duration,
}

impl RemoteWallet {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self { url: url.into(), timeout }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WalletAdapter for RemoteWallet {
    async fn open_session(&self) -> Result<Box<dyn WalletSession>, SolsendError> {
        let client = HttpClientBuilder::default()
            .request_timeout(self.timeout)
            .build(&self.url)
            .map_err(|e| {
                SolsendError::SigningFailed(format!(
                    "Failed to reach wallet at {}: {}",
                    sanitize_error!(self.url),
                    sanitize_error!(e)
                ))
            })?;

        Ok(Box::new(RemoteSession { client: Some(client), auth_token: None }))
    }
}

struct RemoteSession {
    client: Option<HttpClient>,
    auth_token: Option<String>,
}

impl RemoteSession {
    fn client(&self) -> Result<&HttpClient, SolsendError> {
        self.client
            .as_ref()
            .ok_or_else(|| SolsendError::SigningFailed("Wallet session already closed".to_string()))
    }
}

#[async_trait]
impl WalletSession for RemoteSession {
    async fn authorize(
        &mut self,
        network: Network,
        identity: &AppIdentity,
    ) -> Result<AuthorizationResult, SolsendError> {
        let request = AuthorizeRequest { identity, cluster: network.cluster() };
        let result: AuthorizationResult =
            self.client()?.request(AUTHORIZE_METHOD, rpc_params![request]).await?;

        log::debug!("Wallet authorized {} account(s)", result.accounts.len());
        self.auth_token = Some(result.auth_token.clone());
        Ok(result)
    }

    async fn sign_transactions(
        &mut self,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, SolsendError> {
        let Some(auth_token) = self.auth_token.clone() else {
            return Err(SolsendError::SigningFailed("Session is not authorized".to_string()));
        };

        let request = SignTransactionsRequest {
            auth_token,
            payloads: payloads
                .iter()
                .map(|payload| TransactionUtil::encode_b64(payload))
                .collect(),
        };
        let response: SignTransactionsResponse =
            self.client()?.request(SIGN_TRANSACTIONS_METHOD, rpc_params![request]).await?;

        response
            .signed_payloads
            .iter()
            .map(|payload| STANDARD.decode(payload).map_err(SolsendError::from))
            .collect()
    }

    async fn close(&mut self) {
        self.auth_token = None;
        self.client = None;
    }
}
