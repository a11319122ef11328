use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonrpsee::{
    core::Error as RpcServerError,
    server::{ServerBuilder, ServerHandle},
    RpcModule,
};
use serde_json::{json, Value};
use solana_sdk::{signature::Keypair, signer::Signer, transaction::VersionedTransaction};
use std::{net::SocketAddr, sync::Arc};

/// A wallet bridge that holds `keypair` and signs whatever it is sent.
///
/// Returns the endpoint url and the handle keeping the server alive.
pub async fn start_signing_wallet(keypair: Arc<Keypair>) -> (String, ServerHandle) {
    let server = ServerBuilder::default()
        .http_only()
        .build("127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();

    let mut module = RpcModule::new(keypair);
    module
        .register_method("authorize", |params, keypair| {
            let request: Value = params.one()?;
            let cluster = request["cluster"].as_str().unwrap_or_default();
            Ok(json!({
                "accounts": [{
                    "address": STANDARD.encode(keypair.pubkey().to_bytes()),
                    "label": format!("bridge ({cluster})"),
                }],
                "auth_token": "bridge-token",
            }))
        })
        .unwrap();
    module
        .register_method("sign_transactions", |params, keypair| {
            let request: Value = params.one()?;
            if request["auth_token"] != "bridge-token" {
                return Err(RpcServerError::Custom("unknown auth token".to_string()));
            }
            let payloads = request["payloads"].as_array().cloned().unwrap_or_default();

            let mut signed_payloads = Vec::with_capacity(payloads.len());
            for payload in payloads {
                let bytes = STANDARD
                    .decode(payload.as_str().unwrap_or_default())
                    .map_err(|e| RpcServerError::Custom(e.to_string()))?;
                let mut transaction: VersionedTransaction = bincode::deserialize(&bytes)
                    .map_err(|e| RpcServerError::Custom(e.to_string()))?;
                let signature = keypair.sign_message(&transaction.message.serialize());
                transaction.signatures[0] = signature;
                let signed = bincode::serialize(&transaction)
                    .map_err(|e| RpcServerError::Custom(e.to_string()))?;
                signed_payloads.push(STANDARD.encode(signed));
            }

            Ok(json!({ "signed_payloads": signed_payloads }))
        })
        .unwrap();

    let handle = server.start(module).unwrap();
    (format!("http://{addr}"), handle)
}
