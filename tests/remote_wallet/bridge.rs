use crate::common::*;
use solana_sdk::{signature::Keypair, signer::Signer};
use solsend_lib::{error::SolsendError, signer::RemoteWallet};
use std::{sync::Arc, time::Duration};

fn remote_client(url: &str, script: LedgerScript) -> (solsend_lib::WalletClient, Arc<LedgerLog>) {
    let (rpc, ledger) = script.build();
    let wallet = RemoteWallet::new(url, Duration::from_secs(5));
    (build_client(Arc::new(wallet), rpc), ledger)
}

#[tokio::test]
async fn test_connect_and_send_through_bridge() {
    let keypair = Arc::new(Keypair::new());
    let (url, _handle) = start_signing_wallet(Arc::clone(&keypair)).await;
    let (client, ledger) = remote_client(&url, LedgerScript::new());

    let account = client.connect().await.expect("bridge should authorize");
    assert_eq!(account, keypair.pubkey());

    let receipt = client.send_value(RECIPIENT_PUBKEY, 0.5).await.expect("send should succeed");

    let transaction = ledger.last_sent_transaction();
    assert_eq!(transaction.signatures[0], receipt.signature);
    assert!(receipt.signature.verify(keypair.pubkey().as_ref(), &transaction.message.serialize()));
    assert_eq!(transaction.message.static_account_keys()[0], keypair.pubkey());
}

#[tokio::test]
async fn test_bridge_going_away_fails_signing() {
    let keypair = Arc::new(Keypair::new());
    let (url, handle) = start_signing_wallet(keypair).await;
    let (client, ledger) = remote_client(&url, LedgerScript::new());
    client.connect().await.unwrap();

    handle.stop().unwrap();
    handle.stopped().await;

    let result = client.send_value(RECIPIENT_PUBKEY, 0.5).await;

    assert!(matches!(result, Err(SolsendError::SigningFailed(_))), "got {result:?}");
    assert!(ledger.sent().is_empty());
    assert!(client.status().connected, "a lost wallet does not drop the session");
}
