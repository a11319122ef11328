use crate::common::*;
use solsend_lib::{config::Network, error::SolsendError};

#[tokio::test]
async fn test_connect_stores_canonical_account() {
    let ctx = TestContext::approving(LedgerScript::new());

    let account = ctx.client.connect().await.expect("connect should succeed");

    // The wallet hands back base64; the session holds the decoded key
    assert_eq!(account, ctx.wallet_pubkey);
    assert_eq!(ctx.client.session().account, Some(ctx.wallet_pubkey));
    assert!(ctx.client.status().connected);
    assert_eq!(ctx.wallet.authorized_networks(), vec![Network::Devnet]);
    assert_eq!(ctx.wallet.opened(), 1);
    assert_eq!(ctx.wallet.closed(), 1);
}

#[tokio::test]
async fn test_disconnect_clears_account() {
    let ctx = TestContext::approving(LedgerScript::new());
    ctx.client.connect().await.unwrap();

    ctx.client.disconnect();

    assert_eq!(ctx.client.session().account, None);
    assert!(!ctx.client.status().connected);
    assert_eq!(
        ctx.client.send_value(RECIPIENT_PUBKEY, 1.0).await,
        Err(SolsendError::NotConnected)
    );
}

#[tokio::test]
async fn test_connect_uses_selected_network() {
    let ctx = TestContext::approving(LedgerScript::new());
    ctx.client.set_network(Network::Mainnet);

    ctx.client.connect().await.unwrap();

    assert_eq!(ctx.wallet.authorized_networks(), vec![Network::Mainnet]);
    assert_eq!(ctx.client.session().network, Network::Mainnet);
}

#[tokio::test]
async fn test_balance_of_connected_account() {
    let ctx = TestContext::approving(LedgerScript::new().balance(2_500_000_000));

    assert_eq!(ctx.client.get_balance().await.unwrap(), 0.0);

    ctx.client.connect().await.unwrap();
    assert_eq!(ctx.client.get_balance().await.unwrap(), 2.5);
}
