use crate::common::*;
use solsend_lib::error::SolsendError;
use std::time::Duration;
use tokio::time::Instant;

const BACKOFF: Duration = Duration::from_millis(TEST_BACKOFF_MS);
const QUIESCENCE: Duration = Duration::from_millis(TEST_QUIESCENCE_MS);

#[tokio::test(start_paused = true)]
async fn test_two_transient_failures_then_success() {
    let ctx = TestContext::approving(LedgerScript::new().failing_sends(2));
    ctx.client.connect().await.unwrap();

    let started = Instant::now();
    let receipt = ctx.client.send_value(RECIPIENT_PUBKEY, 1.0).await.expect("third attempt lands");
    let elapsed = started.elapsed();

    assert_eq!(receipt.attempts, 3);
    let sent = ctx.ledger.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|raw| raw == &sent[0]), "every attempt resends the same bytes");
    assert_eq!(receipt.signature, ctx.ledger.last_sent_transaction().signatures[0]);

    // Quiescence plus exactly two backoffs
    assert!(elapsed >= QUIESCENCE + BACKOFF * 2, "elapsed {elapsed:?}");
    assert!(elapsed < QUIESCENCE + BACKOFF * 3, "elapsed {elapsed:?}");

    // The wallet signed once; retries never go back to it
    assert_eq!(ctx.wallet.sign_requests(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn test_send_gives_up_after_three_attempts() {
    let ctx = TestContext::approving(LedgerScript::new().failing_sends(usize::MAX));
    ctx.client.connect().await.unwrap();

    let result = ctx.client.send_value(RECIPIENT_PUBKEY, 1.0).await;

    match result {
        Err(SolsendError::SubmissionFailed { attempts, last_error }) => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("connection reset"), "last_error: {last_error}");
        }
        other => panic!("Expected SubmissionFailed, got {other:?}"),
    }
    assert_eq!(ctx.ledger.sent().len(), 3);
    assert!(!ctx.client.status().sending);
}

#[tokio::test(start_paused = true)]
async fn test_first_send_waits_for_quiescence() {
    let ctx = TestContext::approving(LedgerScript::new());
    ctx.client.connect().await.unwrap();

    let started = Instant::now();
    ctx.client.send_value(RECIPIENT_PUBKEY, 1.0).await.unwrap();

    assert!(started.elapsed() >= QUIESCENCE);
    assert!(started.elapsed() < QUIESCENCE + BACKOFF);
}
