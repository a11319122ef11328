// Wallet flow tests
//
// SETUP: WalletClient on devnet with a fake keypair-backed wallet and a
//        scripted ledger, no network
// TESTS: End-to-end connect, balance and send flows
//        - Connect stores the wallet's account and disconnect clears it
//        - Sends build the right transfer and report its signature
//        - Invalid input never reaches the wallet or the ledger
//        - Transient send failures are retried with backoff

mod connect;
mod retry;

// Make common utilities available
#[path = "../src/common/mod.rs"]
mod common;
