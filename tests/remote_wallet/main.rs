// Remote wallet tests
//
// SETUP: A local JSON-RPC wallet bridge holding a keypair; the ledger is
//        scripted, so only the wallet leg goes over HTTP
// TESTS: Connect and send through RemoteWallet
//        - Base64 accounts from the bridge decode to the bridge's key
//        - Transactions come back signed by the bridge's key
//        - A bridge that goes away surfaces as a signing failure

mod bridge;

// Make common utilities available
#[path = "../src/common/mod.rs"]
mod common;
