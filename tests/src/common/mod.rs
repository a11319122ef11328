pub mod constants;
pub mod ledger;
pub mod wallet;
pub mod wallet_server;

pub use constants::*;
pub use context::*;
pub use ledger::*;
pub use wallet::*;
pub use wallet_server::*;
