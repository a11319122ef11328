pub mod address;
pub mod balance;
pub mod broadcast;
pub mod config;
pub mod constant;
pub mod error;
pub mod log;
pub mod rpc;
pub mod sanitize;
pub mod signer;
pub mod state;
pub mod transaction;
pub mod wallet;
pub use config::Config;
pub use error::SolsendError;
pub use state::SessionStore;
pub use wallet::{WalletClient, WalletStatus};
