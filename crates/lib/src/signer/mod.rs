pub mod keypair_util;
pub mod keypair_wallet;
pub mod protocol;
pub mod remote;
pub mod session;

pub use keypair_util::KeypairUtil;
pub use keypair_wallet::KeypairWallet;
pub use protocol::{AuthorizationResult, AuthorizedAccount, WalletAdapter, WalletSession};
pub use remote::RemoteWallet;
pub use session::SigningSessionManager;
