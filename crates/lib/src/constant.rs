pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const PUBKEY_BYTES: usize = 32;

// Largest lamport amount that survives a round trip through an f64 SOL value.
pub const MAX_EXACT_LAMPORTS: u64 = 1 << 51;

// Cluster endpoints
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 90;

// App identity presented to the wallet on every authorization
pub const DEFAULT_APP_NAME: &str = "SolScan";
pub const DEFAULT_APP_URI: &str = "https://solscan-app.com";
pub const DEFAULT_APP_ICON: &str = "favicon.ico";

// Submission
pub const MAX_SEND_ATTEMPTS: u8 = 3;
pub const DEFAULT_MAX_RPC_RETRIES: usize = 2;
pub const DEFAULT_POST_SIGN_QUIESCENCE_MS: u64 = 1_000; // wallet hand-off back to the app
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const MAX_CONSECUTIVE_POLL_ERRORS: u32 = 5;

// Explorer
pub const EXPLORER_TX_URL: &str = "https://solscan.io/tx";
