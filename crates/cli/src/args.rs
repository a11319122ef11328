use clap::{Args, Parser};
use solsend_lib::{config::Network, log::LoggingFormat};
use std::path::PathBuf;

/// Global arguments used by all subcommands
#[derive(Debug, Parser)]
#[command(name = "solsend")]
pub struct GlobalArgs {
    /// Path to solsend configuration file (TOML format)
    #[arg(long, env = "SOLSEND_CONFIG", default_value = "solsend.toml")]
    pub config: PathBuf,

    /// Cluster to use for this and later commands; overrides the stored session
    #[arg(long, env = "SOLSEND_NETWORK")]
    pub network: Option<Network>,

    #[arg(long, value_enum, default_value = "standard")]
    pub logging_format: LoggingFormat,

    /// Where the session is kept between runs (defaults to the user data directory)
    #[arg(long, env = "SOLSEND_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(flatten)]
    pub wallet: WalletArgs,
}

#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct WalletArgs {
    /// JSON-RPC endpoint of a remote wallet
    #[arg(long, env = "SOLSEND_WALLET_URL", help_heading = "Wallet Options")]
    pub wallet_url: Option<String>,

    /// Local keypair: a keypair file path, base58 secret key or [u8] array
    #[arg(long, env = "SOLSEND_KEYPAIR", help_heading = "Wallet Options", hide_env_values = true)]
    pub keypair: Option<String>,
}
