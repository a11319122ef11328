mod args;
mod session_file;

use args::{GlobalArgs, WalletArgs};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use solsend_lib::{
    address::AddressCodec,
    broadcast::SubmissionPolicy,
    config::{Config, Network},
    constant::EXPLORER_TX_URL,
    error::SolsendError,
    log::setup_logging,
    rpc::ClusterRpc,
    signer::{KeypairWallet, RemoteWallet, SigningSessionManager, WalletAdapter, WalletSession},
    transaction::parse_amount,
    SessionStore, WalletClient,
};
use std::sync::Arc;

#[derive(Subcommand)]
enum Commands {
    /// Ask the wallet for access and remember the account it grants
    Connect,
    /// Forget the connected account
    Disconnect,
    /// Show the connected account's balance
    Balance,
    /// Send SOL from the connected account
    Send {
        /// Recipient address, base58 or base64
        #[arg(long)]
        to: String,

        /// Amount in SOL, e.g. 1.5
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// Show the stored session
    Status,
    /// Select the cluster for later commands
    Network {
        #[arg(value_enum)]
        network: Network,
    },
}

#[derive(Parser)]
#[command(author, version, about = "solsend - connect a Solana wallet and send SOL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

/// Stands in when neither `--wallet-url` nor `--keypair` was given, so
/// commands that never touch the wallet still work.
struct NoWallet;

#[async_trait]
impl WalletAdapter for NoWallet {
    async fn open_session(&self) -> Result<Box<dyn WalletSession>, SolsendError> {
        Err(SolsendError::SigningFailed(
            "No wallet configured; pass --wallet-url or --keypair".to_string(),
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(&cli.global_args.logging_format);

    let config = Config::load_or_default(&cli.global_args.config).unwrap_or_else(|e| {
        print_error(&format!("Failed to load config: {e}"));
        std::process::exit(1);
    });

    let Some(command) = cli.command else {
        print_usage();
        return Ok(());
    };

    let session_path = cli.global_args.session_file.clone().or_else(session_file::default_path);
    let store = Arc::new(SessionStore::new(config.network.default));
    if let Some(snapshot) = session_path.as_deref().and_then(session_file::load) {
        if let Err(e) = store.restore(&snapshot) {
            log::warn!("Discarding stored session: {e}");
        }
    }
    if let Some(network) = cli.global_args.network {
        store.set_network(network);
    }

    let adapter = build_wallet_adapter(&cli.global_args.wallet, &config).unwrap_or_else(|e| {
        print_error(&format!("Failed to set up wallet: {e}"));
        std::process::exit(1);
    });

    let client = WalletClient::new(
        Arc::clone(&store),
        SigningSessionManager::new(adapter, config.app_identity.clone()),
        ClusterRpc::from_config(&config.network).into_dyn(),
        SubmissionPolicy::from(&config.submission),
    );

    let outcome = run_command(&client, command).await;

    if let Some(path) = session_path.as_deref() {
        if let Err(e) = session_file::save(path, &store.snapshot()) {
            log::warn!("Failed to save session: {e:#}");
        }
    }

    if let Err(e) = outcome {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn build_wallet_adapter(
    wallet: &WalletArgs,
    config: &Config,
) -> Result<Arc<dyn WalletAdapter>, SolsendError> {
    if let Some(url) = &wallet.wallet_url {
        return Ok(Arc::new(RemoteWallet::new(url.clone(), config.network.rpc_timeout())));
    }
    if let Some(keypair) = &wallet.keypair {
        return Ok(Arc::new(KeypairWallet::from_private_key_string(keypair)?));
    }
    Ok(Arc::new(NoWallet))
}

async fn run_command(client: &WalletClient, command: Commands) -> Result<(), SolsendError> {
    match command {
        Commands::Connect => {
            let account = client.connect().await?;
            println!("{}", connected_message(&account, client.session().network));
        }
        Commands::Disconnect => {
            client.disconnect();
            println!("Disconnected");
        }
        Commands::Balance => {
            let session = client.session();
            let balance = client.get_balance().await?;
            match session.account {
                Some(account) => println!(
                    "{} SOL ({} on {})",
                    balance,
                    AddressCodec::shorten(&account),
                    session.network
                ),
                None => println!("{balance} SOL (not connected)"),
            }
        }
        Commands::Send { to, amount } => {
            let amount = parse_amount(&amount)?;
            let network = client.session().network;

            match client.send_value(&to, amount).await {
                Ok(receipt) => {
                    println!("Sent {amount} SOL to {to}");
                    println!("Signature: {}", receipt.signature);
                    println!("Explorer: {}", explorer_url(&receipt.signature, network));
                }
                Err(SolsendError::ConfirmationTimeout { signature, reason }) => {
                    println!(
                        "Transaction {signature} was sent but its outcome is unknown ({reason})."
                    );
                    println!("Check the signature on an explorer before sending again.");
                    return Err(SolsendError::ConfirmationTimeout { signature, reason });
                }
                Err(e) => return Err(e),
            }
        }
        Commands::Status => {
            let status = serde_json::json!({
                "session": client.session_store().snapshot(),
                "status": client.status(),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Network { network } => {
            client.set_network(network);
            println!("Network set to {network}");
        }
    }

    Ok(())
}

fn connected_message(account: &Pubkey, network: Network) -> String {
    format!("Connected {} on {network}", AddressCodec::encode(account))
}

fn explorer_url(signature: &Signature, network: Network) -> String {
    if network.is_test() {
        format!("{EXPLORER_TX_URL}/{signature}?cluster={}", network.cluster())
    } else {
        format!("{EXPLORER_TX_URL}/{signature}")
    }
}

fn print_error(message: &str) {
    eprintln!("Error: {message}");
}

fn print_usage() {
    println!("No command specified. Use --help for usage information.");
    println!("Available commands:");
    println!("  connect                           - Connect a wallet");
    println!("  disconnect                        - Forget the connected account");
    println!("  balance                           - Show the balance in SOL");
    println!("  send --to <ADDRESS> --amount <SOL> - Send SOL");
    println!("  status                            - Show the stored session");
    println!("  network <devnet|mainnet>          - Select the cluster");
}
