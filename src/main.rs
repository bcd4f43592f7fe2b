//! `nft-mint`: command-line front end for the mint client.
//!
//! The local key in `NFT_MINT_PRIVATE_KEY` plays the part of an injected
//! browser wallet. Without it the client behaves as if no wallet is
//! installed.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use nft_mint_client::blockchain::{LocalWallet, RpcWalletProvider, WalletProvider};
use nft_mint_client::config::{load_config, MintClientConfig};
use nft_mint_client::observability::logging;
use nft_mint_client::{MintApp, Notice, ProviderGateway};

#[derive(Parser)]
#[command(name = "nft-mint")]
#[command(about = "Mint from the MyEpicNFT collection on Sepolia", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the wallet as having authorized this client before.
    #[arg(long)]
    remember: bool,

    /// Print notices as JSON lines.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe for an authorized account and check the network
    Status,
    /// Authorize the wallet and check the network
    Connect,
    /// Connect, mint one token and wait for inclusion
    Mint,
    /// Connect and print every mint notification
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MintClientConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(
        rpc_url = %config.rpc.rpc_url,
        confirmation_blocks = config.rpc.confirmation_blocks,
        "nft-mint v0.1.0 starting"
    );

    let injected = match LocalWallet::from_env()? {
        Some(wallet) => {
            let provider = RpcWalletProvider::new(&config.rpc, wallet, cli.remember)?;
            Some(Arc::new(provider) as Arc<dyn WalletProvider>)
        }
        None => None,
    };
    let mut app = MintApp::new(ProviderGateway::new(injected), &config);
    let out = Printer { json: cli.json };

    out.notices(app.on_mount().await)?;

    match cli.command {
        Commands::Status => {}
        Commands::Connect => connect(&mut app, &out).await?,
        Commands::Mint => {
            connect(&mut app, &out).await?;
            if app.view().show_mint_button {
                out.notices(app.mint_nft().await)?;
            }
        }
        Commands::Watch => {
            connect(&mut app, &out).await?;
            while let Some(notice) = app.next_mint_notice().await {
                out.notice(&notice)?;
            }
        }
    }

    if !cli.json {
        print_status(&app);
    }
    Ok(())
}

async fn connect(app: &mut MintApp, out: &Printer) -> serde_json::Result<()> {
    if app.view().show_connect_button {
        out.notices(app.connect_wallet().await)?;
    }
    Ok(())
}

struct Printer {
    json: bool,
}

impl Printer {
    fn notices(&self, notices: Vec<Notice>) -> serde_json::Result<()> {
        for notice in &notices {
            self.notice(notice)?;
        }
        Ok(())
    }

    fn notice(&self, notice: &Notice) -> serde_json::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(notice)?);
        } else if notice.is_warning() {
            eprintln!("{}", notice);
        } else {
            println!("{}", notice);
        }
        Ok(())
    }
}

fn print_status(app: &MintApp) {
    let view = app.view();
    match view.account {
        Some(account) => println!("Account: {}", account),
        None => println!("Not connected"),
    }
    if let Some(network) = app.session().network() {
        println!("Network: {}", network);
    }
    println!("{} ({})", view.social_label, view.social_link);
}
