//! Keywarden license console.
//!
//! Explicit command dispatch for the license manager: every operation is a
//! subcommand, nothing runs implicitly on a timer or framework hook.
//!
//! Usage:
//!   keywarden --site-url https://shop.example activate KW-XXXX-XXXX
//!   keywarden --site-url https://shop.example status

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keywarden_console::build_router;
use keywarden_license::{ActivationOutcome, LicenseManager, ManagerConfig};
use keywarden_store::JsonFileStore;
use std::{path::PathBuf, sync::Arc};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "keywarden")]
#[command(about = "License activation console")]
struct Args {
    /// Path to the JSON config store
    #[arg(long, default_value = "keywarden.json")]
    store: PathBuf,

    /// Licensing endpoint base URL
    #[arg(long, default_value = "https://licensing.keywarden.dev/")]
    api_url: String,

    /// Store namespace for this product's record
    #[arg(long, default_value = "keywarden")]
    namespace: String,

    /// Product id on the licensing server
    #[arg(long, default_value = "1")]
    item_id: String,

    /// Product name on the licensing server
    #[arg(long, default_value = "Keywarden")]
    item_name: String,

    /// Site origin the license is bound to
    #[arg(long)]
    site_url: String,

    /// Environment reported to the server
    #[arg(long, default_value = "production")]
    environment: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Activate a license key (falls back to the stored key)
    Activate {
        /// The license key; omit to re-activate the stored one
        key: Option<String>,
    },
    /// Release this site's activation and clear the stored key
    Deactivate,
    /// Refresh the cached status from the server
    Check {
        /// Bypass the check-interval gate
        #[arg(short, long)]
        force: bool,
    },
    /// Print the stored license record
    Status,
    /// Serve the record read-only over HTTP
    Serve {
        /// Port for the status endpoint
        #[arg(long, default_value = "4060")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let store = JsonFileStore::open(&args.store)
        .with_context(|| format!("opening store at {}", args.store.display()))?;

    let mut config = ManagerConfig::new(
        &args.api_url,
        &args.namespace,
        &args.item_id,
        &args.item_name,
        &args.site_url,
    );
    config.environment = args.environment.clone();
    let manager = Arc::new(LicenseManager::new(config, Arc::new(store))?);

    match args.command {
        Command::Activate { key } => match manager.activate(key.as_deref()).await {
            Ok(ActivationOutcome::Activated) => println!("License activated successfully."),
            Ok(ActivationOutcome::NoKey) => {
                println!("No license key supplied or stored; nothing to do.")
            }
            Err(e) => {
                eprintln!("License activation failed: {e}.");
                std::process::exit(1);
            }
        },
        Command::Deactivate => match manager.deactivate().await {
            Ok(()) => println!("License deactivated successfully."),
            Err(e) => {
                eprintln!("License deactivation failed: {e}.");
                std::process::exit(1);
            }
        },
        Command::Check { force } => {
            manager.check_status(force).await;
            let record = manager.query_state()?;
            println!("license status: {} ({})", record.status, record.status.describe());
        }
        Command::Status => {
            let record = manager.query_state()?;
            println!("status:     {} ({})", record.status, record.status.describe());
            match record.masked_key() {
                Some(masked) => println!("key:        {masked}"),
                None => println!("key:        (none)"),
            }
            match record.last_checked_at {
                Some(at) => println!("last check: {}", at.to_rfc3339()),
                None => println!("last check: never"),
            }
        }
        Command::Serve { port } => {
            let app = build_router(manager);
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
                .await
                .with_context(|| format!("binding HTTP listener on port {port}"))?;
            info!("serving license status on http://127.0.0.1:{port}/api/v1/license");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
