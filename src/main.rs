//! Webhook ingestion server.
//!
//! ```text
//!   sipgate / WhatsApp / test callers
//!        │
//!        ▼
//!   ┌────────────────────────────────────────────────────────┐
//!   │  CORS · body limit · request ID · trace                │
//!   │        │                                               │
//!   │        ▼                                               │
//!   │  body decoding ──(malformed JSON)──▶ 400               │
//!   │        │                                               │
//!   │        ▼                                               │
//!   │  request log ──▶ dispatcher ──▶ handler ──▶ JSON 200   │
//!   │                                   │                    │
//!   │                                   ▼                    │
//!   │                        simulated downstream (log)      │
//!   └────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use webhook_ingest::lifecycle::{signals, startup, Overrides, Shutdown};
use webhook_ingest::observability::init_tracing;
use webhook_ingest::HttpServer;

#[derive(Parser)]
#[command(name = "webhook-ingest")]
#[command(about = "Receives, logs and normalizes webhook calls", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "WEBHOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind.
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level (RUST_LOG takes precedence).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::resolve_config(cli.config.as_deref(), cli.overrides())?;
    init_tracing(&config.observability).map_err(startup::StartupError::from)?;

    tracing::info!("webhook-ingest v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        log_level = %config.observability.log_level,
        "Configuration loaded"
    );

    let listener = startup::bind(&config.listener).await?;
    startup::log_banner(&config, listener.local_addr()?);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_watcher(shutdown);

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
