//! Compliance assistant server binary
//!
//! Run with: cargo run -p compliance-assistant --bin compliance-assistant-server

use clap::Parser;
use compliance_assistant::{config::AssistantConfig, server::ComplianceServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "compliance-assistant-server", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config and HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compliance_assistant=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                  Compliance Assistant                     ║
║        Document Q&A, FAQ Chat and Mock Trade Docs         ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let mut config = AssistantConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Gemini model: {}", config.gemini.model);
    tracing::info!("  - QA model dir: {}", config.qa_model.model_dir.display());
    tracing::info!("  - Upload dir: {}", config.storage.upload_dir.display());
    tracing::info!("  - CORS origins: {}", config.server.cors_origins.join(", "));

    // Create and start server
    let server = ComplianceServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST   /ask                  - Ask about a PDF");
    println!("  POST   /faq/start            - Start an FAQ session");
    println!("  POST   /faq/ask              - Ask within a session");
    println!("  DELETE /faq/end/:session_id  - End a session");
    println!("  POST   /answer               - Local extractive QA");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
