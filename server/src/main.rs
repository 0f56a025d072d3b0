use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use rank_core::RankerConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use server::{build_app, ServerConfig};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// JSON ranker configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let ranker = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            RankerConfig::from_json_str(&json)?
        }
        None => RankerConfig::default(),
    };
    let app: Router = build_app(ServerConfig::from_env(ranker)?)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
