use std::sync::Arc;
use tracing::info;

use vpn_shell::app::AppShell;
use vpn_shell::config::Config;
use vpn_shell::web::server::WebServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vpn_shell=info".into()),
        )
        .init();

    info!("🛡️ vpn-shell v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "vpn-shell.toml".to_string());

    let config = Config::load(&config_path)?;
    info!("Config loaded from {}", config_path);

    let config = Arc::new(config);

    // One in-memory session: catalog, connection, chat, premium
    let shell = Arc::new(AppShell::new(config.clone())?);

    let web = WebServer::new(shell, config);
    web.run().await
}
