use frases::config::Config;
use frases::error::Result;
use frases::server;
use frases::state::AppState;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    info!("frases {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    server::serve(state, config.port).await
}
