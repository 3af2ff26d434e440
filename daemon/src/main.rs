use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use lipikad::config;
use lipikad::editor::EditorState;
use lipikad::server::EditorServer;
use lipikad::translit::HttpTransliterator;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into()))
        .init();

    info!("lipika daemon (lipikad) starting...");

    let config = config::load_config()?;

    let client = HttpTransliterator::new(
        config.service.endpoint.clone(),
        Duration::from_secs(config.service.request_timeout_seconds),
    )?;

    let state = Arc::new(EditorState::new(config, Arc::new(client))?);

    let server = EditorServer::new(shared::socket_path(), Arc::clone(&state));

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received ctrl-c, shutting down");
            state.shutdown().await;
        }
    }

    Ok(())
}
