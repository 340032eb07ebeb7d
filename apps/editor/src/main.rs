mod binder;
mod config;
mod editor;
mod errors;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::binder::preview::Preview;
use crate::config::{Config, StorageKind};
use crate::editor::Editor;
use crate::routes::build_app;
use crate::state::AppState;
use crate::store::storage::{FileStorage, MemoryStorage, StorageBackend};
use crate::store::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Editor v{}", env!("CARGO_PKG_VERSION"));

    let store = ResumeStore::open(build_storage(&config), config.storage_key.clone());

    // Stands in for the page's icon pass, which only needs to know a render happened.
    let preview = Preview::new().with_post_render(|| debug!("Preview rendered"));
    let editor = Editor::new(store, preview.clone());

    let state = AppState::new(editor, preview, config.clone());

    let app = build_app(state);

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_storage(config: &Config) -> Box<dyn StorageBackend> {
    match config.storage_kind {
        StorageKind::File => {
            let storage = FileStorage::new(&config.storage_dir);
            info!("Persisting resume under {}", storage.dir().display());
            Box::new(storage)
        }
        StorageKind::Memory => {
            info!("Using in-memory storage; edits will not survive a restart");
            Box::new(MemoryStorage::new())
        }
    }
}
