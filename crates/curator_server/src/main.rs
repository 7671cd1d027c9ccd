//! Server binary: wire the pool, store, capture service, and router.

use curator_capture::CaptureService;
use curator_database::{establish_pool, run_migrations, PgConversationStore, PgDraftStore};
use curator_interface::{ConversationStore, DraftStore};
use curator_server::{create_router, init_tracing, ApiState, ServerConfig};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let pool = establish_pool()?;
    {
        let mut conn = pool.get()?;
        run_migrations(&mut conn)?;
    }

    let conversations: Arc<dyn ConversationStore> = Arc::new(PgConversationStore::new(pool.clone()));
    let store: Arc<dyn DraftStore> = Arc::new(PgDraftStore::new(pool));
    let capture = Arc::new(CaptureService::new(store.clone()));
    let router = create_router(ApiState::new(store, conversations, capture));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
