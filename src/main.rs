use std::sync::Arc;

use anyhow::Context;
use folio::app::{router, AppState};
use folio::config::{Settings, StorageBackend};
use folio::db::blog_repository::{BlogPostRepository, MongoBlogPostRepository};
use folio::db::cv_repository::{CvRepository, MongoCvRepository};
use folio::db::memory::InMemoryContentStore;
use folio::db::project_repository::{MongoProjectRepository, ProjectRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Folio server...");

    let settings = Settings::load().context("Failed to load configuration")?;
    let addr = settings.bind_addr()?;

    let (blog_repo, project_repo, cv_repo): (
        Arc<dyn BlogPostRepository>,
        Arc<dyn ProjectRepository>,
        Arc<dyn CvRepository>,
    ) = match settings.storage.backend {
        StorageBackend::Mongodb => {
            let client = mongodb::Client::with_uri_str(&settings.mongodb.uri)
                .await
                .context("Failed to connect to MongoDB")?;
            let db = client.database(&settings.mongodb.database);
            tracing::info!("Connected to MongoDB at {}", settings.mongodb.uri);
            (
                Arc::new(MongoBlogPostRepository::new(&db)),
                Arc::new(MongoProjectRepository::new(&db)),
                Arc::new(MongoCvRepository::new(&db)),
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; content is lost on restart");
            let store = Arc::new(InMemoryContentStore::default());
            (store.clone(), store.clone(), store)
        }
    };

    let seed = settings.demo.seed;
    let state = AppState::new(blog_repo, project_repo, cv_repo, settings);

    if seed {
        folio::demo_seeder::seed_demo_data(&state).await;
    }

    let app = router(state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
