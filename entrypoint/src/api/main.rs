mod routes;
mod service_layers;
mod telemetry;

use std::{env, sync::Arc};

use axum::{Router, routing::get};
use common::config::ThumbConfig;
use image_cache::ThumbCache;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use utils::logger::configure_logger;

use crate::{routes::thumb::thumb_handler, service_layers::build_service_layers};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub(crate) struct ServerState {
    pub(crate) thumbs: ThumbCache,
}

#[tokio::main]
async fn main() {
    configure_logger();

    let host = env::var("API_HOST").unwrap_or("0.0.0.0".into());
    let port = env::var("API_PORT").unwrap_or("8080".into());
    let address = format!("{host}:{port}");

    let thumbs = ThumbCache::init(ThumbConfig::from_env())
        .await
        .expect("Failed to initialize thumbnail cache");

    info!("Caching thumbnails in {}", thumbs.config().cache_dir.display());

    let state = Arc::new(ServerState { thumbs });

    let app = Router::new()
        .route("/thumb", get(thumb_handler))
        .layer(build_service_layers())
        .with_state(state);

    let listener = TcpListener::bind(&address)
        .await
        .expect("Failed to bind API listener");

    info!("Listening on {address}");

    axum::serve(listener, app).await.expect("API server failed");
}
