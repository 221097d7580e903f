use std::env;

use axum::http::{HeaderValue, Method};
use tower::{
    ServiceBuilder,
    layer::util::{Identity, Stack},
};
use tower_http::cors::CorsLayer;

pub(crate) fn build_service_layers() -> ServiceBuilder<Stack<CorsLayer, Identity>> {
    let origin = env::var("API_ALLOWED_ORIGIN").unwrap_or("http://localhost:3000".into());

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(
            origin
                .parse::<HeaderValue>()
                .expect("API_ALLOWED_ORIGIN to be a valid header value"),
        );

    ServiceBuilder::new().layer(cors_layer)
}
