use std::sync::Arc;

use axum::{
    body::Body,
    debug_handler,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::WithRejection;
use common::thumbnail::ThumbResult;
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use crate::{ServerState, routes::error_message_erasure::ApiError, telemetry::emit_metrics};

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub(crate) struct Payload {
    videoid: String,
    user_id: String,
}

/// Serves the cached PNG, or redirects to the fallback image
#[debug_handler]
pub(crate) async fn thumb_handler(
    State(state): State<Arc<ServerState>>,
    WithRejection(Query(query), _): WithRejection<Query<Payload>, ApiError>,
) -> Response {
    let outcome = state.thumbs.resolve(&query.videoid, &query.user_id).await;

    emit_metrics(&outcome);

    let path = match state.thumbs.collapse(outcome) {
        ThumbResult::CacheHit(path) => path,
        ThumbResult::Fallback(url) => return Redirect::temporary(&url).into_response(),
    };

    let image = match fs::read(&path).await {
        Ok(image) => image,
        Err(err) => {
            warn!("Failed to read {}: {err}", path.display());
            return Redirect::temporary(&state.thumbs.config().fallback_url).into_response();
        }
    };

    let headers = [(header::CONTENT_TYPE, "image/png")];

    (headers, Body::from(image)).into_response()
}
