use image_cache::{Resolved, errors::ThumbError};
use metrics::{Metrics, put_metric};

pub(crate) fn emit_metrics(outcome: &Result<Resolved, ThumbError>) {
    let metric = match outcome {
        Ok(Resolved {
            from_cache: true, ..
        }) => Metrics::ThumbCacheHit,
        Ok(_) => Metrics::ThumbRendered,
        Err(ThumbError::InvalidKey(_)) => Metrics::ThumbInvalidKey,
        Err(ThumbError::FetchFailed { .. }) => Metrics::ThumbFetchFailed,
        Err(
            ThumbError::DecodeFailed { .. }
            | ThumbError::EncodeFailed(_)
            | ThumbError::RenderAborted(_),
        ) => Metrics::ThumbRenderFailed,
        Err(ThumbError::PersistFailed { .. }) => Metrics::ThumbPersistFailed,
    };

    put_metric!(metric, 1);
}
