use std::{io, path::PathBuf};

use common::cache_key::CacheKeyError;
use crawler::errors::CrawlerError;
use image::ImageError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("no thumbnail tier returned 200")]
    NoTierAvailable,
    #[error(transparent)]
    Session(#[from] CrawlerError),
}

#[derive(Error, Debug)]
pub enum ThumbError {
    #[error("Invalid cache key: {0}")]
    InvalidKey(#[from] CacheKeyError),
    #[error("Failed to fetch thumbnail for {videoid}: {cause}")]
    FetchFailed {
        videoid: String,
        #[source]
        cause: FetchFailure,
    },
    #[error("Failed to decode thumbnail at {path}: {source}")]
    DecodeFailed {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("Failed to encode rendered thumbnail: {0}")]
    EncodeFailed(#[source] ImageError),
    #[error("Failed to persist {path}: {source}")]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Render task did not complete")]
    RenderAborted(#[from] JoinError),
}

impl ThumbError {
    pub(crate) fn persist(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::PersistFailed {
            path: path.into(),
            source,
        }
    }
}
