use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::LazyLock,
};

use regex::Regex;
use thiserror::Error;

static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

// no underscores, the last '_' in a cache file name splits the key
static USER_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[A-Za-z0-9]{1,64}$").unwrap());

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheKeyError {
    #[error("Video id is not file name safe: {0:?}")]
    InvalidVideoId(String),
    #[error("User id is not file name safe: {0:?}")]
    InvalidUserId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    videoid: String,
    user_id: String,
}

impl CacheKey {
    pub fn new(videoid: impl ToString, user_id: impl ToString) -> Result<Self, CacheKeyError> {
        let videoid = videoid.to_string();
        let user_id = user_id.to_string();

        if !VIDEO_ID_REGEX.is_match(&videoid) {
            return Err(CacheKeyError::InvalidVideoId(videoid));
        }

        if !USER_ID_REGEX.is_match(&user_id) {
            return Err(CacheKeyError::InvalidUserId(user_id));
        }

        Ok(Self { videoid, user_id })
    }

    pub fn videoid(&self) -> &str {
        &self.videoid
    }

    pub fn file_name(&self) -> String {
        format!("{}_{}.png", self.videoid, self.user_id)
    }
}

impl Display for CacheKey {
    fn fmt(&self, format: &mut Formatter) -> FmtResult {
        write!(format, "{}_{}", self.videoid, self.user_id)
    }
}
