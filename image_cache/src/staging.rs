use std::{io::Write, path::Path};

use common::cache_key::CacheKey;
use tempfile::{Builder, NamedTempFile};

use crate::errors::ThumbError;

/// Writes downloaded bytes to `temp_<videoid>_<random>.jpg`, removed on drop
pub(crate) fn stage_download(
    cache_dir: &Path,
    key: &CacheKey,
    image_bytes: &[u8],
) -> Result<NamedTempFile, ThumbError> {
    let mut download = Builder::new()
        .prefix(&format!("temp_{}_", key.videoid()))
        .suffix(".jpg")
        .tempfile_in(cache_dir)
        .map_err(|err| ThumbError::persist(cache_dir, err))?;

    download
        .write_all(image_bytes)
        .map_err(|err| ThumbError::persist(download.path(), err))?;

    Ok(download)
}

/// Writes the PNG beside `final_path` and renames it into place
pub(crate) fn persist_png(
    cache_dir: &Path,
    key: &CacheKey,
    png: &[u8],
    final_path: &Path,
) -> Result<(), ThumbError> {
    let mut partial = Builder::new()
        .prefix(&format!("{}.", key.file_name()))
        .suffix(".part")
        .tempfile_in(cache_dir)
        .map_err(|err| ThumbError::persist(cache_dir, err))?;

    partial
        .write_all(png)
        .map_err(|err| ThumbError::persist(partial.path(), err))?;

    partial
        .persist(final_path)
        .map_err(|err| ThumbError::persist(final_path, err.error))?;

    Ok(())
}
