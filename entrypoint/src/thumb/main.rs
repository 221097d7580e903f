use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use common::config::{
    DEFAULT_CACHE_DIR, DEFAULT_FALLBACK_URL, DEFAULT_THUMBNAIL_HOST, ThumbConfig,
};
use image_cache::ThumbCache;
use tracing::error;
use utils::logger::configure_logger;

/// Resolve a video thumbnail to a fullscreen PNG in the local cache,
/// printing its path or the fallback URL
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    videoid: String,
    /// Chat or user id, negative ids are accepted
    #[arg(allow_hyphen_values = true)]
    user_id: String,
    #[arg(long, env = "THUMB_CACHE_DIR", default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,
    #[arg(long, env = "YOUTUBE_IMG_URL", default_value = DEFAULT_FALLBACK_URL)]
    fallback_url: String,
    #[arg(long, env = "THUMB_SOURCE_HOST", default_value = DEFAULT_THUMBNAIL_HOST)]
    thumbnail_host: String,
}

impl From<&Args> for ThumbConfig {
    fn from(args: &Args) -> Self {
        ThumbConfig::default()
            .set_cache_dir(&args.cache_dir)
            .set_fallback_url(&args.fallback_url)
            .set_thumbnail_host(&args.thumbnail_host)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    configure_logger();

    let args = Args::parse();

    let thumbs = match ThumbCache::init(ThumbConfig::from(&args)).await {
        Ok(thumbs) => thumbs,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let result = thumbs.get_thumb(&args.videoid, &args.user_id).await;

    println!("{result}");

    ExitCode::SUCCESS
}
