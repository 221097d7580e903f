mod cache;
pub mod errors;
pub(crate) mod key_lock;
pub mod render;
pub(crate) mod resolver;
pub mod source;
pub(crate) mod staging;
pub mod traits;

pub use cache::{Resolved, ThumbCache};
