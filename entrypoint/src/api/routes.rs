pub(crate) mod error_message_erasure;
pub(crate) mod thumb;
