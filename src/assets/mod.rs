/// Asset loading module
///
/// This module handles:
/// - Resolving local paths and URLs (source.rs)
/// - Fetching and parsing the metadata document (metadata.rs)
/// - Fetching, decoding and downscaling tile images (thumbnail.rs)

pub mod metadata;
pub mod source;
pub mod thumbnail;

pub use source::{http_client, Location};
