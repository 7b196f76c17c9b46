use std::io::Write;

use flate2::{write::GzEncoder, Compression};

use crate::{error::ErrorContext, RepoResult};

/// Wraps `data` in a single gzip member.
pub fn compress(data: &[u8]) -> RepoResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 4), Compression::default());
    encoder
        .write_all(data)
        .with_context(|| "compressing archive".to_string())?;
    encoder
        .finish()
        .with_context(|| "finishing gzip stream".to_string())
}
