//! HLS media playlist loading.
//!
//! Fetches an m3u8 media playlist over HTTP and parses it into an ordered
//! list of segments. Segment URIs in the playlist may be relative; they are
//! resolved against the manifest's own base location (the manifest URL with
//! its last path component removed). No retry at this layer: a manifest
//! failure aborts the whole session.

mod parse;

pub use parse::parse_media_playlist;

use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest fetch failed: {0}")]
    Fetch(#[from] curl::Error),
    #[error("manifest fetch returned HTTP {0}")]
    Http(u32),
    #[error("manifest parse failed: {0}")]
    Parse(String),
}

/// One indexed chunk of the stream. `index` is the playlist position and
/// defines the final concatenation order.
#[derive(Debug, Clone)]
pub struct Segment {
    pub index: usize,
    pub uri: Url,
}

/// Ordered segment list for one stream. Immutable once loaded; indices are
/// dense (0..N-1) by construction.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub segments: Vec<Segment>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Fetch and parse the media playlist at `manifest_url`.
pub fn load(manifest_url: &str) -> Result<Manifest, ManifestError> {
    let base = Url::parse(manifest_url)
        .map_err(|e| ManifestError::Parse(format!("invalid manifest URL: {}", e)))?;
    let body = fetch_bytes(manifest_url)?;
    let text = String::from_utf8_lossy(&body);
    let manifest = parse_media_playlist(&text, &base)?;
    tracing::info!(
        segments = manifest.len(),
        url = manifest_url,
        "loaded media playlist"
    );
    Ok(manifest)
}

/// GET `url` and return the response body. Non-2xx is an error.
fn fetch_bytes(url: &str) -> Result<Vec<u8>, ManifestError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(10))?;
    easy.timeout(Duration::from_secs(30))?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(ManifestError::Http(code));
    }
    Ok(body)
}
