//! Media playlist parsing.

use super::{Manifest, ManifestError, Segment};
use url::Url;

/// Parse an m3u8 media playlist into a `Manifest`, resolving each segment
/// URI against `base`.
///
/// Only media playlists are accepted. A master playlist (variant list) is a
/// parse error: bitrate selection is out of scope, callers must hand us the
/// already-chosen media playlist.
pub fn parse_media_playlist(text: &str, base: &Url) -> Result<Manifest, ManifestError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    match lines.next() {
        Some("#EXTM3U") => {}
        _ => {
            return Err(ManifestError::Parse(
                "not an m3u8 playlist (missing #EXTM3U header)".to_string(),
            ))
        }
    }

    let mut segments = Vec::new();
    for line in lines {
        if line.starts_with("#EXT-X-STREAM-INF") {
            return Err(ManifestError::Parse(
                "master playlist given; a media playlist is required".to_string(),
            ));
        }
        if line.starts_with('#') {
            // Tags and comments (#EXTINF, #EXT-X-*) carry no segment URI.
            continue;
        }
        let uri = base
            .join(line)
            .map_err(|e| ManifestError::Parse(format!("bad segment URI {:?}: {}", line, e)))?;
        segments.push(Segment {
            index: segments.len(),
            uri,
        });
    }

    if segments.is_empty() {
        return Err(ManifestError::Parse(
            "playlist contains no segments".to_string(),
        ));
    }

    Ok(Manifest { segments })
}
