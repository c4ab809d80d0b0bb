use std::path::{Path, PathBuf};

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{PreviewError, PreviewResult};

/// Normalize a caller-supplied poster/font URL into a loadable form.
///
/// Absolute and slash-prefixed URLs (including protocol-relative ones)
/// pass through; bare OSS hosts gain an `https` scheme; anything else is
/// treated as an origin-relative path and prefixed with `/`.
pub fn normalize_source_url(url: &str) -> String {
    if url.starts_with("http") || url.starts_with('/') {
        return url.to_owned();
    }
    if url.contains("oss-") || url.contains("aliyuncs.com") {
        return if url.starts_with("//") {
            format!("https:{url}")
        } else {
            format!("https://{url}")
        };
    }
    format!("/{url}")
}

/// Resolve a normalized URL's path component beneath `assets_root`.
///
/// The scheme and host of absolute URLs are dropped; the renderer only ever
/// reads local files, so `https://cdn.example.com/a/b.png` and `/a/b.png`
/// resolve to the same place.
pub fn resolve_source_path(assets_root: &Path, url: &str) -> PathBuf {
    let s = normalize_source_url(url);
    let path_part = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .map(|rest| rest.find('/').map(|i| &rest[i..]).unwrap_or(""))
        .unwrap_or(&s);
    assets_root.join(path_part.trim_start_matches('/'))
}

/// Load and decode a poster image, degrading to `None` on total failure.
///
/// Two-stage contract: a strict read+decode first, then one tolerant retry
/// that re-reads the file. Failures are logged, never propagated; an absent
/// poster falls back to the synthetic background scene.
pub fn load_poster(assets_root: &Path, url: &str) -> Option<PreparedImage> {
    let path = resolve_source_path(assets_root, url);

    match read_and_decode(&path) {
        Ok(img) => Some(img),
        Err(first) => {
            tracing::warn!(url, error = %first, "poster load failed, retrying");
            match read_and_decode(&path) {
                Ok(img) => Some(img),
                Err(second) => {
                    tracing::warn!(url, error = %second, "all poster load attempts failed");
                    None
                }
            }
        }
    }
}

fn read_and_decode(path: &Path) -> PreviewResult<PreparedImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| PreviewError::asset(format!("read poster '{}': {e}", path.display())))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/poster.rs"]
mod tests;
