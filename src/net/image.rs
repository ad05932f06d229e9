//! Image settling for texture bakes.
//!
//! Bake threads block on their fragment's images, so instead of a per-frame
//! poll loop the crate keeps one shared settle cache: every URL is fetched
//! and decoded at most once, and a failed fetch is recorded so the same URL
//! never hangs a later bake. Success and failure both count as "settled".

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Shared fetch-and-decode cache keyed by URL.
///
/// The mutex is held only for lookup and insert, never across a network
/// fetch; two threads racing on the same URL may both fetch, last write
/// wins, which is harmless.
pub struct ImageCache {
    entries: Mutex<HashMap<String, Option<Arc<ImageData>>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a settled entry without fetching.
    ///
    /// `None` = never requested; `Some(None)` = settled as failed;
    /// `Some(Some(_))` = settled with pixels.
    pub fn get(&self, url: &str) -> Option<Option<Arc<ImageData>>> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
            .cloned()
    }

    /// Settle a URL: return the cached outcome, or fetch and decode it now.
    ///
    /// Never blocks indefinitely (the underlying client carries a timeout)
    /// and never errors out — a failed image settles as `None`.
    pub fn settle(&self, url: &str) -> Option<Arc<ImageData>> {
        if let Some(outcome) = self.get(url) {
            return outcome;
        }

        let outcome = fetch_and_decode(url).map(Arc::new);
        if outcome.is_none() {
            log::warn!("image failed to settle: {}", url);
        }

        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.to_string(), outcome.clone());
        outcome
    }

    /// Number of settled URLs (loaded or failed).
    pub fn settled_count(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

fn fetch_and_decode(url: &str) -> Option<ImageData> {
    let resp = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .ok()?
        .get(url)
        .send()
        .ok()?;

    if !resp.status().is_success() {
        return None;
    }

    let bytes = resp.bytes().ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    // Cap to a size no cover-fit onto the bake canvas can exceed
    let (w, h, pixels) = if w > 2048 {
        let ratio = 2048.0 / w as f32;
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized =
            image::imageops::resize(&rgba, 2048, new_h, image::imageops::FilterType::Triangle);
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Some(ImageData {
        width: w,
        height: h,
        rgba: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_fetch_settles_as_none() {
        let cache = ImageCache::new();
        // Unsupported scheme fails without touching the network
        let outcome = cache.settle("notaurl://nowhere/img.png");
        assert!(outcome.is_none());
        // and the failure is recorded as settled
        assert!(matches!(cache.get("notaurl://nowhere/img.png"), Some(None)));
        assert_eq!(cache.settled_count(), 1);
    }

    #[test]
    fn unseen_url_is_not_settled() {
        let cache = ImageCache::new();
        assert!(cache.get("https://example.com/a.png").is_none());
    }
}
