//! Photo loading: resolves the card's photo URLs to local files and decodes
//! them into the engine's image store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::imageops::FilterType;

use postmark_engine::images::{ImageId, ImageStore};

/// Longest edge kept after decoding; larger photos are downscaled.
pub const MAX_PHOTO_EDGE: u32 = 1600;

/// Maps a photo URL to a file path.
///
/// Accepts plain paths and `file://` URLs. Relative paths resolve against
/// `base` when given. Remote URLs are not fetched.
pub fn resolve_photo_path(url: &str, base: Option<&Path>) -> Result<PathBuf> {
    let url = url.trim();
    if url.is_empty() {
        bail!("empty photo URL");
    }
    let raw = match url.strip_prefix("file://") {
        Some(rest) => rest,
        None if url.contains("://") => bail!("remote photo URLs are not supported: {url}"),
        None => url,
    };
    let path = PathBuf::from(raw);
    Ok(match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    })
}

/// Decodes encoded image bytes to straight-alpha RGBA8, downscaled so the
/// longest edge is at most [`MAX_PHOTO_EDGE`].
pub fn decode_photo(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>)> {
    let mut img = image::load_from_memory(bytes).context("decode photo")?;
    if img.width().max(img.height()) > MAX_PHOTO_EDGE {
        img = img.resize(MAX_PHOTO_EDGE, MAX_PHOTO_EDGE, FilterType::Triangle);
    }
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhotoEntry {
    pub image: ImageId,
    /// Width / height.
    pub aspect: f32,
}

/// Decoded photos of one card, keyed by their URL.
#[derive(Debug, Default)]
pub struct PhotoBook {
    store: ImageStore,
    entries: HashMap<String, PhotoEntry>,
}

impl PhotoBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every URL it can. Failures are logged and the photo is left out;
    /// its gift then shows an empty frame.
    pub fn load<S: AsRef<str>>(urls: &[S], base: Option<&Path>) -> Self {
        let mut book = Self::new();
        for url in urls {
            let url = url.as_ref();
            if let Err(err) = book.load_one(url, base) {
                log::warn!("photo '{url}' unavailable: {err:#}");
            }
        }
        log::info!("loaded {}/{} photos", book.len(), urls.len());
        book
    }

    fn load_one(&mut self, url: &str, base: Option<&Path>) -> Result<()> {
        let path = resolve_photo_path(url, base)?;
        let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let (width, height, rgba) = decode_photo(&bytes)?;
        self.insert_rgba(url, width, height, rgba)?;
        Ok(())
    }

    /// Adds already-decoded pixels under `url`.
    pub fn insert_rgba(&mut self, url: &str, width: u32, height: u32, rgba: Vec<u8>) -> Result<PhotoEntry> {
        let image = self.store.insert(width, height, rgba)?;
        let entry = PhotoEntry { image, aspect: width as f32 / height as f32 };
        self.entries.insert(url.to_string(), entry);
        Ok(entry)
    }

    #[inline]
    pub fn get(&self, url: &str) -> Option<PhotoEntry> {
        self.entries.get(url).copied()
    }

    #[inline]
    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
