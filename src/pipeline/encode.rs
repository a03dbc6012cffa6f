//! Image encoding: raw bytes → `data:image/<subtype>;base64,…` URIs.
//!
//! The generated page is a single self-contained HTML file, so every image is
//! inlined as a data URI rather than referenced by path. Encoding is a pure
//! byte-to-text transform: malformed image bytes are encoded as-is and left
//! for the browser to reject.
//!
//! Order matters. The first image is always the hero image and the rest map
//! one-to-one onto feature slots, so keys are positional (`IMAGE_1`,
//! `IMAGE_2`, …) rather than derived from file names.

use crate::error::BrandPageError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use std::path::Path;
use tracing::debug;

/// Subtype used when neither the caller nor the bytes say otherwise.
pub const DEFAULT_SUBTYPE: &str = "jpeg";

/// One user-supplied image: raw bytes plus an optional MIME subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    /// MIME subtype (`png`, `jpeg`, …). Sniffed from the bytes when `None`.
    pub subtype: Option<String>,
}

impl ImageInput {
    pub fn new(bytes: impl Into<Vec<u8>>, subtype: Option<&str>) -> Self {
        Self {
            bytes: bytes.into(),
            subtype: subtype
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Build from a full MIME type such as `image/png`; the part after the
    /// last `/` becomes the subtype.
    pub fn from_mime(bytes: impl Into<Vec<u8>>, mime: &str) -> Self {
        let subtype = mime.rsplit('/').next();
        Self::new(bytes, subtype)
    }

    /// Read an image file, taking the subtype from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BrandPageError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| BrandPageError::ImageRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let subtype = ImageFormat::from_path(path).ok().and_then(format_subtype);
        Ok(Self::new(bytes, subtype))
    }

    /// The subtype that will appear in the data URI.
    pub fn resolved_subtype(&self) -> &str {
        match self.subtype.as_deref() {
            Some(s) => s,
            None => image::guess_format(&self.bytes)
                .ok()
                .and_then(format_subtype)
                .unwrap_or(DEFAULT_SUBTYPE),
        }
    }
}

fn format_subtype(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpeg"),
        ImageFormat::Gif => Some("gif"),
        ImageFormat::WebP => Some("webp"),
        ImageFormat::Bmp => Some("bmp"),
        ImageFormat::Avif => Some("avif"),
        ImageFormat::Tiff => Some("tiff"),
        _ => None,
    }
}

/// Positional key for the `n`-th image (1-based).
pub fn image_key(n: usize) -> String {
    format!("IMAGE_{n}")
}

/// Encoded images in input order, addressable by `IMAGE_{n}` key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedImages {
    entries: Vec<(String, String)>,
}

impl EncodedImages {
    /// Data URI stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, uri)| uri.as_str())
    }

    /// Data URI of the `n`-th image (1-based), if supplied.
    pub fn nth(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|(_, uri)| uri.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, data URI)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All data URIs in input order.
    pub fn data_uris(&self) -> Vec<String> {
        self.entries.iter().map(|(_, uri)| uri.clone()).collect()
    }
}

/// Encode a single image as a data URI.
pub fn encode_image(img: &ImageInput) -> String {
    let b64 = STANDARD.encode(&img.bytes);
    format!("data:image/{};base64,{}", img.resolved_subtype(), b64)
}

/// Encode every image, keyed `IMAGE_1..IMAGE_N` in input order.
pub fn encode_images(images: &[ImageInput]) -> EncodedImages {
    let entries = images
        .iter()
        .enumerate()
        .map(|(idx, img)| {
            let uri = encode_image(img);
            debug!(
                "Encoded image {} ({} bytes) → {} chars",
                idx + 1,
                img.bytes.len(),
                uri.len()
            );
            (image_key(idx + 1), uri)
        })
        .collect();
    EncodedImages { entries }
}
