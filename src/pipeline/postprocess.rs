//! Post-processing: turn the raw completion into the final page.
//!
//! Two passes, in order:
//!
//! 1. Strip an outer ```` ```html ```` fence. Models wrap their answer in one
//!    despite being asked for bare HTML. Text that does not start with the
//!    fence passes through untouched.
//! 2. Replace the placeholder sentinels from [`crate::prompts`] with `<img>`
//!    elements pointing at the encoded data URIs.
//!
//! Substitution is a literal string replace, not a DOM transform. If the model
//! rewrote or dropped a sentinel the slot stays unfilled; if a slot has no
//! image its `src` is empty. Neither case is an error.

use crate::pipeline::encode::EncodedImages;
use crate::prompts::{feature_sentinel, HERO_SENTINEL};
use once_cell::sync::Lazy;
use regex::Regex;

/// Class applied to the hero `<img>`.
pub const HERO_IMAGE_CLASS: &str = "hero-image";
/// Class applied to every feature `<img>`.
pub const FEATURE_IMAGE_CLASS: &str = "feature-image";

/// Run both passes over the raw completion text.
pub fn finalize_html(raw: &str, images: &EncodedImages, num_features: usize) -> String {
    let html = strip_html_fence(raw);
    substitute_images(&html, images, num_features)
}

// ── Pass 1: strip the ```html fence ──────────────────────────────────────────

static RE_HTML_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```html\s*|\s*```$").expect("fence regex is valid"));

/// Remove a leading ```` ```html ```` fence and its closing ```` ``` ````.
pub fn strip_html_fence(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("```html") {
        RE_HTML_FENCE.replace_all(trimmed, "").trim().to_string()
    } else {
        input.to_string()
    }
}

// ── Pass 2: sentinel substitution ────────────────────────────────────────────

/// `<img>` element for the hero slot.
pub fn hero_img(src: &str) -> String {
    format!(r#"<img src="{src}" alt="Hero Image" class="{HERO_IMAGE_CLASS}">"#)
}

/// `<img>` element for feature slot `n` (1-based).
pub fn feature_img(src: &str, n: usize) -> String {
    format!(r#"<img src="{src}" alt="Feature Image {n}" class="{FEATURE_IMAGE_CLASS}">"#)
}

/// Replace the hero sentinel with `IMAGE_1` and feature sentinel `i` with
/// `IMAGE_{i+1}` for `i` in `1..=num_features`.
pub fn substitute_images(html: &str, images: &EncodedImages, num_features: usize) -> String {
    let mut out = html.replace(HERO_SENTINEL, &hero_img(images.nth(1).unwrap_or("")));
    for n in 1..=num_features {
        let src = images.nth(n + 1).unwrap_or("");
        out = out.replace(&feature_sentinel(n), &feature_img(src, n));
    }
    out
}

// ── Tests ────────────────────────────────────────────────────────────────────
