//! Configuration types for landing-page generation.
//!
//! Two structs split the knobs by who owns them:
//!
//! * [`PageConfig`] — the brand/product record a user fills in (colours,
//!   font, copy, price, layout balance). It is what ends up in the prompt.
//! * [`GeneratorSettings`] — how the remote completion endpoint is reached
//!   (URL, API key, model and sampling constants). Nothing in here reaches
//!   the prompt.
//!
//! Both come with a builder that clamps numeric ranges and validates on
//! `build()`.

use crate::error::BrandPageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default completion endpoint (Together AI, OpenAI-style `/v1/completions`).
pub const DEFAULT_ENDPOINT: &str = "https://api.together.xyz/v1/completions";
/// Default model identifier sent in every request.
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3";
/// Default stop sequence; the model's end-of-message token.
pub const DEFAULT_STOP: &str = "<|im_end|>";
/// Upper bound on the number of images a single page can embed.
pub const MAX_IMAGES: usize = 5;

// ── Page configuration ───────────────────────────────────────────────────

/// Brand and product configuration for one generated page.
///
/// Immutable once handed to [`crate::generate`]. Deserialises from JSON with
/// every field optional, falling back to the defaults a fresh form would show.
///
/// # Example
/// ```rust
/// use brandpage::{FontFamily, PageConfig, PriceDisplay};
///
/// let page = PageConfig::builder()
///     .product_desc("A widget that makes other widgets")
///     .product_price(19.99)
///     .price_display(PriceDisplay::Exact)
///     .font_family(FontFamily::Poppins)
///     .num_features(3)
///     .build()
///     .unwrap();
/// assert_eq!(page.num_features, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Primary brand colour, e.g. `#4A90E2`.
    pub primary_color: String,
    /// Secondary brand colour.
    pub secondary_color: String,
    /// Accent colour.
    pub accent_color: String,
    pub font_family: FontFamily,
    pub product_name: String,
    /// Free-form product copy. Required: generation fails when blank.
    ///
    /// Interpolated into the prompt verbatim, without escaping.
    pub product_desc: String,
    /// Price in dollars. Must be finite and non-negative.
    pub product_price: f64,
    pub price_display: PriceDisplay,
    /// Visual/text balance, 1 (text-heavy) to 5 (visual-heavy).
    pub content_priority: u8,
    /// Number of feature blocks (and feature image slots), 1–5.
    pub num_features: u8,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            primary_color: "#4A90E2".to_string(),
            secondary_color: "#FF6B6B".to_string(),
            accent_color: "#FFD700".to_string(),
            font_family: FontFamily::default(),
            product_name: "Your Product".to_string(),
            product_desc: String::new(),
            product_price: 49.99,
            price_display: PriceDisplay::default(),
            content_priority: 3,
            num_features: 2,
        }
    }
}

impl PageConfig {
    /// Create a new builder seeded with the defaults.
    pub fn builder() -> PageConfigBuilder {
        PageConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the constraints a page must satisfy before any network call.
    pub fn validate(&self) -> Result<(), BrandPageError> {
        if self.product_desc.trim().is_empty() {
            return Err(BrandPageError::InvalidConfig(
                "Please provide a product description".into(),
            ));
        }
        if !self.product_price.is_finite() || self.product_price < 0.0 {
            return Err(BrandPageError::InvalidConfig(format!(
                "Product price must be a non-negative number, got {}",
                self.product_price
            )));
        }
        if !(1..=5).contains(&self.content_priority) {
            return Err(BrandPageError::InvalidConfig(format!(
                "Content priority must be 1–5, got {}",
                self.content_priority
            )));
        }
        if !(1..=5).contains(&self.num_features) {
            return Err(BrandPageError::InvalidConfig(format!(
                "Number of features must be 1–5, got {}",
                self.num_features
            )));
        }
        Ok(())
    }
}

/// Builder for [`PageConfig`].
#[derive(Debug)]
pub struct PageConfigBuilder {
    config: PageConfig,
}

impl PageConfigBuilder {
    pub fn primary_color(mut self, color: impl Into<String>) -> Self {
        self.config.primary_color = color.into();
        self
    }

    pub fn secondary_color(mut self, color: impl Into<String>) -> Self {
        self.config.secondary_color = color.into();
        self
    }

    pub fn accent_color(mut self, color: impl Into<String>) -> Self {
        self.config.accent_color = color.into();
        self
    }

    pub fn font_family(mut self, font: FontFamily) -> Self {
        self.config.font_family = font;
        self
    }

    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.config.product_name = name.into();
        self
    }

    pub fn product_desc(mut self, desc: impl Into<String>) -> Self {
        self.config.product_desc = desc.into();
        self
    }

    pub fn product_price(mut self, price: f64) -> Self {
        self.config.product_price = price;
        self
    }

    pub fn price_display(mut self, display: PriceDisplay) -> Self {
        self.config.price_display = display;
        self
    }

    pub fn content_priority(mut self, n: u8) -> Self {
        self.config.content_priority = n.clamp(1, 5);
        self
    }

    pub fn num_features(mut self, n: u8) -> Self {
        self.config.num_features = n.clamp(1, 5);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PageConfig, BrandPageError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Font families offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Inter,
    Poppins,
    Roboto,
    #[serde(rename = "Open Sans")]
    OpenSans,
}

impl FontFamily {
    /// CSS family name as it appears in the stylesheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::Poppins => "Poppins",
            FontFamily::Roboto => "Roboto",
            FontFamily::OpenSans => "Open Sans",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the price is presented on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceDisplay {
    /// `$X.XX` — exact price with cents. (default)
    #[default]
    #[serde(rename = "$X.XX")]
    Exact,
    /// `Starting at $X`
    #[serde(rename = "Starting at $X")]
    StartingAt,
    /// `Contact for Pricing`
    #[serde(rename = "Contact for Pricing")]
    ContactForPricing,
}

impl PriceDisplay {
    /// The format string shown to the user and embedded in the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceDisplay::Exact => "$X.XX",
            PriceDisplay::StartingAt => "Starting at $X",
            PriceDisplay::ContactForPricing => "Contact for Pricing",
        }
    }
}

impl fmt::Display for PriceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Generator settings ───────────────────────────────────────────────────

/// How to reach the remote completion endpoint.
///
/// The API key is always supplied by the caller; there is no built-in key.
/// `Debug` output redacts it.
#[derive(Clone)]
pub struct GeneratorSettings {
    /// Full URL of the `/v1/completions`-style endpoint.
    pub endpoint: String,

    /// Bearer token sent in the `Authorization` header.
    pub api_key: String,

    /// Model identifier. Default: `deepseek-ai/DeepSeek-V3`.
    pub model: String,

    /// Maximum tokens the model may generate. Default: 4096.
    ///
    /// A full landing page with inline CSS routinely needs 2 000–3 500 tokens;
    /// lower values truncate the markup mid-tag.
    pub max_tokens: u32,

    /// Sampling temperature. Default: 0.7.
    pub temperature: f32,

    /// Nucleus sampling cut-off. Default: 0.9.
    pub top_p: f32,

    /// Stop sequences. Default: `["<|im_end|>"]`.
    pub stop: Vec<String>,

    /// Request timeout in seconds. Default: `None` (transport default).
    pub timeout_secs: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            top_p: 0.9,
            stop: vec![DEFAULT_STOP.to_string()],
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for GeneratorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("stop", &self.stop)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeneratorSettings {
    /// Create a new builder for `GeneratorSettings`.
    pub fn builder() -> GeneratorSettingsBuilder {
        GeneratorSettingsBuilder {
            settings: Self::default(),
        }
    }
}

/// Builder for [`GeneratorSettings`].
#[derive(Debug)]
pub struct GeneratorSettingsBuilder {
    settings: GeneratorSettings,
}

impl GeneratorSettingsBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.settings.endpoint = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.api_key = key.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.settings.model = model.into();
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.settings.max_tokens = n;
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.settings.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.settings.top_p = p.clamp(0.0, 1.0);
        self
    }

    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.settings.stop = stop;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.settings.timeout_secs = Some(secs);
        self
    }

    /// Build the settings, validating constraints.
    pub fn build(self) -> Result<GeneratorSettings, BrandPageError> {
        let s = &self.settings;
        if s.api_key.trim().is_empty() {
            return Err(BrandPageError::InvalidConfig(
                "An API key is required for the completion endpoint".into(),
            ));
        }
        if !s.endpoint.starts_with("http://") && !s.endpoint.starts_with("https://") {
            return Err(BrandPageError::InvalidConfig(format!(
                "Endpoint must be an HTTP/HTTPS URL, got '{}'",
                s.endpoint
            )));
        }
        if s.max_tokens == 0 {
            return Err(BrandPageError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        Ok(self.settings)
    }
}
