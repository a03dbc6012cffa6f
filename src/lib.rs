//! # brandpage
//!
//! Generate a branded, self-contained product landing page with a remote LLM.
//!
//! A [`PageConfig`] (brand colours, font, product copy, price, layout balance)
//! and up to five images go in; a single HTML file with the images inlined as
//! data URIs comes out.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PageConfig + images
//!  │
//!  ├─ 1. Encode   bytes → data:image/<subtype>;base64,…  (IMAGE_1 = hero)
//!  ├─ 2. Prompt   brand variables, copy, placeholder sentinels
//!  ├─ 3. LLM      one POST to a /v1/completions endpoint
//!  ├─ 4. Polish   strip ```html fence, swap sentinels for <img>
//!  └─ 5. Output   GenerationResult { html, images, generated_content, stats }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brandpage::{generate, GeneratorSettings, ImageInput, PageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let page = PageConfig::builder()
//!         .product_name("Widget Pro")
//!         .product_desc("The last widget you will ever need")
//!         .product_price(19.99)
//!         .build()?;
//!     let settings = GeneratorSettings::builder()
//!         .api_key(std::env::var("TOGETHER_API_KEY")?)
//!         .build()?;
//!     let images = vec![ImageInput::from_path("hero.png")?];
//!
//!     let result = generate(&page, &images, &settings).await?;
//!     std::fs::write("landing_page.html", &result.html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `brandpage` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    FontFamily, GeneratorSettings, GeneratorSettingsBuilder, PageConfig, PageConfigBuilder,
    PriceDisplay,
};
pub use error::BrandPageError;
pub use generate::{build_prompt_for, generate, generate_sync, generate_to_file};
pub use output::{ContentSummary, GenerationResult, GenerationStats};
pub use pipeline::encode::{EncodedImages, ImageInput};
