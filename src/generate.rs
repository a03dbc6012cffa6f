//! Generation entry points.
//!
//! [`generate`] is the primary API: validate, encode, prompt, one completion
//! request, post-process. [`generate_to_file`] adds an atomic write of the
//! finished page, [`generate_sync`] wraps it for callers without a runtime,
//! and [`build_prompt_for`] renders the prompt without touching the network.
//!
//! No state survives a call. Concurrent calls from independent tasks are fine;
//! each builds its own HTTP client and drops it on return.

use crate::config::{GeneratorSettings, PageConfig, MAX_IMAGES};
use crate::error::BrandPageError;
use crate::output::{ContentSummary, GenerationResult, GenerationStats};
use crate::pipeline::encode::{encode_images, ImageInput};
use crate::pipeline::llm::CompletionClient;
use crate::pipeline::postprocess;
use crate::prompts::build_prompt;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Generate a landing page from `page` and `images`.
///
/// # Arguments
/// * `page`     — brand/product configuration
/// * `images`   — 0–5 images; the first is the hero, the rest fill feature
///   slots in order. Pass an empty slice for none.
/// * `settings` — endpoint, API key and sampling constants
///
/// # Errors
/// - [`BrandPageError::InvalidConfig`] before any network call when the
///   description is blank, a range is violated, or more than five images are given
/// - [`BrandPageError::Api`] for any non-200 answer
/// - [`BrandPageError::Transport`] / [`BrandPageError::MalformedResponse`]
///   when no usable HTTP response arrives
pub async fn generate(
    page: &PageConfig,
    images: &[ImageInput],
    settings: &GeneratorSettings,
) -> Result<GenerationResult, BrandPageError> {
    let total_start = Instant::now();
    validate_inputs(page, images)?;
    info!(
        "Generating page for '{}' with {} image(s), {} feature(s)",
        page.product_name,
        images.len(),
        page.num_features
    );

    // ── Step 1: Encode images ────────────────────────────────────────────
    let encoded = encode_images(images);

    // ── Step 2: Build prompt ─────────────────────────────────────────────
    let prompt = build_prompt(page, images.len());
    debug!("Prompt is {} bytes", prompt.len());

    // ── Step 3: Remote completion ────────────────────────────────────────
    let client = CompletionClient::new(settings)?;
    let llm_start = Instant::now();
    let raw = client.complete(&prompt).await?;
    let llm_duration_ms = llm_start.elapsed().as_millis() as u64;
    info!("Completion returned {} bytes in {}ms", raw.len(), llm_duration_ms);

    // ── Step 4: Post-process ─────────────────────────────────────────────
    let feature_count = usize::from(page.num_features);
    let html = postprocess::finalize_html(&raw, &encoded, feature_count);

    let stats = GenerationStats {
        image_count: encoded.len(),
        feature_count,
        prompt_bytes: prompt.len(),
        html_bytes: html.len(),
        llm_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Generation complete: {} bytes of HTML, {}ms total",
        stats.html_bytes, stats.total_duration_ms
    );

    Ok(GenerationResult {
        html,
        images: encoded.data_uris(),
        generated_content: ContentSummary::default(),
        stats,
    })
}

/// Generate a page and write its HTML to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn generate_to_file(
    page: &PageConfig,
    images: &[ImageInput],
    settings: &GeneratorSettings,
    output_path: impl AsRef<Path>,
) -> Result<GenerationResult, BrandPageError> {
    let result = generate(page, images, settings).await?;
    let path = output_path.as_ref();
    let write_err = |e: std::io::Error| BrandPageError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, &result.html)
        .await
        .map_err(write_err)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }

    info!("Wrote {}", path.display());
    Ok(result)
}

/// Synchronous wrapper around [`generate`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_sync(
    page: &PageConfig,
    images: &[ImageInput],
    settings: &GeneratorSettings,
) -> Result<GenerationResult, BrandPageError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BrandPageError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(generate(page, images, settings))
}

/// Render the prompt [`generate`] would send, without calling the endpoint.
pub fn build_prompt_for(page: &PageConfig, images: &[ImageInput]) -> Result<String, BrandPageError> {
    validate_inputs(page, images)?;
    Ok(build_prompt(page, images.len()))
}

fn validate_inputs(page: &PageConfig, images: &[ImageInput]) -> Result<(), BrandPageError> {
    page.validate()?;
    if images.len() > MAX_IMAGES {
        return Err(BrandPageError::InvalidConfig(format!(
            "At most {MAX_IMAGES} images are supported, got {}",
            images.len()
        )));
    }
    Ok(())
}
