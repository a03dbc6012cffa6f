//! Prompt template and placeholder sentinels for landing-page generation.
//!
//! Centralising the prompt here keeps the post-processor and the prompt in
//! agreement about the sentinel tokens: the prompt asks the model to echo
//! [`HERO_SENTINEL`] and [`feature_sentinel`] back unmodified, and
//! [`crate::pipeline::postprocess`] replaces exactly those strings with
//! `<img>` elements afterwards.
//!
//! The template is deterministic: the same [`PageConfig`] and image count
//! always render byte-identical text.
//!
//! Product copy is interpolated verbatim. Text in the description that reads
//! like an instruction reaches the model as-is.

use crate::config::PageConfig;

/// Comment token the model must leave inside the hero placeholder.
pub const HERO_SENTINEL: &str = "<!-- HERO_IMAGE -->";

/// Comment token for feature slot `n` (1-based).
pub fn feature_sentinel(n: usize) -> String {
    format!("<!-- FEATURE_IMAGE_{n} -->")
}

/// Full hero placeholder element as shown to the model.
pub fn hero_placeholder() -> String {
    format!(r#"<div class="image-placeholder hero-image-placeholder">{HERO_SENTINEL}</div>"#)
}

/// Full feature placeholder element for slot `n` (1-based).
pub fn feature_placeholder(n: usize) -> String {
    format!(
        r#"<div class="image-placeholder feature-image-placeholder">{}</div>"#,
        feature_sentinel(n)
    )
}

/// Brand variables pinned with `!important` so generated styles cannot
/// override them.
pub fn css_variables(page: &PageConfig) -> String {
    format!(
        r#"
    :root {{
        --primary-color: {primary} !important;
        --secondary-color: {secondary} !important;
        --accent-color: {accent} !important;
        --font-family: {font}, sans-serif !important;
    }}
    body {{
        background-color: {secondary} !important;
        color: {primary} !important;
    }}
    "#,
        primary = page.primary_color,
        secondary = page.secondary_color,
        accent = page.accent_color,
        font = page.font_family,
    )
}

/// Render the generation prompt for `page` with `image_count` images supplied.
pub fn build_prompt(page: &PageConfig, image_count: usize) -> String {
    let feature_placeholders = (1..=usize::from(page.num_features))
        .map(feature_placeholder)
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = String::with_capacity(2048);
    prompt.push_str(
        "\nGenerate modern HTML/CSS for a dark-themed product landing page with these specifications:\n\n",
    );

    prompt.push_str("## Design Requirements\n");
    prompt.push_str("- Use CSS variables from this :root selector:\n");
    prompt.push_str(&css_variables(page));
    prompt.push('\n');
    prompt.push_str(DESIGN_RULES);

    prompt.push_str(&format!(
        r#"
## Content
- Product Name: "{name}"
- Product Description: "{desc}"
- Product Price: "{price}"
- Price Display Format: "{display}"
- Visual/Text Balance: {priority} on a scale of 1 (text-heavy) to 5 (visual-heavy)
- Include {image_count} product images using these exact placeholder tags:
  {hero} (for hero section)
  {feature_placeholders}
"#,
        name = page.product_name,
        desc = page.product_desc,
        price = page.product_price,
        display = page.price_display,
        priority = page.content_priority,
        hero = hero_placeholder(),
    ));

    prompt.push_str(REQUIRED_SECTIONS);
    prompt
}

const DESIGN_RULES: &str = "\
- Create a DARK MODE design with dark backgrounds and light text
- Background should use var(--bg-color)
- Text should use var(--text-color)
- Card/section backgrounds should use var(--card-bg-color)
- All accent colors MUST use the CSS variables (--primary-color, --secondary-color, --accent-color)
- All fonts MUST use --font-family
";

const REQUIRED_SECTIONS: &str = "
## Required Sections
1. Hero Section with hero image
2. Features Section with feature images
3. Pricing Section
4. Footer


Return ONLY valid HTML/CSS code using these requirements.
";
