//! CLI binary for brandpage.
//!
//! A thin shim over the library crate: it collects the page configuration
//! from flags, environment and an optional JSON file, reads image files,
//! shows a spinner while the endpoint works, and writes the page.

use anyhow::{Context, Result};
use brandpage::{
    build_prompt_for, generate, generate_to_file, FontFamily, GeneratorSettings, ImageInput,
    PageConfig, PriceDisplay,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r##"EXAMPLES:
  # Minimal page, HTML to stdout
  brandpage --description "Noise-cancelling headphones for open offices"

  # Hero + two feature images, written to a file
  brandpage --description "Great widget" --price 19.99 --features 2 \
      --image hero.png --image f1.jpg --image f2.jpg -o landing_page.html

  # Start from a saved configuration and override the font
  brandpage --config brand.json --font poppins -o page.html

  # Inspect the prompt without calling the API
  brandpage --config brand.json --print-prompt

CONFIG FILE (JSON, every key optional):
  {
    "primary_color": "#4A90E2", "secondary_color": "#FF6B6B",
    "accent_color": "#FFD700", "font_family": "Inter",
    "product_name": "Your Product", "product_desc": "...",
    "product_price": 49.99, "price_display": "$X.XX",
    "content_priority": 3, "num_features": 2
  }

ENVIRONMENT VARIABLES:
  TOGETHER_API_KEY        API key for the completion endpoint
  BRANDPAGE_ENDPOINT      Override the completion endpoint URL
  BRANDPAGE_MODEL         Override the model ID
"##;

/// Generate a branded product landing page with an LLM.
#[derive(Parser, Debug)]
#[command(
    name = "brandpage",
    version,
    about = "Generate a branded product landing page with an LLM",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// JSON file with a base page configuration; flags override its fields.
    #[arg(long, env = "BRANDPAGE_CONFIG")]
    config: Option<PathBuf>,

    // ── Brand ────────────────────────────────────────────────────────────
    /// Primary brand colour (e.g. #4A90E2).
    #[arg(long, env = "BRANDPAGE_PRIMARY_COLOR")]
    primary_color: Option<String>,

    /// Secondary brand colour.
    #[arg(long, env = "BRANDPAGE_SECONDARY_COLOR")]
    secondary_color: Option<String>,

    /// Accent colour.
    #[arg(long, env = "BRANDPAGE_ACCENT_COLOR")]
    accent_color: Option<String>,

    /// Font family.
    #[arg(long, env = "BRANDPAGE_FONT", value_enum)]
    font: Option<FontArg>,

    // ── Product ──────────────────────────────────────────────────────────
    /// Product name.
    #[arg(long, env = "BRANDPAGE_NAME")]
    name: Option<String>,

    /// Product description (required, here or in --config).
    #[arg(short, long, env = "BRANDPAGE_DESCRIPTION")]
    description: Option<String>,

    /// Product price in dollars.
    #[arg(long, env = "BRANDPAGE_PRICE", value_parser = parse_price)]
    price: Option<f64>,

    /// Price format.
    #[arg(long, env = "BRANDPAGE_PRICE_DISPLAY", value_enum)]
    price_display: Option<PriceDisplayArg>,

    // ── Content ──────────────────────────────────────────────────────────
    /// Visual/text balance (1 = text-heavy, 5 = visual-heavy).
    #[arg(long, env = "BRANDPAGE_CONTENT_PRIORITY",
          value_parser = clap::value_parser!(u8).range(1..=5))]
    content_priority: Option<u8>,

    /// Number of feature blocks (1–5).
    #[arg(long, env = "BRANDPAGE_FEATURES",
          value_parser = clap::value_parser!(u8).range(1..=5))]
    features: Option<u8>,

    /// Image file; repeat up to 5 times. The first is the hero image.
    #[arg(short, long = "image", value_name = "PATH")]
    images: Vec<PathBuf>,

    // ── Endpoint ─────────────────────────────────────────────────────────
    /// API key for the completion endpoint.
    #[arg(long, env = "TOGETHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Completion endpoint URL.
    #[arg(long, env = "BRANDPAGE_ENDPOINT", default_value = brandpage::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model ID.
    #[arg(long, env = "BRANDPAGE_MODEL", default_value = brandpage::config::DEFAULT_MODEL)]
    model: String,

    /// Request timeout in seconds (default: none).
    #[arg(long, env = "BRANDPAGE_TIMEOUT")]
    timeout: Option<u64>,

    // ── Output ───────────────────────────────────────────────────────────
    /// Write the HTML to this file instead of stdout.
    #[arg(short, long, env = "BRANDPAGE_OUTPUT")]
    output: Option<PathBuf>,

    /// Output the full GenerationResult as JSON instead of HTML.
    #[arg(long)]
    json: bool,

    /// Print the prompt and exit without calling the endpoint.
    #[arg(long)]
    print_prompt: bool,

    /// Disable the spinner.
    #[arg(long, env = "BRANDPAGE_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "BRANDPAGE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "BRANDPAGE_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FontArg {
    Inter,
    Poppins,
    Roboto,
    OpenSans,
}

impl From<FontArg> for FontFamily {
    fn from(v: FontArg) -> Self {
        match v {
            FontArg::Inter => FontFamily::Inter,
            FontArg::Poppins => FontFamily::Poppins,
            FontArg::Roboto => FontFamily::Roboto,
            FontArg::OpenSans => FontFamily::OpenSans,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PriceDisplayArg {
    /// $X.XX
    Exact,
    /// Starting at $X
    StartingAt,
    /// Contact for Pricing
    Contact,
}

impl From<PriceDisplayArg> for PriceDisplay {
    fn from(v: PriceDisplayArg) -> Self {
        match v {
            PriceDisplayArg::Exact => PriceDisplay::Exact,
            PriceDisplayArg::StartingAt => PriceDisplay::StartingAt,
            PriceDisplayArg::Contact => PriceDisplay::ContactForPricing,
        }
    }
}

fn parse_price(s: &str) -> std::result::Result<f64, String> {
    let price: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if !price.is_finite() || price < 0.0 {
        return Err(format!("price must be a non-negative number, got {s}"));
    }
    Ok(price)
}

/// Default tracing filter when `RUST_LOG` is unset.
///
/// The spinner carries the feedback during a normal run, so library INFO logs
/// are only shown when it is off. Warnings (e.g. an empty completion) always
/// get through unless `--quiet`.
fn log_filter(verbose: bool, quiet: bool, show_progress: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else if show_progress {
        "warn"
    } else {
        "info"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.print_prompt;
    let filter = log_filter(cli.verbose, cli.quiet, show_progress);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Collect inputs ───────────────────────────────────────────────────
    let page = build_page(&cli).await?;
    let images = read_images(&cli.images)?;

    if cli.print_prompt {
        let prompt = build_prompt_for(&page, &images).context("Invalid page configuration")?;
        println!("{prompt}");
        return Ok(());
    }

    let settings = build_settings(&cli)?;

    // ── Generate ─────────────────────────────────────────────────────────
    let spinner = show_progress.then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Generating");
        bar.set_message(format!("your custom page with {}…", settings.model));
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let outcome = match cli.output {
        Some(ref path) => generate_to_file(&page, &images, &settings, path).await,
        None => generate(&page, &images, &settings).await,
    };
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let result = outcome.context("Generation failed")?;

    // ── Emit ─────────────────────────────────────────────────────────────
    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialise output")?;
        println!("{json}");
    } else if cli.output.is_none() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(result.html.as_bytes())
            .context("Failed to write to stdout")?;
        if !result.html.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if !cli.quiet && !cli.json {
        if cli.verbose && !result.images.is_empty() {
            eprintln!("{}", bold("Embedded images (base64):"));
            for uri in &result.images {
                let preview: String = uri.chars().take(100).collect();
                eprintln!("  {}", dim(&format!("{preview}…")));
            }
        }
        let target = cli
            .output
            .as_ref()
            .map(|p| format!("  →  {}", bold(&p.display().to_string())))
            .unwrap_or_default();
        eprintln!(
            "{} Generated in {:.1}s  {}{}",
            green("✔"),
            result.stats.total_duration_ms as f64 / 1000.0,
            dim(&format!(
                "{} bytes, {} image(s)",
                result.stats.html_bytes, result.stats.image_count
            )),
            target,
        );
    }

    Ok(())
}

/// Merge the optional config file with CLI overrides.
async fn build_page(cli: &Cli) -> Result<PageConfig> {
    let mut page = if let Some(ref path) = cli.config {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read page config from {path:?}"))?;
        serde_json::from_str::<PageConfig>(&raw)
            .with_context(|| format!("Failed to parse page config {path:?}"))?
    } else {
        PageConfig::default()
    };

    if let Some(ref c) = cli.primary_color {
        page.primary_color = c.clone();
    }
    if let Some(ref c) = cli.secondary_color {
        page.secondary_color = c.clone();
    }
    if let Some(ref c) = cli.accent_color {
        page.accent_color = c.clone();
    }
    if let Some(font) = cli.font {
        page.font_family = font.into();
    }
    if let Some(ref name) = cli.name {
        page.product_name = name.clone();
    }
    if let Some(ref desc) = cli.description {
        page.product_desc = desc.clone();
    }
    if let Some(price) = cli.price {
        page.product_price = price;
    }
    if let Some(display) = cli.price_display {
        page.price_display = display.into();
    }
    if let Some(n) = cli.content_priority {
        page.content_priority = n;
    }
    if let Some(n) = cli.features {
        page.num_features = n;
    }

    page.validate().context("Invalid page configuration")?;
    Ok(page)
}

fn read_images(paths: &[PathBuf]) -> Result<Vec<ImageInput>> {
    if paths.len() > brandpage::config::MAX_IMAGES {
        anyhow::bail!(
            "At most {} images are supported (got {})",
            brandpage::config::MAX_IMAGES,
            paths.len()
        );
    }
    paths
        .iter()
        .map(|p| ImageInput::from_path(p).with_context(|| format!("Failed to load image {p:?}")))
        .collect()
}

fn build_settings(cli: &Cli) -> Result<GeneratorSettings> {
    let api_key = cli
        .api_key
        .clone()
        .context("No API key: pass --api-key or set TOGETHER_API_KEY")?;

    let mut builder = GeneratorSettings::builder()
        .api_key(api_key)
        .endpoint(cli.endpoint.clone())
        .model(cli.model.clone());
    if let Some(secs) = cli.timeout {
        builder = builder.timeout_secs(secs);
    }
    builder.build().context("Invalid generator settings")
}
