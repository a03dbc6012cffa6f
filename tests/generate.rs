//! Integration tests for the generation pipeline against an in-process mock
//! of the completion endpoint.
//!
//! Each test binds an `axum` server on an ephemeral port, points
//! `GeneratorSettings::endpoint` at it, and inspects both what the library
//! sent and what it made of the reply. No network access or API key needed.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use brandpage::prompts::{feature_sentinel, HERO_SENTINEL};
use brandpage::{
    generate, generate_sync, generate_to_file, BrandPageError, GeneratorSettings, ImageInput,
    PageConfig, PriceDisplay,
};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

// ── Mock endpoint ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Captured {
    authorization: Option<String>,
    body: Option<Value>,
    hits: usize,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: String,
    captured: Arc<Mutex<Captured>>,
}

struct Mock {
    url: String,
    captured: Arc<Mutex<Captured>>,
}

impl Mock {
    fn prompt(&self) -> String {
        let captured = self.captured.lock().unwrap();
        captured.body.as_ref().expect("request body")["prompt"]
            .as_str()
            .expect("prompt string")
            .to_string()
    }

    fn settings(&self) -> GeneratorSettings {
        GeneratorSettings::builder()
            .api_key("test-key")
            .endpoint(self.url.clone())
            .build()
            .unwrap()
    }
}

async fn completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let mut captured = state.captured.lock().unwrap();
    captured.authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.body = Some(body);
    captured.hits += 1;
    (state.status, state.reply.clone())
}

/// Start a mock that answers every request with `status` and raw `reply`.
async fn spawn_mock(status: StatusCode, reply: impl Into<String>) -> Mock {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let state = MockState {
        status,
        reply: reply.into(),
        captured: Arc::clone(&captured),
    };
    let app = Router::new()
        .route("/v1/completions", post(completions))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Mock {
        url: format!("http://{addr}/v1/completions"),
        captured,
    }
}

/// A 200 reply whose first choice carries `text`.
fn completion_reply(text: &str) -> String {
    json!({ "choices": [{ "text": text }] }).to_string()
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn widget_page(num_features: u8) -> PageConfig {
    PageConfig {
        product_desc: "Great widget".into(),
        product_price: 19.99,
        price_display: PriceDisplay::Exact,
        num_features,
        ..PageConfig::default()
    }
}

fn image(seed: u8) -> ImageInput {
    ImageInput::new(vec![seed; 16], Some("png"))
}

/// Markup echoing the hero sentinel and `n` feature sentinels.
fn echo_markup(n: usize) -> String {
    let mut html = format!("<section class=\"hero\">{HERO_SENTINEL}</section>\n");
    for i in 1..=n {
        html.push_str(&format!("<article>{}</article>\n", feature_sentinel(i)));
    }
    html
}

fn img_srcs(html: &str) -> Vec<String> {
    let re = Regex::new(r#"<img src="([^"]*)""#).unwrap();
    re.captures_iter(html).map(|c| c[1].to_string()).collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn three_images_two_features_end_to_end() {
    let reply = format!("```html\n{}```", echo_markup(2));
    let mock = spawn_mock(StatusCode::OK, completion_reply(&reply)).await;
    let images = vec![image(1), image(2), image(3)];

    let result = generate(&widget_page(2), &images, &mock.settings())
        .await
        .expect("generation should succeed");

    // What was sent
    let prompt = mock.prompt();
    assert_eq!(prompt.matches(HERO_SENTINEL).count(), 1);
    assert_eq!(prompt.matches("<!-- FEATURE_IMAGE_").count(), 2);
    assert!(prompt.contains("Great widget"));
    assert!(prompt.contains("19.99"));
    assert!(prompt.contains("$X.XX"));

    // What came back
    assert_eq!(result.images.len(), 3);
    assert_eq!(img_srcs(&result.html), result.images);
    assert!(result.html.contains(r#"alt="Hero Image" class="hero-image""#));
    assert!(result.html.contains(r#"alt="Feature Image 2" class="feature-image""#));
    assert!(!result.html.contains("```"));
    assert_eq!(result.stats.image_count, 3);
    assert_eq!(result.stats.feature_count, 2);
}

#[tokio::test]
async fn request_carries_auth_and_generation_parameters() {
    let mock = spawn_mock(StatusCode::OK, completion_reply("<p>ok</p>")).await;
    generate(&widget_page(1), &[], &mock.settings()).await.unwrap();

    let captured = mock.captured.lock().unwrap();
    assert_eq!(captured.hits, 1);
    assert_eq!(captured.authorization.as_deref(), Some("Bearer test-key"));
    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["model"], "deepseek-ai/DeepSeek-V3");
    assert_eq!(body["max_tokens"], 4096);
    assert_eq!(body["stop"], json!(["<|im_end|>"]));
    assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert!((body["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn no_images_leave_every_src_empty() {
    let mock = spawn_mock(StatusCode::OK, completion_reply(&echo_markup(3))).await;
    let result = generate(&widget_page(3), &[], &mock.settings()).await.unwrap();

    assert!(result.images.is_empty());
    let srcs = img_srcs(&result.html);
    assert_eq!(srcs.len(), 4);
    assert!(srcs.iter().all(String::is_empty));
}

#[tokio::test]
async fn fewer_images_than_slots_fill_in_order() {
    let mock = spawn_mock(StatusCode::OK, completion_reply(&echo_markup(3))).await;
    let result = generate(&widget_page(3), &[image(7), image(8)], &mock.settings())
        .await
        .unwrap();

    let srcs = img_srcs(&result.html);
    assert_eq!(srcs, vec![result.images[0].clone(), result.images[1].clone(), String::new(), String::new()]);
}

#[tokio::test]
async fn embedded_payload_round_trips() {
    let bytes: Vec<u8> = (0..=255).collect();
    let mock = spawn_mock(StatusCode::OK, completion_reply(&echo_markup(1))).await;
    let images = vec![ImageInput::from_mime(bytes.clone(), "image/jpeg")];
    let result = generate(&widget_page(1), &images, &mock.settings()).await.unwrap();

    let payload = result.images[0]
        .strip_prefix("data:image/jpeg;base64,")
        .expect("jpeg data URI");
    assert_eq!(STANDARD.decode(payload).unwrap(), bytes);
}

#[tokio::test]
async fn unauthorised_response_is_an_api_error() {
    let mock = spawn_mock(StatusCode::UNAUTHORIZED, "invalid api key").await;
    let err = generate(&widget_page(2), &[], &mock.settings())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    let msg = err.to_string();
    assert!(msg.contains("401"), "got: {msg}");
    assert!(msg.contains("invalid api key"), "got: {msg}");
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let mock = spawn_mock(StatusCode::SERVICE_UNAVAILABLE, "overloaded").await;
    let err = generate(&widget_page(1), &[], &mock.settings())
        .await
        .unwrap_err();
    assert!(matches!(err, BrandPageError::Api { status: 503, .. }));
    assert_eq!(mock.captured.lock().unwrap().hits, 1);
}

#[tokio::test]
async fn missing_choices_yield_empty_page() {
    let mock = spawn_mock(StatusCode::OK, "{}").await;
    let result = generate(&widget_page(1), &[image(1)], &mock.settings())
        .await
        .unwrap();
    assert_eq!(result.html, "");
    assert_eq!(result.images.len(), 1);
    assert_eq!(result.generated_content.headline, "Auto-generated in HTML");
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let mock = spawn_mock(StatusCode::OK, "<html>gateway page</html>").await;
    let err = generate(&widget_page(1), &[], &mock.settings())
        .await
        .unwrap_err();
    assert!(matches!(err, BrandPageError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = GeneratorSettings::builder()
        .api_key("k")
        .endpoint(format!("http://{addr}/v1/completions"))
        .timeout_secs(5)
        .build()
        .unwrap();
    let err = generate(&widget_page(1), &[], &settings).await.unwrap_err();
    assert!(matches!(err, BrandPageError::Transport(_)), "got: {err:?}");
}

#[tokio::test]
async fn blank_description_never_reaches_endpoint() {
    let mock = spawn_mock(StatusCode::OK, completion_reply("<p>x</p>")).await;
    let page = PageConfig {
        product_desc: "  ".into(),
        ..widget_page(1)
    };
    let err = generate(&page, &[], &mock.settings()).await.unwrap_err();
    assert!(matches!(err, BrandPageError::InvalidConfig(_)));
    assert_eq!(mock.captured.lock().unwrap().hits, 0);
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let mock = spawn_mock(StatusCode::OK, completion_reply(&echo_markup(1))).await;
    let settings = mock.settings();
    let a_images = [image(1)];
    let b_images = [image(2)];
    let a_page = widget_page(1);
    let b_page = widget_page(1);

    let (a, b) = tokio::join!(
        generate(&a_page, &a_images, &settings),
        generate(&b_page, &b_images, &settings),
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.images, b.images);
    assert_eq!(img_srcs(&a.html)[0], a.images[0]);
    assert_eq!(img_srcs(&b.html)[0], b.images[0]);
}

#[tokio::test]
async fn generate_to_file_writes_page_atomically() {
    let mock = spawn_mock(StatusCode::OK, completion_reply(&echo_markup(1))).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("landing_page.html");

    let result = generate_to_file(&widget_page(1), &[image(1)], &mock.settings(), &path)
        .await
        .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, result.html);
    assert!(!path.with_extension("html.tmp").exists());
}

#[test]
fn generate_sync_outside_runtime() {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let mock = rt.block_on(spawn_mock(StatusCode::OK, completion_reply("<main></main>")));

    let result = generate_sync(&widget_page(1), &[], &mock.settings()).unwrap();
    assert_eq!(result.html, "<main></main>");
}

#[tokio::test]
async fn failed_rename_leaves_no_temp_file() {
    let mock = spawn_mock(StatusCode::OK, completion_reply(&echo_markup(1))).await;
    let dir = tempfile::tempdir().unwrap();
    // A non-empty directory at the destination makes the final rename fail.
    let path = dir.path().join("landing_page.html");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep"), b"x").unwrap();

    let err = generate_to_file(&widget_page(1), &[], &mock.settings(), &path)
        .await
        .unwrap_err();

    assert!(matches!(err, BrandPageError::OutputWriteFailed { .. }), "got: {err:?}");
    assert!(!path.with_extension("html.tmp").exists());
    assert!(path.join("keep").exists());
}
