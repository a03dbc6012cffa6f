//! Pipeline stages for landing-page generation.
//!
//! Each submodule implements exactly one transformation step, so each can be
//! tested without the others.
//!
//! ## Data Flow
//!
//! ```text
//! encode ──▶ (prompt) ──▶ llm ──▶ postprocess
//! (base64)               (POST)   (fence + sentinels)
//! ```
//!
//! 1. [`encode`]      — raw image bytes to positional `IMAGE_n` data URIs
//! 2. [`crate::prompts`] — render the instruction text (not a stage module
//!    because it is shared with the post-processor)
//! 3. [`llm`]         — the single network call; the only stage with I/O
//! 4. [`postprocess`] — strip the `html` fence and swap sentinels for `<img>`

pub mod encode;
pub mod llm;
pub mod postprocess;
