//! Herd insight generation.
//!
//! This crate turns a summary of the herd into a prompt, sends it to a
//! text-generation backend and returns free text for the dashboard. The HTTP
//! backend is only compiled with the `gemini` feature; without it callers
//! plug in their own [`InsightBackend`].

pub mod prompts;
pub mod service;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use prompts::*;
pub use service::*;
