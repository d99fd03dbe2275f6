//! Insight generation service.
//!
//! Wraps a text-generation backend with the behavior the dashboard relies on:
//! at most one request in flight, and any backend failure replaced by a fixed
//! operator-facing message. There is no retry, cancellation or timeout here;
//! backends own their transport limits.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, warn};

use crate::prompts::{build_insight_prompt, HerdSnapshot};

/// Shown instead of the generated text when the backend fails.
pub const FALLBACK_MESSAGE: &str =
    "Não foi possível gerar insights no momento. Tente novamente mais tarde.";

/// Default API base URL for the hosted backend.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Insight errors.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Insight feature unavailable: {0}")]
    Unavailable(String),

    #[error("An insight request is already in flight")]
    Busy,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

pub type InsightResult<T> = Result<T, InsightError>;

/// A text-generation backend.
pub trait InsightBackend: Send + Sync {
    /// Generate free text for a prompt.
    fn generate(&self, prompt: &str) -> InsightResult<String>;
}

/// Outcome of an insight request that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insight {
    /// Text produced by the backend, shown verbatim.
    Generated(String),
    /// The backend failed; carries [`FALLBACK_MESSAGE`].
    Fallback(String),
}

impl Insight {
    /// Text to display, whichever variant this is.
    pub fn text(&self) -> &str {
        match self {
            Insight::Generated(text) | Insight::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Insight::Fallback(_))
    }
}

/// Single-flight insight requests over a backend.
pub struct InsightService {
    backend: Box<dyn InsightBackend>,
    in_flight: AtomicBool,
}

impl InsightService {
    pub fn new(backend: Box<dyn InsightBackend>) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a request is currently pending.
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Request an insight for the given herd figures.
    ///
    /// Returns [`InsightError::Busy`] when another request is pending. Backend
    /// failures are not errors: they come back as [`Insight::Fallback`].
    pub fn request(&self, snapshot: &HerdSnapshot) -> InsightResult<Insight> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(InsightError::Busy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let prompt = build_insight_prompt(snapshot);
        debug!(prompt_len = prompt.len(), "requesting insight");

        match self.backend.generate(&prompt) {
            Ok(text) => Ok(Insight::Generated(text)),
            Err(e) => {
                warn!(error = %e, "insight generation failed");
                Ok(Insight::Fallback(FALLBACK_MESSAGE.to_string()))
            }
        }
    }
}

/// Clears the in-flight flag even if the backend panics.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Canned backend for tests and offline demos.
pub struct StaticBackend {
    response: Result<String, String>,
}

impl StaticBackend {
    /// Backend that always answers with `text`.
    pub fn answering(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// Backend that always fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
        }
    }
}

impl InsightBackend for StaticBackend {
    fn generate(&self, _prompt: &str) -> InsightResult<String> {
        self.response.clone().map_err(InsightError::Backend)
    }
}
