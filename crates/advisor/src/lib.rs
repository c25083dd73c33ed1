//! AI-generated financial advice.
//!
//! A [`FinancialSnapshot`] of the ledger is rendered into a prompt and handed
//! to a [`Summarizer`]. [`Advisor`] runs that call as a cancellable Tokio task
//! and allows a single outstanding analysis at a time.

use async_trait::async_trait;

pub use error::{AdvisorError, InsightError};
pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient};
pub use prompt::{FinancialSnapshot, build_prompt};
pub use runner::{Advisor, Insight, InsightTask};

mod error;
mod gemini;
mod prompt;
mod runner;

/// Turns a prompt into advisory text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String, InsightError>;
}
