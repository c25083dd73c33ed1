use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use engine::Currency;
use tokio::task::{AbortHandle, JoinHandle};

use crate::{AdvisorError, FinancialSnapshot, InsightError, Summarizer, build_prompt};

/// Result of one analysis request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Insight {
    Advice(String),
    Failed(InsightError),
    Cancelled,
}

impl Insight {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Advice(text) => text.clone(),
            Self::Failed(err) => err.to_string(),
            Self::Cancelled => "Analysis cancelled.".to_string(),
        }
    }
}

/// Runs analyses on the Tokio runtime, one at a time.
pub struct Advisor {
    summarizer: Arc<dyn Summarizer>,
    currency: Currency,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the spawned future completes or is dropped
/// by an abort.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Advisor {
    pub fn new(summarizer: Arc<dyn Summarizer>, currency: Currency) -> Self {
        Self {
            summarizer,
            currency,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Spawns the analysis of `snapshot`.
    ///
    /// Fails with [`AdvisorError::Busy`] while a previous task is still
    /// outstanding. Must be called from within a Tokio runtime.
    pub fn start(&self, snapshot: &FinancialSnapshot) -> Result<InsightTask, AdvisorError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("analysis requested while another is running");
            return Err(AdvisorError::Busy);
        }
        let guard = InFlight(Arc::clone(&self.in_flight));

        let prompt = build_prompt(snapshot, self.currency);
        let summarizer = Arc::clone(&self.summarizer);
        tracing::info!("analysis started");
        let handle = tokio::spawn(async move {
            let _guard = guard;
            summarizer.summarize(&prompt).await
        });
        Ok(InsightTask { handle })
    }
}

/// Handle on a running analysis.
///
/// Dropping it does not cancel the analysis; call [`InsightTask::cancel`].
pub struct InsightTask {
    handle: JoinHandle<Result<String, InsightError>>,
}

impl InsightTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the analysis to end.
    pub async fn outcome(self) -> Insight {
        match self.handle.await {
            Ok(Ok(text)) if text.trim().is_empty() => {
                tracing::warn!("summarizer returned blank text");
                Insight::Failed(InsightError::EmptyResponse)
            }
            Ok(Ok(text)) => {
                tracing::info!(chars = text.len(), "analysis finished");
                Insight::Advice(text)
            }
            Ok(Err(err)) => {
                tracing::warn!(error = ?err, "analysis failed");
                Insight::Failed(err)
            }
            Err(err) if err.is_cancelled() => {
                tracing::info!("analysis cancelled");
                Insight::Cancelled
            }
            Err(err) => {
                tracing::error!(%err, "analysis task panicked");
                Insight::Failed(InsightError::Transport(err.to_string()))
            }
        }
    }
}
