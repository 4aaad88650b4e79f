//! One question→answer cycle.
//!
//! Stages run in a fixed order: capture → encode → append user turn →
//! remote call → append assistant turn. Failures before the append point
//! leave the transcript untouched; a remote failure keeps the already
//! appended user turn (the send is recorded even when no reply arrives).

use crate::capture::{codec, CaptureSource};
use crate::capture::codec::EncodingError;
use crate::conversation::{ConversationStore, InvalidTurnError, Turn};
use crate::llm::{ModelClient, ModelError, RequestSettings};
use std::sync::{Arc, Mutex, MutexGuard};

/// Pipeline stage, reported through the status sink as it begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Capturing,
    Encoding,
    Appending,
    Requesting,
    Completing,
}

impl Stage {
    /// User-facing progress message for this stage.
    pub fn message(self) -> &'static str {
        match self {
            Stage::Capturing => "📸 Capturing screen...",
            Stage::Encoding => "📸 Encoding screenshot...",
            Stage::Appending => "🤖 Preparing request...",
            Stage::Requesting => "🤖 Asking the model (with conversation history)...",
            Stage::Completing => "✅ Response received",
        }
    }
}

/// Receives stage transitions while a run is in flight.
pub trait StatusSink: Send + Sync {
    fn update(&self, stage: Stage);
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Screen capture produced no image")]
    Capture,

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    InvalidTurn(#[from] InvalidTurnError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Unexpected worker fault: {0}")]
    Unexpected(String),
}

/// Orchestrates a single run against the shared conversation store.
///
/// The store is mutated only here, and only while the controller's busy
/// flag guarantees this is the sole worker in flight.
pub struct QuestionPipeline {
    store: Arc<Mutex<ConversationStore>>,
    capture: Arc<dyn CaptureSource>,
    client: Arc<dyn ModelClient>,
    request: RequestSettings,
}

impl QuestionPipeline {
    pub fn new(
        store: Arc<Mutex<ConversationStore>>,
        capture: Arc<dyn CaptureSource>,
        client: Arc<dyn ModelClient>,
        request: RequestSettings,
    ) -> Self {
        Self {
            store,
            capture,
            client,
            request,
        }
    }

    /// Run one question→answer cycle and return the answer text.
    pub async fn run(&self, question: &str, status: &dyn StatusSink) -> Result<String, PipelineError> {
        status.update(Stage::Capturing);
        let capture = Arc::clone(&self.capture);
        let captured = tokio::task::spawn_blocking(move || capture.capture())
            .await
            .map_err(join_fault)?
            .ok_or(PipelineError::Capture)?;

        status.update(Stage::Encoding);
        let image = captured.image;
        let attachment = tokio::task::spawn_blocking(move || codec::encode(&image))
            .await
            .map_err(join_fault)??;

        // The user turn goes in BEFORE the remote call; a later failure
        // leaves the question recorded without an answer.
        status.update(Stage::Appending);
        let snapshot = {
            let mut store = self.lock_store();
            store.append(Turn::user_with_attachment(question, attachment))?;
            store.snapshot()
        };

        status.update(Stage::Requesting);
        let answer = self.client.send(&snapshot, &self.request).await?;

        status.update(Stage::Completing);
        {
            let mut store = self.lock_store();
            store.append(Turn::assistant(answer.clone()))?;
            log::info!("[SESSION] Transcript now {} turns", store.len());
        }

        Ok(answer)
    }

    /// Lock the store, recovering from poisoning. A poisoned lock only
    /// means an earlier worker panicked mid-run; appends are atomic, so
    /// the transcript itself is still consistent.
    fn lock_store(&self) -> MutexGuard<'_, ConversationStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Map a worker join failure to a pipeline error, preserving the panic
/// message when there is one.
fn join_fault(err: tokio::task::JoinError) -> PipelineError {
    if err.is_panic() {
        let panic = err.into_panic();
        let message = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "worker panicked".to_string());
        PipelineError::Unexpected(message)
    } else {
        PipelineError::Unexpected("worker task was cancelled".to_string())
    }
}
