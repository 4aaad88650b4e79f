//! Session orchestration — visibility, mutual exclusion, restoration.
//!
//! Owns the busy flag that serializes runs: at most one question is in
//! flight, and a second submission is rejected outright rather than
//! queued — overlapping capture windows would corrupt the hide→capture→
//! restore sequence. UI operations go through the `Launcher` trait; the
//! Tauri implementation lives in the `launcher` module.

use crate::conversation::ConversationStore;
use crate::pipeline::{QuestionPipeline, Stage, StatusSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Delay between hiding the window and grabbing the frame, so the hide
/// actually lands on screen before the capture.
pub const HIDE_SETTLE_MS: u64 = 300;

/// The UI surface as the controller sees it.
///
/// Implementations must marshal onto their own UI context; the controller
/// calls these from worker tasks.
pub trait Launcher: Send + Sync {
    fn show(&self);
    fn hide(&self);
    fn is_visible(&self) -> bool;
    fn set_input_enabled(&self, enabled: bool);
    fn status(&self, message: &str);
    fn render_answer(&self, question: &str, answer: &str);
    fn render_error(&self, message: &str);
    fn clear_transcript(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("A question is already being processed")]
    Busy,

    #[error("Question is empty")]
    EmptyQuestion,
}

/// The single stateful orchestrator of a session.
pub struct InteractionController {
    launcher: Arc<dyn Launcher>,
    pipeline: Arc<QuestionPipeline>,
    store: Arc<Mutex<ConversationStore>>,
    busy: Arc<AtomicBool>,
}

impl InteractionController {
    pub fn new(
        launcher: Arc<dyn Launcher>,
        pipeline: Arc<QuestionPipeline>,
        store: Arc<Mutex<ConversationStore>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            launcher,
            pipeline,
            store,
            busy: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Accept a question and dispatch the run on a background task.
    ///
    /// Rejects while a run is in flight; the claim is a compare-exchange,
    /// so two racing submissions cannot both start.
    pub fn submit(self: &Arc<Self>, question: &str) -> Result<(), ControlError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ControlError::EmptyQuestion);
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::warn!("[SESSION] Rejected question — a run is already in flight");
            return Err(ControlError::Busy);
        }

        self.launcher.set_input_enabled(false);

        let this = Arc::clone(self);
        let question = question.to_string();
        tokio::spawn(async move {
            this.run(question).await;
        });

        Ok(())
    }

    /// Drive one run to its terminal state.
    ///
    /// The guard restores the window, re-enables input, and clears the
    /// busy flag on EVERY exit path — including an unwind out of the
    /// pipeline.
    async fn run(&self, question: String) {
        let _restore = RestoreGuard {
            launcher: Arc::clone(&self.launcher),
            busy: Arc::clone(&self.busy),
        };

        self.launcher.status("📸 Hiding window and capturing screen...");
        self.launcher.hide();
        tokio::time::sleep(Duration::from_millis(HIDE_SETTLE_MS)).await;

        let sink = LauncherStatus {
            launcher: Arc::clone(&self.launcher),
        };

        match self.pipeline.run(&question, &sink).await {
            Ok(answer) => {
                self.launcher.render_answer(&question, &answer);
            }
            Err(e) => {
                log::error!("[SESSION] Run failed: {}", e);
                self.launcher.render_error(&e.to_string());
            }
        }
    }

    /// Hotkey entry point: show if hidden, hide if visible.
    ///
    /// Ignored while busy — the in-flight run owns visibility and will
    /// restore it at its terminal state.
    pub fn toggle(&self) {
        if self.is_busy() {
            log::debug!("[SESSION] Toggle ignored — run in flight");
            return;
        }
        if self.launcher.is_visible() {
            self.launcher.hide();
        } else {
            self.launcher.show();
        }
    }

    /// Clear the conversation. Only allowed between runs.
    pub fn reset(&self) -> Result<(), ControlError> {
        if self.is_busy() {
            return Err(ControlError::Busy);
        }
        self.store
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .reset();
        self.launcher.clear_transcript();
        self.launcher
            .status("✅ Session reset - conversation history cleared");
        Ok(())
    }
}

/// Restores UI state when a run terminates, however it terminates.
struct RestoreGuard {
    launcher: Arc<dyn Launcher>,
    busy: Arc<AtomicBool>,
}

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        self.launcher.show();
        self.launcher.set_input_enabled(true);
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Forwards pipeline stage transitions to the launcher's status line.
struct LauncherStatus {
    launcher: Arc<dyn Launcher>,
}

impl StatusSink for LauncherStatus {
    fn update(&self, stage: Stage) {
        self.launcher.status(stage.message());
    }
}
