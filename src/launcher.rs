//! Tauri launcher window glue.
//!
//! Maps the controller's `Launcher` calls onto the floating webview
//! window: show/hide on the window handle, everything else as events the
//! frontend consumes on its own event loop. Emission failures are logged
//! and dropped — a missing window must never take a run down with it.

use crate::controller::Launcher;
use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, WebviewWindow};

/// Label of the launcher window in `tauri.conf.json`.
pub const LAUNCHER_WINDOW: &str = "launcher";

pub struct TauriLauncher {
    app: AppHandle,
}

#[derive(Serialize, Clone)]
struct AnswerPayload<'a> {
    question: &'a str,
    answer: &'a str,
}

impl TauriLauncher {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn window(&self) -> Option<WebviewWindow> {
        let window = self.app.get_webview_window(LAUNCHER_WINDOW);
        if window.is_none() {
            log::error!("[LAUNCHER] Window '{}' not found", LAUNCHER_WINDOW);
        }
        window
    }

    fn emit<P: Serialize + Clone>(&self, event: &str, payload: P) {
        if let Err(e) = self.app.emit(event, payload) {
            log::error!("[LAUNCHER] Failed to emit '{}': {}", event, e);
        }
    }
}

impl Launcher for TauriLauncher {
    fn show(&self) {
        if let Some(window) = self.window() {
            let _ = window.show();
            let _ = window.set_focus();
        }
    }

    fn hide(&self) {
        if let Some(window) = self.window() {
            let _ = window.hide();
        }
    }

    fn is_visible(&self) -> bool {
        self.window()
            .and_then(|w| w.is_visible().ok())
            .unwrap_or(false)
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.emit("input-enabled", enabled);
    }

    fn status(&self, message: &str) {
        self.emit("status", message);
    }

    fn render_answer(&self, question: &str, answer: &str) {
        self.emit("answer", AnswerPayload { question, answer });
    }

    fn render_error(&self, message: &str) {
        self.emit("run-error", message);
    }

    fn clear_transcript(&self) {
        self.emit("transcript-cleared", ());
    }
}
