//! Glimpse — Tauri application entry point.
//!
//! This is the app shell that wires together:
//! - Conversation store and question pipeline (conversation/, pipeline)
//! - Screen capture domain (capture/)
//! - Remote model client (llm/)
//! - Session controller and launcher window glue (controller, launcher)
//! - Global hotkey and Tauri command handlers

pub mod capture;
pub mod config;
pub mod controller;
pub mod conversation;
pub mod launcher;
pub mod llm;
pub mod pipeline;

use capture::{CaptureSource, XcapCaptureSource};
use controller::{InteractionController, Launcher};
use conversation::ConversationStore;
use launcher::TauriLauncher;
use llm::{ModelClient, OpenAiClient};
use pipeline::QuestionPipeline;
use std::sync::{Arc, Mutex};
use tauri::Manager;
use tauri_plugin_global_shortcut::{Code, GlobalShortcutExt, Modifiers, Shortcut, ShortcutState};

/// Tauri command: submit a question for the current screen.
///
/// Returns immediately; the answer arrives as an `answer` event once the
/// background run completes. Rejected while a run is in flight.
#[tauri::command]
async fn ask(
    controller: tauri::State<'_, Arc<InteractionController>>,
    question: String,
) -> Result<(), String> {
    controller.inner().submit(&question).map_err(|e| e.to_string())
}

/// Tauri command: clear the conversation history.
#[tauri::command]
fn reset_conversation(
    controller: tauri::State<'_, Arc<InteractionController>>,
) -> Result<(), String> {
    controller.reset().map_err(|e| e.to_string())
}

/// Tauri command: show the launcher if hidden, hide it if visible.
#[tauri::command]
fn toggle_launcher(controller: tauri::State<'_, Arc<InteractionController>>) {
    controller.toggle();
}

/// Entry point — called by the Tauri runtime.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::init();

    let settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("[CONFIG] {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let client: Arc<dyn ModelClient> = match OpenAiClient::new(&settings) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(Mutex::new(ConversationStore::new(config::SYSTEM_PROMPT)));
    let capture: Arc<dyn CaptureSource> = Arc::new(XcapCaptureSource);
    let pipeline = Arc::new(QuestionPipeline::new(
        Arc::clone(&store),
        capture,
        client,
        settings.launcher_request(),
    ));

    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            ask,
            reset_conversation,
            toggle_launcher
        ])
        .setup(move |app| {
            log::info!("Glimpse starting up");

            let launcher: Arc<dyn Launcher> = Arc::new(TauriLauncher::new(app.handle().clone()));
            let controller = InteractionController::new(launcher, pipeline, store);
            app.manage(controller);

            app.handle().plugin(
                tauri_plugin_global_shortcut::Builder::new()
                    .with_handler(|app, shortcut, event| {
                        if event.state() == ShortcutState::Pressed
                            && shortcut.matches(Modifiers::CONTROL | Modifiers::SHIFT, Code::KeyA)
                        {
                            log::info!("[HOTKEY] Toggle requested");
                            app.state::<Arc<InteractionController>>().toggle();
                        }
                    })
                    .build(),
            )?;
            app.global_shortcut().register(Shortcut::new(
                Some(Modifiers::CONTROL | Modifiers::SHIFT),
                Code::KeyA,
            ))?;
            log::info!("Global hotkey registered: Ctrl+Shift+A");

            Ok(())
        })
        .on_window_event(|window, event| {
            // The close button hides the launcher; the hotkey brings it back.
            if let tauri::WindowEvent::CloseRequested { api, .. } = event {
                api.prevent_close();
                let _ = window.hide();
            }
        })
        .run(tauri::generate_context!())
        .expect("Error running Glimpse");
}
