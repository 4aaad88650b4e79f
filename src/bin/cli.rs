//! Terminal surface for Glimpse.
//!
//! A line-oriented conversational loop: each question triggers a capture
//! and a model round trip against the shared transcript. `quit`, `exit`
//! and `q` (case-insensitive) leave with exit code 0; an empty line
//! re-prompts without touching the pipeline; `reset` clears the
//! conversation.

use glimpse_lib::capture::{CaptureSource, XcapCaptureSource};
use glimpse_lib::config::{self, Settings};
use glimpse_lib::conversation::ConversationStore;
use glimpse_lib::llm::{ModelClient, OpenAiClient};
use glimpse_lib::pipeline::{QuestionPipeline, Stage, StatusSink};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Stage reporting for the terminal: progress goes to stderr so stdout
/// stays clean for answers.
struct TermStatus;

impl StatusSink for TermStatus {
    fn update(&self, stage: Stage) {
        eprintln!("{}", stage.message());
    }
}

fn divider() -> String {
    "─".repeat(60)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Please set it in a .env file or export it as an environment variable.");
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
    let pipeline = QuestionPipeline::new(
        Arc::clone(&store),
        capture,
        client,
        settings.cli_request(),
    );

    println!("Glimpse — ask questions about your screen and get AI-powered guidance!");
    println!("Type 'quit', 'exit' or 'q' to leave; 'reset' to clear the conversation.");
    println!();

    loop {
        print!("What would you like to know? ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }

        let question = line.trim();
        if question.is_empty() {
            println!("Please enter a question.");
            continue;
        }
        if matches!(
            question.to_lowercase().as_str(),
            "quit" | "exit" | "q"
        ) {
            println!("Goodbye!");
            break;
        }
        if question.eq_ignore_ascii_case("reset") {
            store.lock().unwrap_or_else(|e| e.into_inner()).reset();
            println!("Conversation history cleared. Start a new session.");
            continue;
        }

        match pipeline.run(question, &TermStatus).await {
            Ok(answer) => {
                println!();
                println!("{}", divider());
                println!("{}", answer);
                println!("{}", divider());
                println!();
            }
            Err(e) => {
                eprintln!("❌ {}", e);
            }
        }
    }
}
