pub mod commands;
pub mod config;
pub mod context;
pub mod conversation;
pub mod document;
pub mod extract;
pub mod llm;
pub mod pipeline;
pub mod prompt;

use config::GeminiConfig;
use conversation::Conversation;
use llm::gemini::GeminiClient;
use tauri::Manager;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Per-window application state: the one live conversation and the
/// configured generation client.
pub struct AppState {
    pub conversation: Mutex<Conversation>,
    pub client: GeminiClient,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            dotenvy::dotenv().ok();
            // A missing API key aborts startup before any window is usable.
            let config = GeminiConfig::from_env()?;
            tracing::info!(model = %config.model, "generation client configured");
            app.manage(AppState {
                conversation: Mutex::new(Conversation::new()),
                client: GeminiClient::new(config),
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::chat::send_message,
            commands::chat::transcript,
            commands::chat::clear_conversation
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
