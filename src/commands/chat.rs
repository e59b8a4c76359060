use std::path::Path;

use tauri::State;
use tracing::warn;

use crate::conversation::Turn;
use crate::document::UploadedDocument;
use crate::pipeline::{self, SkippedDocument, SubmitResponse};
use crate::AppState;

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Submit a question with zero or more attached files.
///
/// Returns the assistant's reply together with any documents that were
/// skipped, so the frontend can show a "files skipped" notice.
#[tauri::command]
pub async fn send_message(
    state: State<'_, AppState>,
    question: String,
    files: Vec<String>,
) -> Result<SubmitResponse, String> {
    let mut documents = Vec::new();
    let mut unreadable = Vec::new();

    for file in &files {
        let path = Path::new(file);
        match UploadedDocument::from_path(path) {
            Ok(document) => documents.push(document),
            Err(e) => {
                warn!(file = %file, error = %e, "cannot read file, skipping");
                unreadable.push(SkippedDocument::failed(display_name(path), e.to_string()));
            }
        }
    }

    let mut conversation = state.conversation.lock().await;
    let mut response =
        pipeline::handle_submit(&mut conversation, &state.client, &question, &documents).await;
    response.skipped.extend(unreadable);
    Ok(response)
}

/// Ordered transcript of the current session.
#[tauri::command]
pub async fn transcript(state: State<'_, AppState>) -> Result<Vec<Turn>, String> {
    let conversation = state.conversation.lock().await;
    Ok(conversation.turns().to_vec())
}

/// Reset the transcript to an empty sequence. Triggered by the
/// "Clear Chat History" control.
#[tauri::command]
pub async fn clear_conversation(state: State<'_, AppState>) -> Result<(), String> {
    let mut conversation = state.conversation.lock().await;
    conversation.clear();
    Ok(())
}
