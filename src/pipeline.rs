use serde::Serialize;
use tracing::{info, warn};

use crate::context::assemble_context;
use crate::conversation::{Conversation, Turn};
use crate::document::UploadedDocument;
use crate::extract::{extract, Extraction};
use crate::llm::Generate;
use crate::prompt::build_prompt;

/// Why a document contributed no text to the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    Unsupported,
    Failed,
}

/// Report entry for a document that was dropped from the context.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub kind: SkipKind,
    pub detail: String,
}

impl SkippedDocument {
    pub fn unsupported(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            kind: SkipKind::Unsupported,
            detail: "unsupported file format".to_string(),
        }
    }

    pub fn failed(filename: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            kind: SkipKind::Failed,
            detail: detail.into(),
        }
    }
}

/// Extraction, assembly, and prompt selection for one submission.
#[derive(Debug)]
pub struct PreparedSubmission {
    pub context: String,
    pub prompt: String,
    pub skipped: Vec<SkippedDocument>,
}

/// Result of a completed submission cycle, as returned to the rendering
/// layer.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub reply: Turn,
    pub skipped: Vec<SkippedDocument>,
}

/// Run the document side of a submission: extract each file, assemble the
/// context block, and pick the prompt.
///
/// Unsupported and failing documents are skipped and reported; they never
/// abort the submission. Document order is preserved in the context block.
pub fn prepare(question: &str, documents: &[UploadedDocument]) -> PreparedSubmission {
    let mut texts = Vec::new();
    let mut skipped = Vec::new();

    for document in documents {
        match extract(document) {
            Ok(Extraction::Text(text)) => texts.push(text),
            Ok(Extraction::Unsupported) => {
                warn!(filename = %document.filename, "unsupported format, skipping");
                skipped.push(SkippedDocument::unsupported(&document.filename));
            }
            Err(e) => {
                warn!(filename = %document.filename, error = %e, "extraction failed, skipping");
                skipped.push(SkippedDocument::failed(&document.filename, e.to_string()));
            }
        }
    }

    let context = assemble_context(&texts);
    let prompt = build_prompt(question, &context);

    PreparedSubmission {
        context,
        prompt,
        skipped,
    }
}

/// Run one full submission cycle against the conversation.
///
/// Appends the user turn, generates a reply for the prepared prompt, and
/// appends the assistant turn. A generation failure becomes an
/// error-status assistant turn holding the error text; the cycle itself
/// never fails.
pub async fn handle_submit(
    conversation: &mut Conversation,
    client: &dyn Generate,
    question: &str,
    documents: &[UploadedDocument],
) -> SubmitResponse {
    conversation.append(Turn::user(question));

    let prepared = prepare(question, documents);
    info!(
        documents = documents.len(),
        skipped = prepared.skipped.len(),
        context_bytes = prepared.context.len(),
        "submission prepared"
    );

    let reply = match client.generate(&prepared.prompt).await {
        Ok(answer) => Turn::assistant(answer),
        Err(e) => {
            warn!(error = %e, "generation failed");
            Turn::assistant_error(format!("An error occurred: {e}"))
        }
    };

    conversation.append(reply.clone());

    SubmitResponse {
        reply,
        skipped: prepared.skipped,
    }
}
