/// Separator placed between documents in the assembled context block.
const DOCUMENT_DELIMITER: &str = "\n\n---\n\n";

/// Join extracted document texts into a single context block.
///
/// Empty extractions are dropped and the rest are joined in input order.
/// The delimiter only ever appears between two surviving entries. With no
/// usable text this returns the empty string, which the prompt builder
/// treats as "no context".
pub fn assemble_context(texts: &[String]) -> String {
    let parts: Vec<&str> = texts
        .iter()
        .map(String::as_str)
        .filter(|text| !text.is_empty())
        .collect();
    parts.join(DOCUMENT_DELIMITER)
}
