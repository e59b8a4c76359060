/// Instruction template for grounded answers.
///
/// The wording is a functional contract, not cosmetics: consumers of the
/// generated output look for the "Sources:" and "Confidence:" sections and
/// the "Not found in context." fallback, so changes here change what the
/// assistant produces.
const GROUNDED_TEMPLATE: &str = r#"
System role: You are a careful regulatory/SEO writer. You must rely on the provided context. If facts are not present in the context, say “Not found in context.”

Instructions:

Read the user question and the context chunks. Extract only the passages that answer the question. If nothing is relevant, respond “Not found in context.”.

Write a clear answer grounded ONLY in those passages. Do not invent facts. Prefer short sentences and practical steps..

After the answer, add “Sources:” with bullet list of the exact titles/sections you used, with anchor quotes (short verbatim) from the context..

Add “Confidence:” as High/Medium/Low based on how directly the passages answer the question..

If multiple passages conflict, state the conflict and prefer the most recent/official document..

Constraints:

No external knowledge unless explicitly asked; if you add general knowledge, label it “General context (not in sources).”.

For queries about MDR/UDI/EUDAMED, prefer official guidance (e.g., MDCG, EU websites) in the retrieved set when present..

Keep the final answer under 200–300 words unless asked for detail..

Document Context:
{context}

User Question:
{question}
"#;

/// Build the final prompt for one submission.
///
/// With no context the question passes through verbatim — no instructions,
/// no grounding. Otherwise both fields are substituted into the grounded
/// template in a single pass, so placeholder-looking text inside either
/// value stays literal. No escaping, no truncation.
pub fn build_prompt(question: &str, context: &str) -> String {
    if context.is_empty() {
        return question.to_string();
    }

    // The two slots are fixed in the template source above.
    let (before_context, rest) = GROUNDED_TEMPLATE
        .split_once("{context}")
        .expect("template has a {context} slot");
    let (between, after_question) = rest
        .split_once("{question}")
        .expect("template has a {question} slot");

    let mut prompt =
        String::with_capacity(GROUNDED_TEMPLATE.len() + context.len() + question.len());
    prompt.push_str(before_context);
    prompt.push_str(context);
    prompt.push_str(between);
    prompt.push_str(question);
    prompt.push_str(after_question);
    prompt
}
