//! Concept-extraction and polish prompts, plus the tolerant parser for the
//! extraction response.

/// Prompt asking the model for a start/target concept pair in a fixed
/// two-field format. The model is not schema-constrained, so the reply must
/// be parsed defensively.
pub fn extraction_prompt(query: &str) -> String {
    format!(
        "\nExtract the most relevant start and target concepts (key medical entities) \
         from the following question.\n\
         Respond ONLY in the format: start_concept: <value>, target_concept: <value>\n\n\
         Question: \"{query}\"\n"
    )
}

/// Prompt asking the model to rewrite a raw answer for presentation.
pub fn polish_prompt(raw_answer: &str) -> String {
    format!("Polish and present the following answer clearly for a medical professional:\n\n{raw_answer}")
}

/// Parses `start_concept: <value>, target_concept: <value>`.
///
/// Any deviation from the two-field shape (missing comma, missing colon,
/// empty value) yields `(None, None)` so the pipeline degrades to
/// retrieval-only context instead of failing the query. All-or-nothing: a
/// malformed second field discards the first as well.
pub fn parse_concepts(response: &str) -> (Option<String>, Option<String>) {
    let mut fields = response.trim().splitn(2, ',');
    let start = fields.next().and_then(field_value);
    let target = fields.next().and_then(field_value);
    match (start, target) {
        (Some(start), Some(target)) => (Some(start), Some(target)),
        _ => (None, None),
    }
}

fn field_value(field: &str) -> Option<String> {
    let (_, value) = field.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
