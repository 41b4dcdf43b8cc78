//! Context-blob assembly for the generation prompt.

use itertools::Itertools;

use crate::retrieval::Snippet;

/// Concatenates retrieved snippets and, when graph reasoning ran, its
/// rendered path (or failure message) into the single context blob handed to
/// the answer generator.
pub fn assemble_context(snippets: &[Snippet], reasoning: Option<&str>) -> String {
    let mut context = snippets.iter().map(|s| s.text.as_str()).join("\n");
    if let Some(path) = reasoning {
        if !path.is_empty() {
            context.push_str(&format!("\n\nGraph Reasoning Path: {path}"));
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snip(text: &str) -> Snippet {
        Snippet {
            text: text.to_string(),
            score: 0.5,
        }
    }

    #[test]
    fn joins_snippets_with_newlines() {
        let out = assemble_context(&[snip("one"), snip("two")], None);
        assert_eq!(out, "one\ntwo");
    }

    #[test]
    fn appends_reasoning_path_when_present() {
        let out = assemble_context(&[snip("one")], Some("A -> B"));
        assert_eq!(out, "one\n\nGraph Reasoning Path: A -> B");
    }

    #[test]
    fn empty_reasoning_is_omitted() {
        let out = assemble_context(&[snip("one")], Some(""));
        assert_eq!(out, "one");
    }
}
