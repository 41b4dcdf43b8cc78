//! Plain-text rendering of a [`QueryReport`].

use medgraph_rag::QueryReport;

pub fn render(report: &QueryReport) -> String {
    let mut out = String::new();

    out.push_str("== Extracted Concepts ==\n");
    out.push_str(&format!(
        "Start:  {}\n",
        report.start_concept.as_deref().unwrap_or("(none)")
    ));
    out.push_str(&format!(
        "Target: {}\n",
        report.target_concept.as_deref().unwrap_or("(none)")
    ));

    out.push_str("\n== Retrieved Context ==\n");
    if report.snippets.is_empty() {
        out.push_str("(no snippets retrieved)\n");
    }
    for snippet in &report.snippets {
        out.push_str(&format!("- {} (score {:.3})\n", snippet.text, snippet.score));
    }

    if let Some(reasoning) = &report.reasoning {
        out.push_str("\n== Graph Reasoning Path ==\n");
        out.push_str(reasoning);
        out.push('\n');
    }

    out.push_str("\n== Raw Answer ==\n");
    out.push_str(&report.raw_answer);
    out.push('\n');

    if let Some(polished) = &report.polished_answer {
        out.push_str("\n== Final Answer ==\n");
        out.push_str(polished);
        out.push('\n');
    }

    out
}
