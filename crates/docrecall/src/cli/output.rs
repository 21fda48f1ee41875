//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use docrecall_config::RerankParams;
use docrecall_search::SearchOutcome;
use serde::Serialize;

/// Re-ranking parameters echoed for the downstream phase.
#[derive(Serialize)]
struct RerankEcho {
    /// Minimum semantic similarity.
    threshold: f64,
    /// Optional heading cap.
    top_k: Option<usize>,
    /// CJK-ratio threshold for language detection.
    lang_threshold: f64,
}

/// The full JSON response envelope.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The engine outcome, flattened into the envelope.
    #[serde(flatten)]
    outcome: &'a SearchOutcome,
    /// Echoed re-ranking parameters, when any were supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    rerank_params: Option<RerankEcho>,
}

/// Outputs a search outcome as JSON or as the fixed-format text block.
pub fn output_search(
    outcome: &SearchOutcome,
    json: bool,
    rerank: Option<&RerankParams>,
) -> ExitCode {
    if json {
        let envelope = JsonSearchOutput {
            outcome,
            rerank_params: rerank.map(|params| RerankEcho {
                threshold: params.threshold,
                top_k: params.top_k,
                lang_threshold: params.lang_threshold,
            }),
        };
        match serde_json::to_string_pretty(&envelope) {
            Ok(json_str) => println!("{json_str}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    print!("{}", render_text(outcome));
    ExitCode::SUCCESS
}

/// Renders the fixed-format text block.
///
/// Empty results still render the full header so callers always see a
/// well-formed block.
fn render_text(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("query: {}\n", outcome.query.join(" | ")));
    out.push_str(&format!(
        "doc-sets: {}\n",
        outcome.doc_sets_found.join(", ")
    ));
    out.push_str(&format!(
        "fallback: toc={} grep={}\n\n",
        yes_no(outcome.toc_fallback),
        yes_no(outcome.grep_fallback)
    ));

    if outcome.results.is_empty() {
        out.push_str("no matches\n");
        return out;
    }

    for page in &outcome.results {
        out.push_str(&format!(
            "[{}] {}  score={:.4}  headings={}  precision={}\n",
            page.doc_set, page.page_title, page.score, page.heading_count, page.precision_count
        ));
        for heading in &page.headings {
            out.push_str(&format!(
                "  {}  bm25={:.4}\n",
                heading.full_text, heading.bm25_sim
            ));
            if let Some(context) = &heading.related_context {
                for line in context.lines() {
                    out.push_str(&format!("      {line}\n"));
                }
            }
        }
        out.push('\n');
    }

    out
}

/// Doc-set names, one per line or as a JSON array.
pub fn output_sets(names: &[String], json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(names) {
            Ok(json_str) => println!("{json_str}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for name in names {
        println!("{name}");
    }
    ExitCode::SUCCESS
}

/// Renders a flag for the text header.
fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod test {
    use super::*;

    fn empty_outcome() -> SearchOutcome {
        SearchOutcome {
            success: true,
            toc_fallback: true,
            grep_fallback: false,
            query: vec!["install".into(), "setup".into()],
            doc_sets_found: vec!["docs".into()],
            results: Vec::new(),
        }
    }

    #[test]
    fn empty_results_render_well_formed_block() {
        let text = render_text(&empty_outcome());
        assert!(text.contains("query: install | setup"));
        assert!(text.contains("doc-sets: docs"));
        assert!(text.contains("fallback: toc=yes grep=no"));
        assert!(text.contains("no matches"));
    }

    #[test]
    fn json_envelope_includes_rerank_echo_only_when_present() {
        let value = serde_json::to_value(JsonSearchOutput {
            outcome: &empty_outcome(),
            rerank_params: None,
        })
        .unwrap();
        assert!(value.get("rerank_params").is_none());
        assert_eq!(value["success"], true);
        assert_eq!(value["query"][0], "install");

        let value = serde_json::to_value(JsonSearchOutput {
            outcome: &empty_outcome(),
            rerank_params: Some(RerankEcho {
                threshold: 0.5,
                top_k: Some(10),
                lang_threshold: 0.6,
            }),
        })
        .unwrap();
        assert_eq!(value["rerank_params"]["top_k"], 10);
    }
}
