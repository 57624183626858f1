//! Debate script compiler.
//!
//! Expands debate records into the ordered message payloads a delivery job
//! plays back. Each record becomes four messages (extraction, supportive,
//! opposing, synthesis) and the script always ends with one completion
//! marker.

use super::record::{DebateRecord, OpposingArgument};
use crate::session::{MessagePayload, MessageRole};

/// Number of messages a single record expands to.
pub const MESSAGES_PER_RECORD: usize = 4;

/// Compiles debate records into a delivery script.
///
/// Pure and deterministic: the same records always produce the same
/// sequence. An empty slice yields only the completion marker.
pub fn compile(records: &[DebateRecord]) -> Vec<MessagePayload> {
    let mut script = Vec::with_capacity(script_len(records.len()));

    for record in records {
        script.push(MessagePayload::new(
            MessageRole::Extractor,
            extraction_body(record),
        ));
        script.push(MessagePayload::new(
            MessageRole::Supportive,
            supportive_body(record),
        ));
        script.push(MessagePayload::new(
            MessageRole::Opposing,
            opposing_body(&record.opposing),
        ));
        script.push(MessagePayload::new(
            MessageRole::Synthesizer,
            synthesis_body(record),
        ));
    }

    script.push(completion_marker(records.len()));
    script
}

/// Length of the script compiled from `record_count` records.
pub fn script_len(record_count: usize) -> usize {
    record_count * MESSAGES_PER_RECORD + 1
}

/// The synthetic message that ends every script.
pub fn completion_marker(record_count: usize) -> MessagePayload {
    let noun = if record_count == 1 { "factor" } else { "factors" };
    MessagePayload::new(
        MessageRole::CompletionMarker,
        format!("Analysis complete: {record_count} {noun} debated."),
    )
}

fn extraction_body(record: &DebateRecord) -> String {
    let factor = &record.factor;
    let mut body = format!("**Factor:** {}\n\n{}", factor.title, factor.description);
    if !factor.source_quote.trim().is_empty() {
        body.push_str("\n\n> ");
        body.push_str(factor.source_quote.trim());
    }
    body
}

fn supportive_body(record: &DebateRecord) -> String {
    format!(
        "**Supportive view on {}:** {}\n\n{}",
        record.factor.title, record.supportive.summary, record.supportive.logic
    )
}

fn opposing_body(opposing: &OpposingArgument) -> String {
    let mut body = format!("**Opposing view:** {}", opposing.summary);

    if !opposing.critiques.is_empty() {
        body.push('\n');
        for critique in &opposing.critiques {
            body.push_str(&format!(
                "\n- *{}*: {}",
                critique.target_claim, critique.flaw
            ));
        }
    }

    if !opposing.missing_context.trim().is_empty() {
        body.push_str("\n\n**Missing context:** ");
        body.push_str(opposing.missing_context.trim());
    }
    body
}

fn synthesis_body(record: &DebateRecord) -> String {
    let critique_count = record.opposing.critiques.len();
    let critiques = match critique_count {
        0 => "no specific critiques".to_string(),
        1 => "1 critique".to_string(),
        n => format!("{n} critiques"),
    };

    let mut body = format!("**Synthesis on {}:** ", record.factor.title);
    match sentence(&record.supportive.summary) {
        Some(claim) => body.push_str(&format!("the supportive case holds that {claim}")),
        None => body.push_str("the supportive case states no summary."),
    }
    body.push_str(&format!(" The opposing case raises {critiques}"));
    match sentence(&record.opposing.summary) {
        Some(claim) => body.push_str(&format!(" and argues that {claim}")),
        None => body.push('.'),
    }

    if record.opposing.missing_context.trim().is_empty() {
        body.push_str("\n\nBoth positions rest on the evidence presented.");
    } else {
        body.push_str("\n\nA verdict depends on context the source leaves out.");
    }
    body
}

/// Turns a summary into a clause continuing "... holds that".
///
/// The first letter is lowered only when it starts an ordinary capitalized
/// word, so acronyms like "EU" survive. Blank summaries yield `None`.
fn sentence(text: &str) -> Option<String> {
    let text = text.trim();
    let mut chars = text.chars();
    let first = chars.next()?;
    let lower_first = first.is_uppercase() && chars.next().is_some_and(char::is_lowercase);

    let mut out = if lower_first {
        first.to_lowercase().chain(text.chars().skip(1)).collect()
    } else {
        text.to_string()
    };
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::builtin::builtin_dataset;
    use crate::debate::record::{Critique, Factor, SupportiveArgument};

    fn record(title: &str, critiques: usize, missing_context: &str) -> DebateRecord {
        DebateRecord {
            factor: Factor {
                title: title.to_string(),
                description: format!("{title} description"),
                source_quote: format!("quote about {title}"),
            },
            supportive: SupportiveArgument {
                summary: "Revenue grew steadily".to_string(),
                logic: "Three consecutive quarters of growth.".to_string(),
            },
            opposing: OpposingArgument {
                summary: "Growth was driven by one client".to_string(),
                critiques: (0..critiques)
                    .map(|i| Critique {
                        target_claim: format!("claim {i}"),
                        flaw: format!("flaw {i}"),
                    })
                    .collect(),
                missing_context: missing_context.to_string(),
            },
        }
    }

    #[test]
    fn test_empty_dataset_yields_only_marker() {
        let script = compile(&[]);
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].role, MessageRole::CompletionMarker);
        assert_eq!(script[0].body, "Analysis complete: 0 factors debated.");
    }

    #[test]
    fn test_expansion_is_four_per_record_plus_marker() {
        for n in 0..6 {
            let records: Vec<_> = (0..n).map(|i| record(&format!("F{i}"), i, "")).collect();
            let script = compile(&records);

            assert_eq!(script.len(), 4 * n + 1);
            assert_eq!(script.len(), script_len(n));
            for (i, payload) in script[..4 * n].iter().enumerate() {
                assert_eq!(payload.role, MessageRole::DEBATE_CYCLE[i % 4]);
            }
            assert_eq!(script.last().unwrap().role, MessageRole::CompletionMarker);
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let dataset = builtin_dataset();
        assert_eq!(compile(&dataset.records), compile(&dataset.records));
    }

    #[test]
    fn test_record_order_is_preserved() {
        let records = vec![record("Liquidity", 0, ""), record("Governance", 0, "")];
        let script = compile(&records);

        assert!(script[0].body.contains("Liquidity"));
        assert!(script[4].body.contains("Governance"));
    }

    #[test]
    fn test_opposing_body_lists_critiques_and_missing_context() {
        let script = compile(&[record("Liquidity", 2, "Cash reserves are not disclosed.")]);
        let opposing = &script[2].body;

        assert!(opposing.contains("- *claim 0*: flaw 0"));
        assert!(opposing.contains("- *claim 1*: flaw 1"));
        assert!(opposing.contains("**Missing context:** Cash reserves are not disclosed."));
    }

    #[test]
    fn test_synthesis_reflects_both_sides() {
        let script = compile(&[record("Liquidity", 1, "")]);
        let synthesis = &script[3].body;

        assert!(synthesis.starts_with("**Synthesis on Liquidity:**"));
        assert!(synthesis.contains("revenue grew steadily."));
        assert!(synthesis.contains("1 critique"));
        assert!(synthesis.contains("growth was driven by one client."));
    }

    #[test]
    fn test_synthesis_keeps_acronyms() {
        let mut r = record("Regulation", 2, "");
        r.supportive.summary = "EU rules favour the plan".to_string();
        let synthesis = &compile(&[r])[3].body;

        assert!(synthesis.contains("holds that EU rules favour the plan."));
    }

    #[test]
    fn test_synthesis_with_blank_summaries() {
        let mut r = record("Regulation", 2, "Timeline unknown.");
        r.supportive.summary = "  ".to_string();
        r.opposing.summary = String::new();
        let synthesis = &compile(&[r])[3].body;

        assert!(synthesis.contains("the supportive case states no summary."));
        assert!(synthesis.contains("The opposing case raises 2 critiques.\n\n"));
        assert!(!synthesis.contains("argues that"));
        assert!(!synthesis.contains("holds that"));
    }

    #[test]
    fn test_marker_singular() {
        assert_eq!(
            completion_marker(1).body,
            "Analysis complete: 1 factor debated."
        );
    }

    #[test]
    fn test_extraction_omits_blank_quote() {
        let mut r = record("Liquidity", 0, "");
        r.factor.source_quote = "  ".to_string();
        let script = compile(&[r]);
        assert!(!script[0].body.contains('>'));
    }
}
