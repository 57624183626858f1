//! Builtin debate dataset.
//!
//! Shipped so the application can play back a complete analysis without a
//! dataset file on disk.

use super::record::{
    Critique, DebateDataset, DebateRecord, Factor, OpposingArgument, SupportiveArgument,
};

/// Returns the system-defined demo dataset.
///
/// Two factors drawn from a fictional quarterly business report:
/// - Revenue concentration
/// - Expansion timeline
pub fn builtin_dataset() -> DebateDataset {
    DebateDataset::new(vec![
        DebateRecord {
            factor: Factor {
                title: "Revenue concentration".to_string(),
                description: "How dependent the reported growth is on a small number of customers."
                    .to_string(),
                source_quote: "Revenue rose 18% year over year, led by our largest enterprise accounts."
                    .to_string(),
            },
            supportive: SupportiveArgument {
                summary: "Enterprise accounts are sticky and renew on multi-year contracts."
                    .to_string(),
                logic: "Large customers carry high switching costs, so revenue tied to them is more predictable than the headline concentration suggests."
                    .to_string(),
            },
            opposing: OpposingArgument {
                summary: "Growth that depends on a handful of accounts is fragile.".to_string(),
                critiques: vec![
                    Critique {
                        target_claim: "Enterprise accounts are sticky".to_string(),
                        flaw: "No renewal rates are reported, so stickiness is asserted rather than shown."
                            .to_string(),
                    },
                    Critique {
                        target_claim: "Revenue is predictable".to_string(),
                        flaw: "Losing a single top account would erase most of the reported growth."
                            .to_string(),
                    },
                ],
                missing_context: "The share of revenue held by the top five customers.".to_string(),
            },
        },
        DebateRecord {
            factor: Factor {
                title: "Expansion timeline".to_string(),
                description: "Whether the plan to open two new regions next year is realistic."
                    .to_string(),
                source_quote: "We expect both new regional offices to be operational within twelve months."
                    .to_string(),
            },
            supportive: SupportiveArgument {
                summary: "The company has opened a region on schedule before.".to_string(),
                logic: "A prior launch completed in eleven months with the same leadership team, which suggests the operational playbook exists."
                    .to_string(),
            },
            opposing: OpposingArgument {
                summary: "Running two launches in parallel is a different problem than one."
                    .to_string(),
                critiques: vec![Critique {
                    target_claim: "The playbook exists".to_string(),
                    flaw: "A single past success does not show capacity for two concurrent launches."
                        .to_string(),
                }],
                missing_context: String::new(),
            },
        },
    ])
}
