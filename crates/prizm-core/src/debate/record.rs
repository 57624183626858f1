//! Debate record models.
//!
//! These types are the frozen dataset schema: fixture files written for one
//! implementation must round-trip through these shapes unchanged.

use serde::{Deserialize, Serialize};

/// The factor under analysis, as identified by the extraction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    pub title: String,
    pub description: String,
    /// Passage of the source document the factor was extracted from.
    pub source_quote: String,
}

/// The argument made in favour of a factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportiveArgument {
    pub summary: String,
    pub logic: String,
}

/// A single flaw found in a supportive claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    pub target_claim: String,
    pub flaw: String,
}

/// The argument made against a factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpposingArgument {
    pub summary: String,
    #[serde(default)]
    pub critiques: Vec<Critique>,
    #[serde(default)]
    pub missing_context: String,
}

/// One factor's complete debate: extraction, support and opposition.
///
/// A record always expands to four transcript messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateRecord {
    pub factor: Factor,
    pub supportive: SupportiveArgument,
    pub opposing: OpposingArgument,
}

/// An ordered collection of debate records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateDataset {
    pub records: Vec<DebateRecord>,
}

impl DebateDataset {
    pub fn new(records: Vec<DebateRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<DebateRecord>> for DebateDataset {
    fn from(records: Vec<DebateRecord>) -> Self {
        Self::new(records)
    }
}
