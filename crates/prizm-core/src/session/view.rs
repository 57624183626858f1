//! Active view state for the session UI.

use serde::{Deserialize, Serialize};

/// Which session, if any, the user is currently looking at.
///
/// The controller starts in `NoSessionSelected` and has no terminal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ActiveView {
    /// Entry/placeholder state: no session is shown.
    #[default]
    NoSessionSelected,
    /// A session is shown.
    SessionActive {
        /// The ID of the shown session.
        session_id: String,
    },
}

impl ActiveView {
    pub fn session_id(&self) -> Option<&str> {
        match self {
            ActiveView::NoSessionSelected => None,
            ActiveView::SessionActive { session_id } => Some(session_id),
        }
    }
}
