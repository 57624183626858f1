//! Role-to-layout dispatch table used by presentation layers.

use super::message::MessageRole;
use serde::{Deserialize, Serialize};

/// Horizontal placement of a message bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Rendering affinity for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleStyle {
    pub role: MessageRole,
    pub alignment: Alignment,
    /// Display name shown above the bubble.
    pub label: &'static str,
    /// Accent color name understood by the renderer.
    pub accent: &'static str,
}

const ROLE_STYLES: [RoleStyle; 6] = [
    RoleStyle {
        role: MessageRole::User,
        alignment: Alignment::Right,
        label: "You",
        accent: "blue",
    },
    RoleStyle {
        role: MessageRole::Extractor,
        alignment: Alignment::Left,
        label: "Factor Extractor",
        accent: "slate",
    },
    RoleStyle {
        role: MessageRole::Supportive,
        alignment: Alignment::Left,
        label: "Supportive Agent",
        accent: "green",
    },
    RoleStyle {
        role: MessageRole::Opposing,
        alignment: Alignment::Left,
        label: "Opposing Agent",
        accent: "red",
    },
    RoleStyle {
        role: MessageRole::Synthesizer,
        alignment: Alignment::Left,
        label: "Synthesizer",
        accent: "indigo",
    },
    RoleStyle {
        role: MessageRole::CompletionMarker,
        alignment: Alignment::Center,
        label: "Analysis Complete",
        accent: "gray",
    },
];

impl RoleStyle {
    /// Looks up the style for a role.
    pub fn of(role: MessageRole) -> &'static RoleStyle {
        let index = match role {
            MessageRole::User => 0,
            MessageRole::Extractor => 1,
            MessageRole::Supportive => 2,
            MessageRole::Opposing => 3,
            MessageRole::Synthesizer => 4,
            MessageRole::CompletionMarker => 5,
        };
        &ROLE_STYLES[index]
    }

    /// The complete table, in role declaration order.
    pub fn all() -> &'static [RoleStyle] {
        &ROLE_STYLES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_maps_to_its_own_entry() {
        for style in RoleStyle::all() {
            assert_eq!(RoleStyle::of(style.role).role, style.role);
        }
    }

    #[test]
    fn test_alignment_affinity() {
        assert_eq!(RoleStyle::of(MessageRole::User).alignment, Alignment::Right);
        assert_eq!(
            RoleStyle::of(MessageRole::CompletionMarker).alignment,
            Alignment::Center
        );
        for role in MessageRole::DEBATE_CYCLE {
            assert_eq!(RoleStyle::of(role).alignment, Alignment::Left);
        }
    }
}
