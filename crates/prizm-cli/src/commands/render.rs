//! Terminal rendering of transcript messages, driven by the role layout table.

use prizm_application::RenderedMessage;
use prizm_core::session::Alignment;

pub const DEFAULT_WIDTH: usize = 80;

/// Formats one message for a terminal of `width` columns.
///
/// Left-aligned roles get a gutter bar, right-aligned ones are pushed to the
/// right margin, and centered ones render as a divider line.
pub fn format_message(rendered: &RenderedMessage, width: usize) -> String {
    let time = rendered.message.created_at.format("%H:%M:%S");
    let body = rendered.message.body.lines();

    match rendered.alignment {
        Alignment::Left => {
            let mut out = format!("{} · {}\n", rendered.label, time);
            for line in body {
                out.push_str("│ ");
                out.push_str(line);
                out.push('\n');
            }
            out
        }
        Alignment::Right => {
            let mut out = format!("{:>width$}\n", format!("{} · {}", rendered.label, time));
            for line in body {
                out.push_str(&format!("{:>width$}\n", format!("{line} │")));
            }
            out
        }
        Alignment::Center => {
            let mut out = format!("{:─^width$}\n", format!(" {} ", rendered.label));
            for line in body {
                out.push_str(&format!("{:^width$}\n", line));
            }
            out
        }
    }
}
