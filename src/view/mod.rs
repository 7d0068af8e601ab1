//! ANSI rendering helpers for demos and tests.
//!
//! This is deliberately small: the engine's real renderer is host-owned.
//! These helpers draw the grid as rows of fixed-width cells with the
//! focused cell in inverse video, plus a detail panel, so the demos and
//! scenario tests have something visible to work against.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::engine::NavSnapshot;
use crate::items::GridEntry;
use crate::topology;

const CSI: &str = "\x1b[";
const INVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Render the entry grid as one string, row-major, with the focused cell
/// highlighted. `cell_width` is the display-column width allotted per cell.
pub fn render_grid<T: GridEntry>(
    entries: &[T],
    focused: Option<usize>,
    column_count: usize,
    cell_width: usize,
) -> String {
    let mut out = String::new();
    let rows = topology::row_count(entries.len(), column_count);

    for row in 0..rows {
        for column in 0..column_count {
            let index = topology::index_at(row, column, column_count);
            let Some(entry) = entries.get(index) else {
                break;
            };
            let label = pad_cell(&entry.entry_id(), cell_width);
            if focused == Some(index) {
                out.push_str(INVERSE);
                out.push_str(&label);
                out.push_str(RESET);
            } else {
                out.push_str(&label);
            }
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Render the detail panel for the current snapshot, or the grid hint line
/// when no detail is open.
pub fn render_detail(snapshot: &NavSnapshot) -> String {
    match (&snapshot.selected_id, snapshot.detail_open) {
        (Some(id), true) => format!("{CSI}1m{id}{RESET}\n(press Esc to go back)\n"),
        _ => String::from("(no detail open)\n"),
    }
}

/// Strip ANSI escapes, leaving only the text a user would read. Useful for
/// assertions and for dumping the screen to a plain-text log.
pub fn visible_text(rendered: &str) -> String {
    strip_ansi_escapes::strip_str(rendered)
}

/// Truncate to `width` display columns (ellipsis on overflow) and pad with
/// spaces so every cell occupies exactly `width` columns.
fn pad_cell(text: &str, width: usize) -> String {
    let mut cell = if text.width() > width {
        let mut taken = String::new();
        let mut used = 0usize;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w >= width {
                taken.push('…');
                break;
            }
            used += w;
            taken.push(ch);
        }
        taken
    } else {
        text.to_string()
    };

    let mut remaining = width.saturating_sub(cell.width());
    while remaining > 0 {
        cell.push(' ');
        remaining -= 1;
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn grid_lays_out_row_major() {
        let rendered = render_grid(&ids(&["A", "B", "C", "D", "E"]), None, 3, 3);
        let plain = visible_text(&rendered);
        let lines: Vec<&str> = plain.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim_end(), "A   B   C");
        assert_eq!(lines[1].trim_end(), "D   E");
    }

    #[test]
    fn focused_cell_is_highlighted() {
        let rendered = render_grid(&ids(&["A", "B"]), Some(1), 2, 1);
        assert!(rendered.contains("\x1b[7mB"));
        assert!(!rendered.contains("\x1b[7mA"));
    }

    #[test]
    fn stripping_removes_highlight_codes() {
        let rendered = render_grid(&ids(&["A", "B"]), Some(0), 2, 1);
        let plain = visible_text(&rendered);
        assert_eq!(plain.trim_end(), "A B");
    }

    #[test]
    fn long_labels_are_truncated_with_ellipsis() {
        let cell = pad_cell("megalodon", 4);
        assert_eq!(cell.width(), 4);
        assert!(cell.contains('…'));
    }

    #[test]
    fn short_labels_are_padded_to_width() {
        assert_eq!(pad_cell("ab", 5), "ab   ");
    }

    #[test]
    fn detail_panel_shows_selected_id() {
        let snapshot = NavSnapshot {
            focused: None,
            detail_open: true,
            selected_id: Some("B".to_string()),
            item_count: 4,
        };
        let plain = visible_text(&render_detail(&snapshot));
        assert!(plain.contains('B'));
        assert!(plain.contains("Esc"));
    }
}
