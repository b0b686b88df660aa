use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

use crate::styles;

/// Generic scroll/selection state for a vertical option list.
///
/// Encapsulates the common behavior of a selectable list that supports:
/// - Optional selection (None when the list is empty)
/// - Wrap-around navigation on Up/Down
/// - Maintaining a scroll window (`scroll_top`) so the selected row stays visible
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ScrollState {
    pub selected_idx: Option<usize>,
    pub scroll_top: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            selected_idx: None,
            scroll_top: 0,
        }
    }

    /// Reset selection and scroll.
    pub fn reset(&mut self) {
        self.selected_idx = None;
        self.scroll_top = 0;
    }

    /// Clamp selection to be within the [0, len-1] range, or None when empty.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected_idx = match len {
            0 => None,
            _ => Some(self.selected_idx.unwrap_or(0).min(len.saturating_sub(1))),
        };
        if len == 0 {
            self.scroll_top = 0;
        }
    }

    /// Move selection up by one, wrapping to the bottom when necessary.
    pub fn move_up_wrap(&mut self, len: usize) {
        if len == 0 {
            self.selected_idx = None;
            self.scroll_top = 0;
            return;
        }
        self.selected_idx = Some(match self.selected_idx {
            Some(idx) if idx > 0 => idx - 1,
            Some(_) => len - 1,
            None => 0,
        });
    }

    /// Move selection down by one, wrapping to the top when necessary.
    pub fn move_down_wrap(&mut self, len: usize) {
        if len == 0 {
            self.selected_idx = None;
            self.scroll_top = 0;
            return;
        }
        self.selected_idx = Some(match self.selected_idx {
            Some(idx) if idx + 1 < len => idx + 1,
            _ => 0,
        });
    }

    /// Adjust `scroll_top` so that the current `selected_idx` is visible within
    /// the window of `visible_rows`.
    pub fn ensure_visible(&mut self, len: usize, visible_rows: usize) {
        if len == 0 || visible_rows == 0 {
            self.scroll_top = 0;
            return;
        }
        if let Some(sel) = self.selected_idx {
            if sel < self.scroll_top {
                self.scroll_top = sel;
            } else {
                let bottom = self.scroll_top + visible_rows - 1;
                if sel > bottom {
                    self.scroll_top = sel + 1 - visible_rows;
                }
            }
        } else {
            self.scroll_top = 0;
        }
    }
}

/// One selectable row: optional icon, a name, and an optional dim sublabel.
pub(crate) struct OptionRow {
    pub icon: Option<&'static str>,
    pub name: String,
    pub description: Option<String>,
}

/// Render rows with a `>` caret on the selected one. Each row occupies
/// `row_height` lines: the name line and, when 2, a dim description line.
pub(crate) fn render_options(
    area: Rect,
    buf: &mut Buffer,
    rows_all: &[OptionRow],
    state: &ScrollState,
    row_height: u16,
) {
    if area.height == 0 || rows_all.is_empty() {
        return;
    }
    let row_height = row_height.max(1);
    let visible_rows = ((area.height / row_height) as usize).max(1);

    // Compute starting index based on scroll state and selection.
    let mut start_idx = state.scroll_top.min(rows_all.len().saturating_sub(1));
    if let Some(sel) = state.selected_idx {
        if sel < start_idx {
            start_idx = sel;
        } else {
            let bottom = start_idx + visible_rows - 1;
            if sel > bottom {
                start_idx = sel + 1 - visible_rows;
            }
        }
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in rows_all
        .iter()
        .enumerate()
        .skip(start_idx)
        .take(visible_rows)
    {
        let is_selected = state.selected_idx == Some(i);
        let caret = if is_selected { "> " } else { "  " };
        let mut spans: Vec<Span> = vec![Span::raw(caret)];
        if let Some(icon) = row.icon {
            spans.push(Span::raw(format!("{icon} ")));
        }
        let name_style = if is_selected {
            styles::selected()
        } else {
            Style::default()
        };
        spans.push(Span::styled(row.name.clone(), name_style));
        lines.push(Line::from(spans));
        if row_height >= 2 {
            let description = row.description.clone().unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(description, styles::dim()),
            ]));
        }
    }
    Paragraph::new(lines).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wrap_navigation_and_visibility() {
        let mut s = ScrollState::new();
        let len = 10;
        let vis = 5;

        s.clamp_selection(len);
        assert_eq!(s.selected_idx, Some(0));
        s.ensure_visible(len, vis);
        assert_eq!(s.scroll_top, 0);

        s.move_up_wrap(len);
        s.ensure_visible(len, vis);
        assert_eq!(s.selected_idx, Some(len - 1));
        match s.selected_idx {
            Some(sel) => assert!(s.scroll_top <= sel),
            None => panic!("expected Some(selected_idx) after wrap"),
        }

        s.move_down_wrap(len);
        s.ensure_visible(len, vis);
        assert_eq!(s.selected_idx, Some(0));
        assert_eq!(s.scroll_top, 0);
    }

    #[test]
    fn caret_marks_selected_row() {
        let rows = vec![
            OptionRow {
                icon: None,
                name: "Yes, I'm new".to_string(),
                description: None,
            },
            OptionRow {
                icon: None,
                name: "No, existing user".to_string(),
                description: None,
            },
        ];
        let state = ScrollState {
            selected_idx: Some(1),
            scroll_top: 0,
        };
        let area = Rect::new(0, 0, 24, 2);
        let mut buf = Buffer::empty(area);
        render_options(area, &mut buf, &rows, &state, 1);

        let mut lines = Vec::new();
        for y in 0..area.height {
            let mut line = String::new();
            for x in 0..area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        assert_eq!(lines[0], "  Yes, I'm new");
        assert_eq!(lines[1], "> No, existing user");
    }
}
