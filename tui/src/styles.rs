use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

pub(crate) const LIGHT_BLUE: Color = Color::Rgb(45, 134, 255);
pub(crate) const SUCCESS_GREEN: Color = Color::Rgb(0, 178, 110);
pub(crate) const ERROR_RED: Color = Color::Rgb(215, 66, 66);

pub(crate) fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn error() -> Style {
    Style::default().fg(ERROR_RED)
}

pub(crate) fn success() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

pub(crate) fn selected() -> Style {
    Style::default().fg(LIGHT_BLUE).add_modifier(Modifier::BOLD)
}

pub(crate) fn title() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// One footer line of key hints, e.g. `Tab focus  Enter submit  Esc back`.
pub(crate) fn key_hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(LIGHT_BLUE),
        ));
        spans.push(Span::styled(format!(" {action}"), dim()));
    }
    Line::from(spans)
}
