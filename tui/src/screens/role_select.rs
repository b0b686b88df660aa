use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use questline_flow::FlowEvent;
use questline_flow::Role;
use questline_flow::role::all_roles;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::WidgetRef;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::screens::KeyboardHandler;
use crate::screens::put_line;
use crate::selection_menu::ScrollState;
use crate::styles;

/// Role picker shown after signup verification. Choosing a role records it
/// in the session context and moves on to the persona picker.
pub(crate) struct RoleSelectScreen {
    app_event_tx: AppEventSender,
    roles: Vec<Role>,
    state: ScrollState,
}

impl RoleSelectScreen {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        let roles = all_roles();
        let mut state = ScrollState::new();
        state.clamp_selection(roles.len());
        Self {
            app_event_tx,
            roles,
            state,
        }
    }

    fn accept(&self) {
        if let Some(idx) = self.state.selected_idx {
            if let Some(role) = self.roles.get(idx) {
                self.app_event_tx
                    .send(AppEvent::Flow(FlowEvent::RoleChosen(*role)));
            }
        }
    }
}

impl KeyboardHandler for RoleSelectScreen {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Up => self.state.move_up_wrap(self.roles.len()),
            KeyCode::Down | KeyCode::Tab => self.state.move_down_wrap(self.roles.len()),
            KeyCode::Enter => self.accept(),
            _ => {}
        }
    }
}

impl WidgetRef for RoleSelectScreen {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;
        put_line(buf, area, x, y, &Line::styled("Select Your Role", styles::title()));
        y += 1;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled(
                "Choose the role that best describes how you'll use the platform",
                styles::dim(),
            ),
        );
        y += 2;

        for (idx, role) in self.roles.iter().enumerate() {
            let is_selected = self.state.selected_idx == Some(idx);
            let caret = if is_selected { "> " } else { "  " };
            let name_style = if is_selected {
                styles::selected()
            } else {
                styles::title()
            };
            put_line(
                buf,
                area,
                x,
                y,
                &Line::from(vec![
                    Span::raw(caret),
                    Span::raw(format!("{} ", role.icon())),
                    Span::styled(role.title().to_string(), name_style),
                ]),
            );
            y += 1;
            put_line(
                buf,
                area,
                x,
                y,
                &Line::from(vec![
                    Span::raw("    "),
                    Span::styled(role.description().to_string(), styles::dim()),
                ]),
            );
            y += 1;
            let badges: Vec<String> = role.features().iter().map(|f| format!("[{f}]")).collect();
            put_line(
                buf,
                area,
                x,
                y,
                &Line::from(vec![
                    Span::raw("    "),
                    Span::styled(badges.join(" "), styles::dim()),
                ]),
            );
            y += 2;
        }

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y {
            put_line(
                buf,
                area,
                x,
                footer_y,
                &styles::key_hint_line(&[("↑/↓", "choose"), ("Enter", "continue")]),
            );
        }
    }
}
