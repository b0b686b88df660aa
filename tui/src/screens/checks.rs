use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use questline_flow::FlowEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::WidgetRef;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::screens::KeyboardHandler;
use crate::screens::put_line;
use crate::selection_menu::OptionRow;
use crate::selection_menu::ScrollState;
use crate::selection_menu::render_options;
use crate::styles;

/// A two-option yes/no dialog. Both the new-user check and the
/// password-reset check are instances of this widget; they differ only in
/// the question and the events their answers emit.
pub(crate) struct CheckDialog {
    app_event_tx: AppEventSender,
    question: &'static str,
    options: [(&'static str, FlowEvent); 2],
    state: ScrollState,
}

impl CheckDialog {
    pub(crate) fn new_user(app_event_tx: AppEventSender) -> Self {
        Self::new(
            app_event_tx,
            "Are you a new user?",
            [
                ("Yes, I'm new", FlowEvent::NewUser),
                ("No, existing user", FlowEvent::ExistingUser),
            ],
        )
    }

    pub(crate) fn password_reset(app_event_tx: AppEventSender) -> Self {
        Self::new(
            app_event_tx,
            "Did you reset your password?",
            [
                ("Yes, I reset it", FlowEvent::DidResetPassword),
                ("No, I need to reset", FlowEvent::NeedPasswordReset),
            ],
        )
    }

    fn new(
        app_event_tx: AppEventSender,
        question: &'static str,
        options: [(&'static str, FlowEvent); 2],
    ) -> Self {
        let mut state = ScrollState::new();
        state.clamp_selection(options.len());
        Self {
            app_event_tx,
            question,
            options,
            state,
        }
    }

    fn accept(&self) {
        if let Some(idx) = self.state.selected_idx {
            let (_, event) = &self.options[idx.min(self.options.len() - 1)];
            self.app_event_tx.send(AppEvent::Flow(event.clone()));
        }
    }
}

impl KeyboardHandler for CheckDialog {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Up => self.state.move_up_wrap(self.options.len()),
            KeyCode::Down | KeyCode::Tab => self.state.move_down_wrap(self.options.len()),
            KeyCode::Enter => self.accept(),
            KeyCode::Char('y') => {
                self.app_event_tx
                    .send(AppEvent::Flow(self.options[0].1.clone()));
            }
            KeyCode::Char('n') => {
                self.app_event_tx
                    .send(AppEvent::Flow(self.options[1].1.clone()));
            }
            _ => {}
        }
    }
}

impl WidgetRef for CheckDialog {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;
        put_line(buf, area, x, y, &Line::styled(self.question, styles::title()));
        y += 2;

        let rows: Vec<OptionRow> = self
            .options
            .iter()
            .map(|(label, _)| OptionRow {
                icon: None,
                name: (*label).to_string(),
                description: None,
            })
            .collect();
        let list_area = Rect::new(
            x,
            y.min(area.y + area.height),
            (area.x + area.width).saturating_sub(x),
            (area.y + area.height).saturating_sub(y).min(2),
        );
        render_options(list_area, buf, &rows, &self.state, 1);

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y + 2 {
            put_line(
                buf,
                area,
                x,
                footer_y,
                &styles::key_hint_line(&[
                    ("↑/↓", "choose"),
                    ("Enter", "confirm"),
                    ("y/n", "answer directly"),
                ]),
            );
        }
    }
}
