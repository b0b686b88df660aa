use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use questline_flow::FlowEvent;
use questline_flow::validate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::WidgetRef;

use crate::app_event::AppEvent;
use crate::app_event::MockOp;
use crate::app_event_sender::AppEventSender;
use crate::screens::KeyboardHandler;
use crate::screens::put_line;
use crate::styles;
use crate::text_field::TextField;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    NewPassword,
    ConfirmPassword,
}

/// New/confirm password form shown after a password-reset OTP. The reset
/// itself is simulated; success feeds `PasswordResetSucceeded` back to the
/// machine, which lands on the login form.
pub(crate) struct PasswordResetScreen {
    app_event_tx: AppEventSender,
    new_password: TextField,
    confirm_password: TextField,
    focus: Focus,
    busy: bool,
    new_error: Option<String>,
    confirm_error: Option<String>,
}

impl PasswordResetScreen {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        Self {
            app_event_tx,
            new_password: TextField::new().masked().with_placeholder("New Password"),
            confirm_password: TextField::new()
                .masked()
                .with_placeholder("Confirm New Password"),
            focus: Focus::NewPassword,
            busy: false,
            new_error: None,
            confirm_error: None,
        }
    }

    fn submit(&mut self) {
        if self.busy {
            return;
        }
        let check = validate::new_password(self.new_password.text(), self.confirm_password.text());
        if !check.is_ok() {
            self.new_error = check.new_password.map(|e| e.to_string());
            self.confirm_error = check.confirm_password.map(|e| e.to_string());
            return;
        }
        self.busy = true;
        self.new_error = None;
        self.confirm_error = None;
        self.app_event_tx
            .send(AppEvent::StartMockOp(MockOp::ResetPassword));
    }

    pub(crate) fn on_mock_op_finished(&mut self, op: &MockOp) {
        if *op != MockOp::ResetPassword {
            return;
        }
        self.busy = false;
        self.app_event_tx
            .send(AppEvent::Flow(FlowEvent::PasswordResetSucceeded));
    }
}

impl KeyboardHandler for PasswordResetScreen {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.app_event_tx.send(AppEvent::Flow(FlowEvent::Back)),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                self.focus = match self.focus {
                    Focus::NewPassword => Focus::ConfirmPassword,
                    Focus::ConfirmPassword => Focus::NewPassword,
                };
            }
            _ => {
                if self.busy {
                    return;
                }
                let (field, error) = match self.focus {
                    Focus::NewPassword => (&mut self.new_password, &mut self.new_error),
                    Focus::ConfirmPassword => {
                        (&mut self.confirm_password, &mut self.confirm_error)
                    }
                };
                if field.handle_key_event(key_event) {
                    *error = None;
                }
            }
        }
    }
}

impl WidgetRef for PasswordResetScreen {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;
        put_line(buf, area, x, y, &Line::styled("Reset Password", styles::title()));
        y += 1;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("Enter your new password below", styles::dim()),
        );
        y += 2;

        let width = (area.x + area.width).saturating_sub(x).min(40);
        put_line(buf, area, x, y, &Line::from("New Password"));
        y += 1;
        if y < area.y + area.height {
            self.new_password
                .render(Rect::new(x, y, width, 1), buf, self.focus == Focus::NewPassword);
        }
        y += 1;
        if let Some(error) = &self.new_error {
            put_line(buf, area, x, y, &Line::styled(error.clone(), styles::error()));
        }
        y += 2;

        put_line(buf, area, x, y, &Line::from("Confirm New Password"));
        y += 1;
        if y < area.y + area.height {
            self.confirm_password.render(
                Rect::new(x, y, width, 1),
                buf,
                self.focus == Focus::ConfirmPassword,
            );
        }
        y += 1;
        if let Some(error) = &self.confirm_error {
            put_line(buf, area, x, y, &Line::styled(error.clone(), styles::error()));
        }
        y += 2;

        let button = if self.busy {
            Line::styled("[ Resetting... ]", styles::dim())
        } else {
            Line::styled("[ Reset Password ]", styles::selected())
        };
        put_line(buf, area, x, y, &button);
        y += 2;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("← Back to Login (Esc)", styles::dim()),
        );

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y {
            put_line(
                buf,
                area,
                x,
                footer_y,
                &styles::key_hint_line(&[
                    ("Tab", "next field"),
                    ("Enter", "reset"),
                    ("Esc", "back"),
                ]),
            );
        }
    }
}
