use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use questline_flow::FlowEvent;
use questline_flow::OtpPurpose;
use questline_flow::SessionContext;
use questline_flow::otp;
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

/// Six-digit code entry. The code check runs after a simulated network
/// delay; a wrong code shows an inline error and the user can retry as
/// often as they like.
pub(crate) struct OtpScreen {
    app_event_tx: AppEventSender,
    email: String,
    back_label: &'static str,
    code: TextField,
    busy: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl OtpScreen {
    pub(crate) fn new(app_event_tx: AppEventSender, ctx: &SessionContext) -> Self {
        let back_label = match ctx.otp_purpose {
            Some(OtpPurpose::Signup) => "Sign Up",
            _ => "Login",
        };
        Self {
            app_event_tx,
            email: ctx.email.clone(),
            back_label,
            code: TextField::new()
                .digits(validate::OTP_LEN)
                .with_placeholder("Enter 6-digit OTP"),
            busy: false,
            error: None,
            notice: None,
        }
    }

    fn submit(&mut self) {
        if self.busy {
            return;
        }
        if let Err(e) = validate::otp_format(self.code.text()) {
            self.error = Some(e.to_string());
            return;
        }
        self.busy = true;
        self.error = None;
        self.notice = None;
        self.app_event_tx.send(AppEvent::StartMockOp(MockOp::VerifyOtp {
            code: self.code.text().to_string(),
        }));
    }

    fn resend(&mut self) {
        if self.busy {
            return;
        }
        self.code.clear();
        self.error = None;
        self.notice = Some(format!("A new OTP has been sent to {}", self.email));
    }

    pub(crate) fn on_mock_op_finished(&mut self, op: &MockOp) {
        let MockOp::VerifyOtp { code } = op else {
            return;
        };
        self.busy = false;
        match otp::verify_code(code) {
            Ok(()) => self.app_event_tx.send(AppEvent::Flow(FlowEvent::OtpVerified)),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl KeyboardHandler for OtpScreen {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.app_event_tx.send(AppEvent::Flow(FlowEvent::Back)),
            KeyCode::Enter => self.submit(),
            KeyCode::Char('r') => self.resend(),
            _ => {
                if !self.busy && self.code.handle_key_event(key_event) {
                    self.error = None;
                }
            }
        }
    }
}

impl WidgetRef for OtpScreen {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;
        put_line(buf, area, x, y, &Line::styled("Verify Your Email", styles::title()));
        y += 1;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("We've sent a 6-digit code to", styles::dim()),
        );
        y += 1;
        put_line(buf, area, x, y, &Line::from(self.email.clone()));
        y += 2;

        if y < area.y + area.height {
            let width = (area.x + area.width).saturating_sub(x).min(24);
            self.code.render(Rect::new(x, y, width, 1), buf, !self.busy);
        }
        y += 1;
        if let Some(error) = &self.error {
            put_line(buf, area, x, y, &Line::styled(error.clone(), styles::error()));
        } else if let Some(notice) = &self.notice {
            put_line(buf, area, x, y, &Line::styled(notice.clone(), styles::success()));
        }
        y += 2;

        let button = if self.busy {
            Line::styled("[ Verifying... ]", styles::dim())
        } else {
            Line::styled("[ Verify OTP ]", styles::selected())
        };
        put_line(buf, area, x, y, &button);
        y += 2;

        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("Didn't receive code? Press r to resend", styles::dim()),
        );
        y += 1;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled(format!("← Back to {} (Esc)", self.back_label), styles::dim()),
        );

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y {
            put_line(
                buf,
                area,
                x,
                footer_y,
                &styles::key_hint_line(&[("Enter", "verify"), ("r", "resend"), ("Esc", "back")]),
            );
        }
    }
}
