use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use questline_flow::FlowEvent;
use questline_flow::validate;
use questline_flow::validate::FieldError;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::WidgetRef;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::screens::KeyboardHandler;
use crate::screens::put_line;
use crate::styles;
use crate::text_field::TextField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    Signup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Email,
    Password,
    ConfirmPassword,
    Terms,
}

/// The login / signup form. Submitting emits `LoginSubmitted` or
/// `SignupSubmitted` with the entered email; everything else typed here is
/// discarded when the screen goes away.
pub(crate) struct AuthScreen {
    app_event_tx: AppEventSender,
    mode: AuthMode,
    email: TextField,
    password: TextField,
    confirm_password: TextField,
    terms_accepted: bool,
    focus: Focus,
    error: Option<String>,
}

impl AuthScreen {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        Self {
            app_event_tx,
            mode: AuthMode::Login,
            email: TextField::new().with_placeholder("Enter your email"),
            password: TextField::new()
                .masked()
                .with_placeholder("Enter your password"),
            confirm_password: TextField::new()
                .masked()
                .with_placeholder("Confirm your password"),
            terms_accepted: false,
            focus: Focus::Email,
            error: None,
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.email.clear();
        self.password.clear();
        self.confirm_password.clear();
        self.terms_accepted = false;
        self.focus = Focus::Email;
        self.error = None;
    }

    fn focus_ring(&self) -> &'static [Focus] {
        match self.mode {
            AuthMode::Login => &[Focus::Email, Focus::Password],
            AuthMode::Signup => &[
                Focus::Email,
                Focus::Password,
                Focus::ConfirmPassword,
                Focus::Terms,
            ],
        }
    }

    fn focus_next(&mut self) {
        let ring = self.focus_ring();
        let idx = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(idx + 1) % ring.len()];
    }

    fn focus_prev(&mut self) {
        let ring = self.focus_ring();
        let idx = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(idx + ring.len() - 1) % ring.len()];
    }

    fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::Email => Some(&mut self.email),
            Focus::Password => Some(&mut self.password),
            Focus::ConfirmPassword => Some(&mut self.confirm_password),
            Focus::Terms => None,
        }
    }

    fn can_submit(&self) -> bool {
        let base = !self.email.is_empty() && !self.password.is_empty();
        match self.mode {
            AuthMode::Login => base,
            AuthMode::Signup => base && !self.confirm_password.is_empty() && self.terms_accepted,
        }
    }

    /// First reason the form cannot be submitted, with the text shown
    /// inline next to the submit button.
    fn first_blocker(&self) -> Option<String> {
        if self.email.is_empty() {
            return Some(FieldError::EmailRequired.to_string());
        }
        if let Err(e) = validate::login_password(self.password.text()) {
            return Some(e.to_string());
        }
        if self.mode == AuthMode::Signup {
            if self.confirm_password.is_empty() {
                return Some(FieldError::ConfirmPasswordRequired.to_string());
            }
            if self.confirm_password.text() != self.password.text() {
                return Some(FieldError::PasswordMismatch.to_string());
            }
            if !self.terms_accepted {
                return Some("Please agree to the Terms of Service and Privacy Policy".to_string());
            }
        }
        None
    }

    fn submit(&mut self) {
        if let Some(message) = self.first_blocker() {
            self.error = Some(message);
            return;
        }
        let email = self.email.text().trim().to_string();
        if let Err(e) = validate::email(&email) {
            self.error = Some(e.to_string());
            return;
        }
        let event = match self.mode {
            AuthMode::Login => FlowEvent::LoginSubmitted { email },
            AuthMode::Signup => FlowEvent::SignupSubmitted { email },
        };
        self.app_event_tx.send(AppEvent::Flow(event));
    }

    fn render_field(
        &self,
        buf: &mut Buffer,
        area: Rect,
        x: u16,
        y: u16,
        label: &str,
        field: &TextField,
        focused: bool,
    ) -> u16 {
        put_line(buf, area, x, y, &Line::from(label.to_string()));
        let field_y = y + 1;
        if field_y < area.y + area.height {
            let width = (area.x + area.width).saturating_sub(x).min(40);
            field.render(Rect::new(x, field_y, width, 1), buf, focused);
        }
        y + 3
    }
}

impl KeyboardHandler for AuthScreen {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('s') = key_event.code {
                self.toggle_mode();
            }
            return;
        }
        match key_event.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(' ') if self.focus == Focus::Terms => {
                self.terms_accepted = !self.terms_accepted;
                self.error = None;
            }
            _ => {
                if let Some(field) = self.focused_field_mut() {
                    if field.handle_key_event(key_event) {
                        self.error = None;
                    }
                }
            }
        }
    }
}

impl WidgetRef for AuthScreen {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;
        let (title, subtitle, submit_label, toggle_hint) = match self.mode {
            AuthMode::Login => (
                "Welcome Back!",
                "Sign in to continue your challenge journey",
                "Sign In",
                "Don't have an account? Sign up with Ctrl+S",
            ),
            AuthMode::Signup => (
                "Join the Adventure!",
                "Create your account to start networking and challenges",
                "Create Account",
                "Already have an account? Sign in with Ctrl+S",
            ),
        };
        put_line(buf, area, x, y, &Line::from("🚀"));
        y += 1;
        put_line(buf, area, x, y, &Line::styled(title, styles::title()));
        y += 1;
        put_line(buf, area, x, y, &Line::styled(subtitle, styles::dim()));
        y += 2;

        y = self.render_field(
            buf,
            area,
            x,
            y,
            "Email",
            &self.email,
            self.focus == Focus::Email,
        );
        y = self.render_field(
            buf,
            area,
            x,
            y,
            "Password",
            &self.password,
            self.focus == Focus::Password,
        );
        if self.mode == AuthMode::Signup {
            y = self.render_field(
                buf,
                area,
                x,
                y,
                "Confirm Password",
                &self.confirm_password,
                self.focus == Focus::ConfirmPassword,
            );
            let marker = if self.terms_accepted { "[x]" } else { "[ ]" };
            let marker_style = if self.focus == Focus::Terms {
                styles::selected()
            } else {
                Style::default()
            };
            put_line(
                buf,
                area,
                x,
                y,
                &Line::from(vec![
                    Span::styled(format!("{marker} "), marker_style),
                    Span::raw("I agree to the Terms of Service and Privacy Policy"),
                ]),
            );
            y += 2;
        }

        if let Some(error) = &self.error {
            put_line(buf, area, x, y, &Line::styled(error.clone(), styles::error()));
        }
        y += 2;

        let submit_style = if self.can_submit() {
            styles::selected()
        } else {
            styles::dim()
        };
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled(format!("[ {submit_label} ]"), submit_style),
        );
        y += 2;
        put_line(buf, area, x, y, &Line::styled(toggle_hint, styles::dim()));

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y {
            put_line(
                buf,
                area,
                x,
                footer_y,
                &styles::key_hint_line(&[
                    ("Tab", "next field"),
                    ("Enter", "submit"),
                    ("Ctrl+S", "switch"),
                    ("Ctrl+C", "quit"),
                ]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    fn make_screen() -> (AuthScreen, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();
        (AuthScreen::new(AppEventSender::new(tx)), rx)
    }

    fn press(screen: &mut AuthScreen, code: KeyCode) {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(screen: &mut AuthScreen, s: &str) {
        for c in s.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn render_lines(screen: &AuthScreen) -> Vec<String> {
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        screen.render_ref(area, &mut buf);
        let mut lines = Vec::new();
        for y in 0..area.height {
            let mut line = String::new();
            for x in 0..area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines
    }

    #[test]
    fn login_submit_emits_login_event() {
        let (mut screen, mut rx) = make_screen();
        type_str(&mut screen, "a@b.com");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "hunter2");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::Flow(FlowEvent::LoginSubmitted {
                email: "a@b.com".to_string()
            }))
        );
    }

    #[test]
    fn submit_with_empty_form_shows_error_and_emits_nothing() {
        let (mut screen, mut rx) = make_screen();
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.error.as_deref(), Some("Email is required"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn invalid_email_is_rejected_inline() {
        let (mut screen, mut rx) = make_screen();
        type_str(&mut screen, "not-an-email");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "hunter2");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            screen.error.as_deref(),
            Some("Please enter a valid email address")
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn signup_requires_terms_before_submitting() {
        let (mut screen, mut rx) = make_screen();
        screen.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        type_str(&mut screen, "new@user.com");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "secret1");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "secret1");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            screen.error.as_deref(),
            Some("Please agree to the Terms of Service and Privacy Policy")
        );
        assert!(rx.try_recv().is_err());

        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char(' '));
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::Flow(FlowEvent::SignupSubmitted {
                email: "new@user.com".to_string()
            }))
        );
    }

    #[test]
    fn signup_flags_mismatched_passwords() {
        let (mut screen, mut rx) = make_screen();
        screen.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        type_str(&mut screen, "new@user.com");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "secret1");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "secret2");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.error.as_deref(), Some("Passwords do not match"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn mode_toggle_clears_fields_and_switches_copy() {
        let (mut screen, _rx) = make_screen();
        type_str(&mut screen, "a@b.com");
        screen.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(screen.email.is_empty());
        let lines = render_lines(&screen);
        assert!(lines.iter().any(|l| l.contains("Join the Adventure!")));
        assert!(lines.iter().any(|l| l.contains("Confirm Password")));

        screen.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        let lines = render_lines(&screen);
        assert!(lines.iter().any(|l| l.contains("Welcome Back!")));
    }

    #[test]
    fn password_renders_masked() {
        let (mut screen, _rx) = make_screen();
        type_str(&mut screen, "a@b.com");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "hunter2");
        let lines = render_lines(&screen);
        assert!(lines.iter().any(|l| l.contains("•••••••")));
        assert!(!lines.iter().any(|l| l.contains("hunter2")));
    }
}
