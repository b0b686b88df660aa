use crossterm::event::KeyEvent;
use questline_flow::Screen;
use questline_flow::SessionContext;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::WidgetRef;

use crate::app_event::MockOp;
use crate::app_event_sender::AppEventSender;

mod auth;
mod checks;
mod create_challenge;
mod dashboard;
mod edit_profile;
mod otp;
mod password_reset;
mod persona;
mod role_select;

pub(crate) use auth::AuthScreen;
pub(crate) use checks::CheckDialog;
pub(crate) use create_challenge::CreateChallengeScreen;
pub(crate) use dashboard::DashboardScreen;
pub(crate) use edit_profile::EditProfileScreen;
pub(crate) use otp::OtpScreen;
pub(crate) use password_reset::PasswordResetScreen;
pub(crate) use persona::PersonaScreen;
pub(crate) use role_select::RoleSelectScreen;

pub(crate) trait KeyboardHandler {
    fn handle_key_event(&mut self, key_event: KeyEvent);
}

/// The active screen widget. Rebuilt from the session context whenever the
/// navigation machine moves, so screen-local state never survives the move.
pub(crate) enum ScreenWidget {
    Auth(AuthScreen),
    NewUserCheck(CheckDialog),
    PasswordResetCheck(CheckDialog),
    Otp(OtpScreen),
    RoleSelection(RoleSelectScreen),
    PasswordReset(PasswordResetScreen),
    PersonaSelection(PersonaScreen),
    Dashboard(DashboardScreen),
    CreateChallenge(CreateChallengeScreen),
    EditProfile(EditProfileScreen),
}

impl ScreenWidget {
    pub(crate) fn for_screen(screen: Screen, ctx: &SessionContext, tx: AppEventSender) -> Self {
        match screen {
            Screen::Auth => Self::Auth(AuthScreen::new(tx)),
            Screen::NewUserCheck => Self::NewUserCheck(CheckDialog::new_user(tx)),
            Screen::PasswordResetCheck => {
                Self::PasswordResetCheck(CheckDialog::password_reset(tx))
            }
            Screen::OtpVerification => Self::Otp(OtpScreen::new(tx, ctx)),
            Screen::RoleSelection => Self::RoleSelection(RoleSelectScreen::new(tx)),
            Screen::PasswordReset => Self::PasswordReset(PasswordResetScreen::new(tx)),
            Screen::PersonaSelection => Self::PersonaSelection(PersonaScreen::new(tx)),
            Screen::Dashboard => Self::Dashboard(DashboardScreen::new(tx, ctx)),
            Screen::CreateChallenge => Self::CreateChallenge(CreateChallengeScreen::new(tx)),
            Screen::EditProfile => Self::EditProfile(EditProfileScreen::new(tx)),
        }
    }

    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) {
        match self {
            Self::Auth(screen) => screen.handle_key_event(key_event),
            Self::NewUserCheck(screen) => screen.handle_key_event(key_event),
            Self::PasswordResetCheck(screen) => screen.handle_key_event(key_event),
            Self::Otp(screen) => screen.handle_key_event(key_event),
            Self::RoleSelection(screen) => screen.handle_key_event(key_event),
            Self::PasswordReset(screen) => screen.handle_key_event(key_event),
            Self::PersonaSelection(screen) => screen.handle_key_event(key_event),
            Self::Dashboard(screen) => screen.handle_key_event(key_event),
            Self::CreateChallenge(screen) => screen.handle_key_event(key_event),
            Self::EditProfile(screen) => screen.handle_key_event(key_event),
        }
    }

    /// Deliver a resolved simulated op to the screen kind that consumes it.
    pub(crate) fn on_mock_op_finished(&mut self, op: &MockOp) {
        match self {
            Self::Otp(screen) => screen.on_mock_op_finished(op),
            Self::PasswordReset(screen) => screen.on_mock_op_finished(op),
            Self::CreateChallenge(screen) => screen.on_mock_op_finished(op),
            _ => {}
        }
    }

    pub(crate) fn on_carousel_tick(&mut self) {
        if let Self::Dashboard(screen) = self {
            screen.on_carousel_tick();
        }
    }
}

/// Write one line into `buf`, clipped to `area`. Screens render top to
/// bottom with a running row cursor; rows that fall outside the viewport
/// are dropped.
pub(crate) fn put_line(buf: &mut Buffer, area: Rect, x: u16, y: u16, line: &Line) {
    if y >= area.y + area.height || x >= area.x + area.width {
        return;
    }
    buf.set_line(x, y, line, area.x + area.width - x);
}

impl WidgetRef for ScreenWidget {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        match self {
            Self::Auth(screen) => screen.render_ref(area, buf),
            Self::NewUserCheck(screen) => screen.render_ref(area, buf),
            Self::PasswordResetCheck(screen) => screen.render_ref(area, buf),
            Self::Otp(screen) => screen.render_ref(area, buf),
            Self::RoleSelection(screen) => screen.render_ref(area, buf),
            Self::PasswordReset(screen) => screen.render_ref(area, buf),
            Self::PersonaSelection(screen) => screen.render_ref(area, buf),
            Self::Dashboard(screen) => screen.render_ref(area, buf),
            Self::CreateChallenge(screen) => screen.render_ref(area, buf),
            Self::EditProfile(screen) => screen.render_ref(area, buf),
        }
    }
}
