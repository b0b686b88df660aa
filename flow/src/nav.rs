use strum_macros::Display;

use crate::role::Role;

/// One full-viewport screen. Exactly one is active at a time and it is the
/// only component receiving input; moving between screens goes through
/// [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Screen {
    /// Login / signup form. The initial screen, and where every logout and
    /// completed password reset lands.
    Auth,
    /// "Are you a new user?" dialog. No transition currently targets it,
    /// but its handlers are kept so re-adding an inbound edge is a
    /// one-line change.
    NewUserCheck,
    /// "Did you reset your password?" dialog, shown after a verified login.
    PasswordResetCheck,
    /// Six-digit code entry for the pending [`OtpPurpose`].
    OtpVerification,
    RoleSelection,
    PasswordReset,
    PersonaSelection,
    Dashboard,
    CreateChallenge,
    EditProfile,
}

/// Why an OTP was requested. A successful verification branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum OtpPurpose {
    Signup,
    PasswordReset,
    Login,
}

/// The handful of values that outlive a screen change. Everything else a
/// screen tracks while active (field contents, cursor, wizard step) stays
/// local to that screen and dies with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Email captured by the auth form; the OTP screen shows it read-only.
    pub email: String,
    /// Set whenever a transition targets [`Screen::OtpVerification`].
    pub otp_purpose: Option<OtpPurpose>,
    /// Set when a role is chosen during signup.
    pub role: Option<Role>,
}

impl SessionContext {
    /// Logout semantics: drop everything tied to the signed-in user.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// What a screen reports outward when the user completes or abandons it.
/// Screens never switch screens themselves; they emit one of these and the
/// machine decides where to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// Auth form submitted in login mode.
    LoginSubmitted { email: String },
    /// Auth form submitted in signup mode.
    SignupSubmitted { email: String },
    /// New-user dialog answered "yes, I'm new".
    NewUser,
    /// New-user dialog answered "no, existing user".
    ExistingUser,
    /// Password-reset dialog answered "yes, I reset it".
    DidResetPassword,
    /// Password-reset dialog answered "no, I need to reset".
    NeedPasswordReset,
    /// The entered code matched.
    OtpVerified,
    RoleChosen(Role),
    PasswordResetSucceeded,
    PersonaCompleted,
    CreateChallengeRequested,
    EditProfileRequested,
    /// Screen-local back affordance (Esc, "Back to Login").
    Back,
    Logout,
}

/// Applies one event to the machine and returns the next screen plus the
/// updated context. Pairs without a rule below are no-ops: the screen and
/// context come back unchanged, so a stray event can never crash or strand
/// the client.
pub fn transition(
    screen: Screen,
    mut ctx: SessionContext,
    event: &FlowEvent,
) -> (Screen, SessionContext) {
    let next = match (screen, event) {
        (Screen::Auth, FlowEvent::LoginSubmitted { email }) => {
            ctx.email = email.clone();
            ctx.otp_purpose = Some(OtpPurpose::Login);
            Screen::OtpVerification
        }
        (Screen::Auth, FlowEvent::SignupSubmitted { email }) => {
            ctx.email = email.clone();
            ctx.otp_purpose = Some(OtpPurpose::Signup);
            Screen::OtpVerification
        }
        (Screen::NewUserCheck, FlowEvent::NewUser) => Screen::PasswordResetCheck,
        (Screen::NewUserCheck, FlowEvent::ExistingUser) => Screen::Dashboard,
        (Screen::PasswordResetCheck, FlowEvent::DidResetPassword) => Screen::Dashboard,
        (Screen::PasswordResetCheck, FlowEvent::NeedPasswordReset) => {
            ctx.otp_purpose = Some(OtpPurpose::PasswordReset);
            Screen::OtpVerification
        }
        (Screen::OtpVerification, FlowEvent::OtpVerified) => match ctx.otp_purpose {
            Some(OtpPurpose::Signup) => Screen::RoleSelection,
            Some(OtpPurpose::PasswordReset) => Screen::PasswordReset,
            Some(OtpPurpose::Login) => Screen::PasswordResetCheck,
            // Only reachable by hand-building a machine without a purpose.
            None => Screen::OtpVerification,
        },
        (Screen::OtpVerification, FlowEvent::Back) => Screen::Auth,
        (Screen::RoleSelection, FlowEvent::RoleChosen(role)) => {
            ctx.role = Some(*role);
            Screen::PersonaSelection
        }
        (Screen::PasswordReset, FlowEvent::PasswordResetSucceeded | FlowEvent::Back) => {
            Screen::Auth
        }
        (Screen::PersonaSelection, FlowEvent::PersonaCompleted) => Screen::Dashboard,
        (Screen::Dashboard, FlowEvent::CreateChallengeRequested) => Screen::CreateChallenge,
        (Screen::Dashboard, FlowEvent::EditProfileRequested) => Screen::EditProfile,
        (Screen::Dashboard | Screen::EditProfile, FlowEvent::Logout) => {
            ctx.clear();
            Screen::Auth
        }
        (Screen::CreateChallenge | Screen::EditProfile, FlowEvent::Back) => Screen::Dashboard,
        _ => screen,
    };
    (next, ctx)
}

/// The machine itself: active screen plus cross-screen context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    screen: Screen,
    context: SessionContext,
}

impl Flow {
    pub fn new() -> Self {
        Self {
            screen: Screen::Auth,
            context: SessionContext::default(),
        }
    }

    /// Start somewhere other than Auth. Drivers and tests use this to reach
    /// screens with no inbound edge, NewUserCheck in particular.
    pub fn at(screen: Screen, context: SessionContext) -> Self {
        Self { screen, context }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Applies `event` and reports whether the active screen changed, which
    /// is the caller's cue to rebuild its screen widget.
    pub fn apply(&mut self, event: &FlowEvent) -> bool {
        let (next, ctx) = transition(self.screen, self.context.clone(), event);
        let changed = next != self.screen;
        self.screen = next;
        self.context = ctx;
        changed
    }
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ctx() -> SessionContext {
        SessionContext::default()
    }

    #[test]
    fn login_submit_enters_otp_with_login_purpose() {
        let (screen, ctx) = transition(
            Screen::Auth,
            ctx(),
            &FlowEvent::LoginSubmitted {
                email: "a@b.com".into(),
            },
        );
        assert_eq!(screen, Screen::OtpVerification);
        assert_eq!(ctx.email, "a@b.com");
        assert_eq!(ctx.otp_purpose, Some(OtpPurpose::Login));
    }

    #[test]
    fn signup_submit_enters_otp_with_signup_purpose() {
        let (screen, ctx) = transition(
            Screen::Auth,
            ctx(),
            &FlowEvent::SignupSubmitted {
                email: "new@user.io".into(),
            },
        );
        assert_eq!(screen, Screen::OtpVerification);
        assert_eq!(ctx.email, "new@user.io");
        assert_eq!(ctx.otp_purpose, Some(OtpPurpose::Signup));
    }

    #[test]
    fn otp_verified_branches_on_purpose() {
        let signup = SessionContext {
            otp_purpose: Some(OtpPurpose::Signup),
            ..ctx()
        };
        let (screen, _) = transition(Screen::OtpVerification, signup, &FlowEvent::OtpVerified);
        assert_eq!(screen, Screen::RoleSelection);

        let reset = SessionContext {
            otp_purpose: Some(OtpPurpose::PasswordReset),
            ..ctx()
        };
        let (screen, _) = transition(Screen::OtpVerification, reset, &FlowEvent::OtpVerified);
        assert_eq!(screen, Screen::PasswordReset);

        let login = SessionContext {
            otp_purpose: Some(OtpPurpose::Login),
            ..ctx()
        };
        let (screen, _) = transition(Screen::OtpVerification, login, &FlowEvent::OtpVerified);
        assert_eq!(screen, Screen::PasswordResetCheck);
    }

    #[test]
    fn otp_verified_without_purpose_stays_put() {
        let (screen, _) = transition(Screen::OtpVerification, ctx(), &FlowEvent::OtpVerified);
        assert_eq!(screen, Screen::OtpVerification);
    }

    #[test]
    fn otp_back_returns_to_auth() {
        let (screen, _) = transition(Screen::OtpVerification, ctx(), &FlowEvent::Back);
        assert_eq!(screen, Screen::Auth);
    }

    #[test]
    fn new_user_check_branches() {
        let (screen, _) = transition(Screen::NewUserCheck, ctx(), &FlowEvent::NewUser);
        assert_eq!(screen, Screen::PasswordResetCheck);
        let (screen, _) = transition(Screen::NewUserCheck, ctx(), &FlowEvent::ExistingUser);
        assert_eq!(screen, Screen::Dashboard);
    }

    #[test]
    fn password_reset_check_branches() {
        let (screen, _) = transition(Screen::PasswordResetCheck, ctx(), &FlowEvent::DidResetPassword);
        assert_eq!(screen, Screen::Dashboard);

        let (screen, ctx) =
            transition(Screen::PasswordResetCheck, ctx(), &FlowEvent::NeedPasswordReset);
        assert_eq!(screen, Screen::OtpVerification);
        assert_eq!(ctx.otp_purpose, Some(OtpPurpose::PasswordReset));
    }

    #[test]
    fn every_role_routes_to_persona_selection() {
        for role in [Role::Commander, Role::Participant, Role::Admin, Role::Supporter] {
            let (screen, ctx) = transition(Screen::RoleSelection, ctx(), &FlowEvent::RoleChosen(role));
            assert_eq!(screen, Screen::PersonaSelection);
            assert_eq!(ctx.role, Some(role));
        }
    }

    #[test]
    fn password_reset_exits_to_auth_both_ways() {
        let (screen, _) = transition(Screen::PasswordReset, ctx(), &FlowEvent::PasswordResetSucceeded);
        assert_eq!(screen, Screen::Auth);
        let (screen, _) = transition(Screen::PasswordReset, ctx(), &FlowEvent::Back);
        assert_eq!(screen, Screen::Auth);
    }

    #[test]
    fn dashboard_routes() {
        let (screen, _) = transition(Screen::Dashboard, ctx(), &FlowEvent::CreateChallengeRequested);
        assert_eq!(screen, Screen::CreateChallenge);
        let (screen, _) = transition(Screen::Dashboard, ctx(), &FlowEvent::EditProfileRequested);
        assert_eq!(screen, Screen::EditProfile);
        let (screen, _) = transition(Screen::CreateChallenge, ctx(), &FlowEvent::Back);
        assert_eq!(screen, Screen::Dashboard);
        let (screen, _) = transition(Screen::EditProfile, ctx(), &FlowEvent::Back);
        assert_eq!(screen, Screen::Dashboard);
    }

    #[test]
    fn logout_clears_context_from_dashboard_and_profile() {
        let signed_in = SessionContext {
            email: "a@b.com".into(),
            otp_purpose: Some(OtpPurpose::Login),
            role: Some(Role::Admin),
        };
        for screen in [Screen::Dashboard, Screen::EditProfile] {
            let (next, ctx) = transition(screen, signed_in.clone(), &FlowEvent::Logout);
            assert_eq!(next, Screen::Auth);
            assert_eq!(ctx, SessionContext::default());
        }
    }

    #[test]
    fn back_at_auth_is_idempotent() {
        let mut flow = Flow::new();
        for _ in 0..3 {
            assert!(!flow.apply(&FlowEvent::Back));
            assert_eq!(flow.screen(), Screen::Auth);
            assert_eq!(*flow.context(), SessionContext::default());
        }
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let (screen, ctx2) = transition(Screen::Dashboard, ctx(), &FlowEvent::OtpVerified);
        assert_eq!(screen, Screen::Dashboard);
        assert_eq!(ctx2, ctx());

        let (screen, _) = transition(
            Screen::RoleSelection,
            ctx(),
            &FlowEvent::LoginSubmitted {
                email: "x@y.z".into(),
            },
        );
        assert_eq!(screen, Screen::RoleSelection);
    }

    #[test]
    fn signup_happy_path_reaches_dashboard() {
        let mut flow = Flow::new();
        assert!(flow.apply(&FlowEvent::SignupSubmitted {
            email: "a@b.com".into(),
        }));
        assert_eq!(flow.screen(), Screen::OtpVerification);
        assert!(!flow.context().email.is_empty());
        assert!(flow.context().otp_purpose.is_some());

        assert!(flow.apply(&FlowEvent::OtpVerified));
        assert_eq!(flow.screen(), Screen::RoleSelection);

        assert!(flow.apply(&FlowEvent::RoleChosen(Role::Admin)));
        assert_eq!(flow.screen(), Screen::PersonaSelection);
        assert_eq!(flow.context().role, Some(Role::Admin));

        assert!(flow.apply(&FlowEvent::PersonaCompleted));
        assert_eq!(flow.screen(), Screen::Dashboard);
        assert_eq!(flow.context().email, "a@b.com");
    }

    #[test]
    fn login_needs_reset_loops_back_to_auth() {
        let mut flow = Flow::new();
        flow.apply(&FlowEvent::LoginSubmitted {
            email: "old@user.io".into(),
        });
        flow.apply(&FlowEvent::OtpVerified);
        assert_eq!(flow.screen(), Screen::PasswordResetCheck);

        flow.apply(&FlowEvent::NeedPasswordReset);
        assert_eq!(flow.screen(), Screen::OtpVerification);
        assert_eq!(flow.context().otp_purpose, Some(OtpPurpose::PasswordReset));
        assert_eq!(flow.context().email, "old@user.io");

        flow.apply(&FlowEvent::OtpVerified);
        assert_eq!(flow.screen(), Screen::PasswordReset);
        flow.apply(&FlowEvent::PasswordResetSucceeded);
        assert_eq!(flow.screen(), Screen::Auth);
    }
}
