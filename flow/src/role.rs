use strum::IntoEnumIterator;
use strum_macros::Display;
use strum_macros::EnumIter;

/// Account roles offered after a verified signup. Enum order is presentation
/// order on the role selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Commander,
    Participant,
    Admin,
    Supporter,
}

impl Role {
    pub fn title(self) -> &'static str {
        match self {
            Role::Commander => "Commander",
            Role::Participant => "Participant",
            Role::Admin => "Admin",
            Role::Supporter => "Supporter",
        }
    }

    /// One-line pitch shown under the title.
    pub fn description(self) -> &'static str {
        match self {
            Role::Commander => "Lead and create challenges for your team",
            Role::Participant => "Join and complete challenges",
            Role::Admin => "Full system administration access",
            Role::Supporter => "Support and mentor participants",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Role::Commander => "⚡",
            Role::Participant => "🎯",
            Role::Admin => "🔧",
            Role::Supporter => "🤝",
        }
    }

    /// Capability badges rendered beneath the description.
    pub fn features(self) -> &'static [&'static str] {
        match self {
            Role::Commander => &["Create Challenges", "Team Management", "Analytics Dashboard"],
            Role::Participant => &["Join Challenges", "Track Progress", "Earn Rewards"],
            Role::Admin => &["User Management", "System Settings", "Reports"],
            Role::Supporter => &["Mentoring", "Support Chat", "Progress Tracking"],
        }
    }
}

/// All roles in presentation order.
pub fn all_roles() -> Vec<Role> {
    Role::iter().collect()
}
