use strum::IntoEnumIterator;
use strum_macros::Display;
use strum_macros::EnumIter;

/// Editable profile fields, in the order the editor lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ProfileField {
    Name,
    Address,
    Contact,
    UnitId,
    Email,
    Password,
}

impl ProfileField {
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Address => "Address",
            ProfileField::Contact => "Contact Number",
            ProfileField::UnitId => "Unit ID",
            ProfileField::Email => "Email",
            ProfileField::Password => "Password",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ProfileField::Name => "👤",
            ProfileField::Address => "🏠",
            ProfileField::Contact => "📞",
            ProfileField::UnitId => "🪪",
            ProfileField::Email => "✉️",
            ProfileField::Password => "🔒",
        }
    }

    /// Values that never render in the clear.
    pub fn is_secret(self) -> bool {
        self == ProfileField::Password
    }
}

pub fn all_profile_fields() -> Vec<ProfileField> {
    ProfileField::iter().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStats {
    pub points: u32,
    pub badges: u32,
    pub gems: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub icon: &'static str,
    pub name: &'static str,
    pub earned: bool,
}

/// The signed-in user's profile. Seeded with fixture data; edits live for
/// the session only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub unit_id: String,
    pub email: String,
    pub password: String,
    pub stats: ProfileStats,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "John Commander".into(),
            address: "123 Main Street, Singapore 123456".into(),
            contact: "+65 9123 4567".into(),
            unit_id: "CMD-001".into(),
            email: "john.commander@example.com".into(),
            password: "••••••••".into(),
            stats: ProfileStats {
                points: 2450,
                badges: 4,
                gems: 1250,
            },
        }
    }
}

impl Profile {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Address => &self.address,
            ProfileField::Contact => &self.contact,
            ProfileField::UnitId => &self.unit_id,
            ProfileField::Email => &self.email,
            ProfileField::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Address => self.address = value,
            ProfileField::Contact => self.contact = value,
            ProfileField::UnitId => self.unit_id = value,
            ProfileField::Email => self.email = value,
            ProfileField::Password => self.password = value,
        }
    }

    /// Fixed-width mask; the real length stays private.
    pub fn masked_password() -> &'static str {
        "••••••••"
    }

    /// Avatar fallback, first letter of each name part.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Achievement grid fixtures, earned and locked.
pub fn achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            icon: "🏆",
            name: "Challenge Master",
            earned: true,
        },
        Achievement {
            icon: "⭐",
            name: "First Place",
            earned: true,
        },
        Achievement {
            icon: "🔥",
            name: "Streak Keeper",
            earned: true,
        },
        Achievement {
            icon: "🎯",
            name: "Goal Crusher",
            earned: false,
        },
        Achievement {
            icon: "💎",
            name: "Elite Status",
            earned: false,
        },
        Achievement {
            icon: "🚀",
            name: "Team Leader",
            earned: true,
        },
    ]
}
