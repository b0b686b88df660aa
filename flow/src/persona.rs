use strum::IntoEnumIterator;
use strum_macros::Display;
use strum_macros::EnumIter;

pub const AGE_MIN: u8 = 5;
pub const AGE_MAX: u8 = 25;
pub const AGE_DEFAULT: u8 = 15;

/// Audience personas offered after role selection. Enum order is
/// presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Persona {
    Community,
    Company,
    Individual,
    Education,
}

impl Persona {
    pub fn title(self) -> &'static str {
        match self {
            Persona::Community => "Community",
            Persona::Company => "Company",
            Persona::Individual => "Individual",
            Persona::Education => "Education",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Persona::Community => "Connect and engage with your community",
            Persona::Company => "Enhance workplace engagement and productivity",
            Persona::Individual => "Personal growth and fitness journey",
            Persona::Education => "Make learning fun and interactive",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Persona::Community => "👥",
            Persona::Company => "🏢",
            Persona::Individual => "👤",
            Persona::Education => "🎓",
        }
    }

    /// Audience sub-options revealed once the persona is selected.
    /// Education has none; it asks for an age instead.
    pub fn sub_options(self) -> &'static [&'static str] {
        match self {
            Persona::Community => &["Team Leaders", "Youth", "Parents", "Volunteers"],
            Persona::Company => &["HR", "Supervisor", "Manager", "Employees"],
            Persona::Individual => &["Football Player", "Fitness Coach"],
            Persona::Education => &[],
        }
    }

    /// Third-level options, only present for Individual sub-options.
    pub fn member_options(self, sub_option: &str) -> &'static [&'static str] {
        match (self, sub_option) {
            (Persona::Individual, "Football Player") => &["Member", "Teams"],
            (Persona::Individual, "Fitness Coach") => &["Members"],
            _ => &[],
        }
    }
}

pub fn all_personas() -> Vec<Persona> {
    Persona::iter().collect()
}

/// The in-progress selection. Picking a persona resets the narrower picks,
/// so a stale sub-option can never survive a persona change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaChoice {
    pub persona: Option<Persona>,
    pub sub_option: Option<&'static str>,
    pub member_option: Option<&'static str>,
    pub age: u8,
}

impl Default for PersonaChoice {
    fn default() -> Self {
        Self {
            persona: None,
            sub_option: None,
            member_option: None,
            age: AGE_DEFAULT,
        }
    }
}

impl PersonaChoice {
    pub fn select_persona(&mut self, persona: Persona) {
        self.persona = Some(persona);
        self.sub_option = None;
        self.member_option = None;
    }

    pub fn select_sub_option(&mut self, sub_option: &'static str) {
        self.sub_option = Some(sub_option);
        self.member_option = None;
    }

    pub fn select_member_option(&mut self, member_option: &'static str) {
        self.member_option = Some(member_option);
    }

    pub fn set_age(&mut self, age: u8) {
        self.age = age.clamp(AGE_MIN, AGE_MAX);
    }

    /// Whether the Continue button is enabled. Education stands alone,
    /// Individual needs both narrower picks, everything else needs one.
    pub fn is_complete(&self) -> bool {
        match self.persona {
            None => false,
            Some(Persona::Education) => true,
            Some(Persona::Individual) => self.sub_option.is_some() && self.member_option.is_some(),
            Some(Persona::Community | Persona::Company) => self.sub_option.is_some(),
        }
    }
}
