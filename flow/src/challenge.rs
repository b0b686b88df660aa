use strum::IntoEnumIterator;
use strum_macros::Display;
use strum_macros::EnumIter;
use thiserror::Error;

pub const TEAM_SIZE_MIN: u8 = 2;
pub const TEAM_SIZE_MAX: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Football,
    Basketball,
    Running,
    Cycling,
    Swimming,
    Fitness,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Football => "Football",
            Category::Basketball => "Basketball",
            Category::Running => "Running",
            Category::Cycling => "Cycling",
            Category::Swimming => "Swimming",
            Category::Fitness => "Fitness",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Football => "⚽",
            Category::Basketball => "🏀",
            Category::Running => "🏃",
            Category::Cycling => "🚴",
            Category::Swimming => "🏊",
            Category::Fitness => "💪",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Single,
    Team,
}

impl Mode {
    pub fn title(self) -> &'static str {
        match self {
            Mode::Single => "Single Player",
            Mode::Team => "Team",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::Single => "Individual challenge",
            Mode::Team => "Team-based challenge",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Mode::Single => "👤",
            Mode::Team => "👥",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn title(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Difficulty::Easy => "🟢",
            Difficulty::Medium => "🟡",
            Difficulty::Hard => "🔴",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn title(self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Visibility::Public => "Anyone can join",
            Visibility::Private => "Invite only",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Visibility::Public => "🌍",
            Visibility::Private => "🔒",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RewardKind {
    Badges,
    Points,
    Custom,
}

impl RewardKind {
    pub fn title(self) -> &'static str {
        match self {
            RewardKind::Badges => "Badges",
            RewardKind::Points => "Points",
            RewardKind::Custom => "Custom Rewards",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RewardKind::Badges => "Digital achievement badges",
            RewardKind::Points => "Experience points system",
            RewardKind::Custom => "Physical or digital prizes",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RewardKind::Badges => "🏆",
            RewardKind::Points => "⭐",
            RewardKind::Custom => "🎁",
        }
    }
}

pub fn all_categories() -> Vec<Category> {
    Category::iter().collect()
}

pub fn all_modes() -> Vec<Mode> {
    Mode::iter().collect()
}

pub fn all_difficulties() -> Vec<Difficulty> {
    Difficulty::iter().collect()
}

pub fn all_visibilities() -> Vec<Visibility> {
    Visibility::iter().collect()
}

pub fn all_reward_kinds() -> Vec<RewardKind> {
    RewardKind::iter().collect()
}

/// Wizard pages in order. `Published` is the success page; it is reached
/// through a publish, never through `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Details,
    Settings,
    Rewards,
    Published,
}

impl WizardStep {
    /// 1-based position shown in the progress header.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::Settings => 2,
            WizardStep::Rewards => 3,
            WizardStep::Published => 4,
        }
    }

    pub fn next(self) -> WizardStep {
        match self {
            WizardStep::Details => WizardStep::Settings,
            WizardStep::Settings | WizardStep::Rewards => WizardStep::Rewards,
            WizardStep::Published => WizardStep::Published,
        }
    }

    pub fn prev(self) -> WizardStep {
        match self {
            WizardStep::Details | WizardStep::Settings => WizardStep::Details,
            WizardStep::Rewards => WizardStep::Settings,
            WizardStep::Published => WizardStep::Published,
        }
    }

    /// The three form pages share the progress header; the success page
    /// does not.
    pub fn is_form(self) -> bool {
        self != WizardStep::Published
    }
}

/// What the wizard refuses to advance past, with the exact text shown
/// inline when a step fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please enter a challenge title")]
    MissingTitle,
    #[error("Please enter a challenge description")]
    MissingDescription,
    #[error("Please select a category")]
    MissingCategory,
    #[error("Please select a challenge mode")]
    MissingMode,
    #[error("Please select a difficulty level")]
    MissingDifficulty,
    #[error("Team size must be between 2 and 20")]
    TeamSizeOutOfRange,
    #[error("Please select at least one reward type")]
    MissingRewards,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageDraft {
    pub name: String,
    pub rewards: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub publish_start: String,
    pub publish_end: String,
    pub challenge_start: String,
    pub challenge_end: String,
}

/// Everything the four-step wizard collects. Lives only as long as the
/// create-challenge screen; publishing is simulated and nothing persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeDraft {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub mode: Option<Mode>,
    pub team_size: u8,
    pub team_name_guidelines: String,
    pub difficulty: Option<Difficulty>,
    pub visibility: Visibility,
    pub multi_stage: bool,
    pub stages: Vec<StageDraft>,
    pub rewards: Vec<RewardKind>,
    pub schedule: Schedule,
}

impl Default for ChallengeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: None,
            mode: None,
            team_size: TEAM_SIZE_MIN,
            team_name_guidelines: String::new(),
            difficulty: None,
            visibility: Visibility::Public,
            multi_stage: false,
            stages: vec![StageDraft::default()],
            rewards: Vec::new(),
            schedule: Schedule::default(),
        }
    }
}

impl ChallengeDraft {
    /// "Create another" semantics: back to a pristine draft.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_reward(&mut self, kind: RewardKind) {
        if let Some(pos) = self.rewards.iter().position(|r| *r == kind) {
            self.rewards.remove(pos);
        } else {
            self.rewards.push(kind);
        }
    }

    pub fn toggle_multi_stage(&mut self) {
        self.multi_stage = !self.multi_stage;
    }

    pub fn set_team_size(&mut self, size: u8) {
        self.team_size = size.clamp(TEAM_SIZE_MIN, TEAM_SIZE_MAX);
    }

    pub fn add_stage(&mut self) {
        self.stages.push(StageDraft::default());
    }

    /// At least one stage always remains, matching the form's minimum.
    pub fn remove_stage(&mut self, index: usize) {
        if self.stages.len() > 1 && index < self.stages.len() {
            self.stages.remove(index);
        }
    }

    /// Gate for leaving `step` (Next on the first two pages, Publish on the
    /// third). The first missing field wins.
    pub fn validate_step(&self, step: WizardStep) -> Result<(), DraftError> {
        match step {
            WizardStep::Details => {
                if self.title.trim().is_empty() {
                    return Err(DraftError::MissingTitle);
                }
                if self.description.trim().is_empty() {
                    return Err(DraftError::MissingDescription);
                }
                if self.category.is_none() {
                    return Err(DraftError::MissingCategory);
                }
                Ok(())
            }
            WizardStep::Settings => {
                let Some(mode) = self.mode else {
                    return Err(DraftError::MissingMode);
                };
                if self.difficulty.is_none() {
                    return Err(DraftError::MissingDifficulty);
                }
                if mode == Mode::Team
                    && !(TEAM_SIZE_MIN..=TEAM_SIZE_MAX).contains(&self.team_size)
                {
                    return Err(DraftError::TeamSizeOutOfRange);
                }
                Ok(())
            }
            WizardStep::Rewards => {
                if self.rewards.is_empty() {
                    return Err(DraftError::MissingRewards);
                }
                Ok(())
            }
            WizardStep::Published => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn filled_details() -> ChallengeDraft {
        ChallengeDraft {
            title: "5k Morning Run".into(),
            description: "Run 5k before work every day this week".into(),
            category: Some(Category::Running),
            ..ChallengeDraft::default()
        }
    }

    #[test]
    fn pristine_draft_defaults() {
        let draft = ChallengeDraft::default();
        assert_eq!(draft.team_size, 2);
        assert_eq!(draft.visibility, Visibility::Public);
        assert_eq!(draft.stages.len(), 1);
        assert!(!draft.multi_stage);
        assert!(draft.rewards.is_empty());
    }

    #[test]
    fn details_step_reports_first_missing_field() {
        let mut draft = ChallengeDraft::default();
        assert_eq!(
            draft.validate_step(WizardStep::Details),
            Err(DraftError::MissingTitle)
        );
        draft.title = "Spring Sprint".into();
        assert_eq!(
            draft.validate_step(WizardStep::Details),
            Err(DraftError::MissingDescription)
        );
        draft.description = "Six weeks of sprints".into();
        assert_eq!(
            draft.validate_step(WizardStep::Details),
            Err(DraftError::MissingCategory)
        );
        draft.category = Some(Category::Fitness);
        assert_eq!(draft.validate_step(WizardStep::Details), Ok(()));
    }

    #[test]
    fn settings_step_requires_mode_and_difficulty() {
        let mut draft = filled_details();
        assert_eq!(
            draft.validate_step(WizardStep::Settings),
            Err(DraftError::MissingMode)
        );
        draft.mode = Some(Mode::Single);
        assert_eq!(
            draft.validate_step(WizardStep::Settings),
            Err(DraftError::MissingDifficulty)
        );
        draft.difficulty = Some(Difficulty::Medium);
        assert_eq!(draft.validate_step(WizardStep::Settings), Ok(()));
    }

    #[test]
    fn team_size_is_clamped_and_validated() {
        let mut draft = filled_details();
        draft.mode = Some(Mode::Team);
        draft.difficulty = Some(Difficulty::Hard);
        draft.set_team_size(1);
        assert_eq!(draft.team_size, TEAM_SIZE_MIN);
        draft.set_team_size(50);
        assert_eq!(draft.team_size, TEAM_SIZE_MAX);
        draft.set_team_size(8);
        assert_eq!(draft.team_size, 8);
        assert_eq!(draft.validate_step(WizardStep::Settings), Ok(()));
    }

    #[test]
    fn rewards_step_needs_at_least_one_kind() {
        let mut draft = filled_details();
        assert_eq!(
            draft.validate_step(WizardStep::Rewards),
            Err(DraftError::MissingRewards)
        );
        draft.toggle_reward(RewardKind::Points);
        assert_eq!(draft.validate_step(WizardStep::Rewards), Ok(()));
    }

    #[test]
    fn toggling_a_reward_twice_removes_it() {
        let mut draft = ChallengeDraft::default();
        draft.toggle_reward(RewardKind::Badges);
        draft.toggle_reward(RewardKind::Custom);
        assert_eq!(draft.rewards, vec![RewardKind::Badges, RewardKind::Custom]);
        draft.toggle_reward(RewardKind::Badges);
        assert_eq!(draft.rewards, vec![RewardKind::Custom]);
    }

    #[test]
    fn last_stage_cannot_be_removed() {
        let mut draft = ChallengeDraft::default();
        draft.remove_stage(0);
        assert_eq!(draft.stages.len(), 1);
        draft.add_stage();
        draft.add_stage();
        draft.remove_stage(1);
        assert_eq!(draft.stages.len(), 2);
    }

    #[test]
    fn steps_advance_and_retreat_in_order() {
        assert_eq!(WizardStep::Details.next(), WizardStep::Settings);
        assert_eq!(WizardStep::Settings.next(), WizardStep::Rewards);
        assert_eq!(WizardStep::Rewards.next(), WizardStep::Rewards);
        assert_eq!(WizardStep::Rewards.prev(), WizardStep::Settings);
        assert_eq!(WizardStep::Settings.prev(), WizardStep::Details);
        assert_eq!(WizardStep::Details.prev(), WizardStep::Details);
        assert!(WizardStep::Details.is_form());
        assert!(!WizardStep::Published.is_form());
    }

    #[test]
    fn reset_restores_a_pristine_draft() {
        let mut draft = filled_details();
        draft.mode = Some(Mode::Team);
        draft.toggle_reward(RewardKind::Badges);
        draft.add_stage();
        draft.reset();
        assert_eq!(draft, ChallengeDraft::default());
    }
}
