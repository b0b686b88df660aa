use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use questline_flow::FlowEvent;
use questline_flow::challenge::Category;
use questline_flow::challenge::ChallengeDraft;
use questline_flow::challenge::Difficulty;
use questline_flow::challenge::DraftError;
use questline_flow::challenge::Mode;
use questline_flow::challenge::RewardKind;
use questline_flow::challenge::Schedule;
use questline_flow::challenge::StageDraft;
use questline_flow::challenge::Visibility;
use questline_flow::challenge::WizardStep;
use questline_flow::challenge::all_categories;
use questline_flow::challenge::all_difficulties;
use questline_flow::challenge::all_modes;
use questline_flow::challenge::all_reward_kinds;
use questline_flow::challenge::all_visibilities;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::WidgetRef;

use crate::app_event::AppEvent;
use crate::app_event::MockOp;
use crate::app_event_sender::AppEventSender;
use crate::screens::KeyboardHandler;
use crate::screens::put_line;
use crate::styles;
use crate::text_field::TextField;

const FIELD_WIDTH: u16 = 40;

/// Every focusable element of the wizard, recomputed per step because the
/// settings page grows and shrinks with the mode and multi-stage choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Control {
    Title,
    Description,
    Category,
    Mode,
    TeamSize,
    Guidelines,
    Difficulty,
    Visibility,
    MultiStage,
    StageName(usize),
    StageRewards(usize),
    AddStage,
    Reward(usize),
    PublishStart,
    PublishEnd,
    ChallengeStart,
    ChallengeEnd,
}

/// The four-step challenge wizard. Text lives in the fields until a step
/// boundary; `sync_draft` copies it into the draft right before each
/// validation so the flow crate always judges what is on screen.
pub(crate) struct CreateChallengeScreen {
    app_event_tx: AppEventSender,
    draft: ChallengeDraft,
    step: WizardStep,
    focus: usize,
    title: TextField,
    description: TextField,
    guidelines: TextField,
    stage_fields: Vec<(TextField, TextField)>,
    publish_start: TextField,
    publish_end: TextField,
    challenge_start: TextField,
    challenge_end: TextField,
    categories: Vec<Category>,
    modes: Vec<Mode>,
    difficulties: Vec<Difficulty>,
    visibilities: Vec<Visibility>,
    reward_kinds: Vec<RewardKind>,
    busy: bool,
    error: Option<DraftError>,
}

impl CreateChallengeScreen {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        Self {
            app_event_tx,
            draft: ChallengeDraft::default(),
            step: WizardStep::Details,
            focus: 0,
            title: TextField::new().with_placeholder("Enter challenge title"),
            description: TextField::new().with_placeholder("Describe your challenge..."),
            guidelines: TextField::new().with_placeholder("Guidelines for team names..."),
            stage_fields: vec![stage_pair()],
            publish_start: TextField::new().with_placeholder("YYYY-MM-DD HH:MM"),
            publish_end: TextField::new().with_placeholder("YYYY-MM-DD HH:MM"),
            challenge_start: TextField::new().with_placeholder("YYYY-MM-DD HH:MM"),
            challenge_end: TextField::new().with_placeholder("YYYY-MM-DD HH:MM"),
            categories: all_categories(),
            modes: all_modes(),
            difficulties: all_difficulties(),
            visibilities: all_visibilities(),
            reward_kinds: all_reward_kinds(),
            busy: false,
            error: None,
        }
    }

    pub(crate) fn on_mock_op_finished(&mut self, op: &MockOp) {
        match op {
            MockOp::AdvanceWizard => {
                self.busy = false;
                self.step = self.step.next();
                self.focus = 0;
            }
            MockOp::PublishChallenge => {
                self.busy = false;
                self.step = WizardStep::Published;
            }
            _ => {}
        }
    }

    fn controls(&self) -> Vec<Control> {
        match self.step {
            WizardStep::Details => {
                vec![Control::Title, Control::Description, Control::Category]
            }
            WizardStep::Settings => {
                let mut controls = vec![Control::Mode];
                if self.draft.mode == Some(Mode::Team) {
                    controls.push(Control::TeamSize);
                    controls.push(Control::Guidelines);
                }
                controls.push(Control::Difficulty);
                controls.push(Control::Visibility);
                controls.push(Control::MultiStage);
                if self.draft.multi_stage {
                    for i in 0..self.stage_fields.len() {
                        controls.push(Control::StageName(i));
                        controls.push(Control::StageRewards(i));
                    }
                    controls.push(Control::AddStage);
                }
                controls
            }
            WizardStep::Rewards => {
                let mut controls: Vec<Control> =
                    (0..self.reward_kinds.len()).map(Control::Reward).collect();
                controls.extend([
                    Control::PublishStart,
                    Control::PublishEnd,
                    Control::ChallengeStart,
                    Control::ChallengeEnd,
                ]);
                controls
            }
            WizardStep::Published => Vec::new(),
        }
    }

    fn focused_control(&self) -> Option<Control> {
        self.controls().get(self.focus).copied()
    }

    fn focus_next(&mut self) {
        let len = self.controls().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    fn focus_prev(&mut self) {
        let len = self.controls().len();
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
        }
    }

    fn clamp_focus(&mut self) {
        let len = self.controls().len();
        self.focus = self.focus.min(len.saturating_sub(1));
    }

    fn focused_text_field(&mut self) -> Option<&mut TextField> {
        match self.focused_control()? {
            Control::Title => Some(&mut self.title),
            Control::Description => Some(&mut self.description),
            Control::Guidelines => Some(&mut self.guidelines),
            Control::StageName(i) => self.stage_fields.get_mut(i).map(|(name, _)| name),
            Control::StageRewards(i) => self.stage_fields.get_mut(i).map(|(_, rewards)| rewards),
            Control::PublishStart => Some(&mut self.publish_start),
            Control::PublishEnd => Some(&mut self.publish_end),
            Control::ChallengeStart => Some(&mut self.challenge_start),
            Control::ChallengeEnd => Some(&mut self.challenge_end),
            _ => None,
        }
    }

    fn sync_draft(&mut self) {
        self.draft.title = self.title.text().to_string();
        self.draft.description = self.description.text().to_string();
        self.draft.team_name_guidelines = self.guidelines.text().to_string();
        self.draft.stages = self
            .stage_fields
            .iter()
            .map(|(name, rewards)| StageDraft {
                name: name.text().to_string(),
                rewards: rewards.text().to_string(),
            })
            .collect();
        self.draft.schedule = Schedule {
            publish_start: self.publish_start.text().to_string(),
            publish_end: self.publish_end.text().to_string(),
            challenge_start: self.challenge_start.text().to_string(),
            challenge_end: self.challenge_end.text().to_string(),
        };
    }

    fn advance(&mut self) {
        if self.busy {
            return;
        }
        self.sync_draft();
        match self.draft.validate_step(self.step) {
            Err(e) => self.error = Some(e),
            Ok(()) => {
                self.error = None;
                self.busy = true;
                let op = if self.step == WizardStep::Rewards {
                    MockOp::PublishChallenge
                } else {
                    MockOp::AdvanceWizard
                };
                self.app_event_tx.send(AppEvent::StartMockOp(op));
            }
        }
    }

    fn retreat(&mut self) {
        if self.busy {
            return;
        }
        self.error = None;
        self.step = self.step.prev();
        self.focus = 0;
    }

    fn start_over(&mut self) {
        *self = Self::new(self.app_event_tx.clone());
    }

    fn add_stage(&mut self) {
        self.draft.add_stage();
        self.stage_fields.push(stage_pair());
    }

    fn remove_focused_stage(&mut self) {
        let idx = match self.focused_control() {
            Some(Control::StageName(i) | Control::StageRewards(i)) => i,
            _ => return,
        };
        if self.stage_fields.len() > 1 {
            self.stage_fields.remove(idx);
            self.draft.remove_stage(idx);
            self.clamp_focus();
        }
    }

    fn handle_control_key(&mut self, key_event: KeyEvent) {
        let Some(control) = self.focused_control() else {
            return;
        };
        match control {
            Control::Category => {
                if let Some(next) = cycled(&self.categories, self.draft.category, key_event.code) {
                    self.draft.category = Some(next);
                    self.error = None;
                }
            }
            Control::Mode => {
                if let Some(next) = cycled(&self.modes, self.draft.mode, key_event.code) {
                    self.draft.mode = Some(next);
                    self.error = None;
                    self.clamp_focus();
                }
            }
            Control::Difficulty => {
                if let Some(next) = cycled(&self.difficulties, self.draft.difficulty, key_event.code)
                {
                    self.draft.difficulty = Some(next);
                    self.error = None;
                }
            }
            Control::Visibility => {
                if let Some(next) =
                    cycled(&self.visibilities, Some(self.draft.visibility), key_event.code)
                {
                    self.draft.visibility = next;
                }
            }
            Control::TeamSize => match key_event.code {
                KeyCode::Left | KeyCode::Char('-') => {
                    self.draft.set_team_size(self.draft.team_size.saturating_sub(1));
                }
                KeyCode::Right | KeyCode::Char('+') => {
                    self.draft.set_team_size(self.draft.team_size.saturating_add(1));
                }
                _ => {}
            },
            Control::MultiStage => {
                if matches!(key_event.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.draft.toggle_multi_stage();
                    self.clamp_focus();
                }
            }
            Control::AddStage => {
                if matches!(key_event.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.add_stage();
                }
            }
            Control::Reward(i) => {
                if matches!(key_event.code, KeyCode::Char(' ') | KeyCode::Enter)
                    && let Some(kind) = self.reward_kinds.get(i).copied()
                {
                    self.draft.toggle_reward(kind);
                    self.error = None;
                }
            }
            _ => {
                if key_event.code == KeyCode::Enter {
                    self.focus_next();
                } else if let Some(field) = self.focused_text_field() {
                    if field.handle_key_event(key_event) {
                        self.error = None;
                    }
                }
            }
        }
    }

    fn render_progress(&self, area: Rect, buf: &mut Buffer, x: u16, y: u16) {
        let current = self.step.number();
        let mut spans: Vec<Span> = Vec::new();
        for n in 1..=3u8 {
            if n > 1 {
                spans.push(Span::styled("───", styles::dim()));
            }
            let marker = if n < current {
                " ✓ ".to_string()
            } else {
                format!(" {n} ")
            };
            let style = if n <= current {
                styles::selected()
            } else {
                styles::dim()
            };
            spans.push(Span::styled(marker, style));
        }
        put_line(buf, area, x, y, &Line::from(spans));
    }

    fn label_line(&self, control: Control, text: String) -> Line<'static> {
        let focused = self.focused_control() == Some(control);
        let caret = if focused { "> " } else { "  " };
        let style = if focused {
            styles::selected()
        } else {
            Style::default()
        };
        Line::from(vec![Span::raw(caret), Span::styled(text, style)])
    }

    fn render_labeled_field(
        &self,
        buf: &mut Buffer,
        area: Rect,
        control: Control,
        label: &str,
        field: &TextField,
        x: u16,
        y: u16,
    ) -> u16 {
        put_line(buf, area, x, y, &self.label_line(control, label.to_string()));
        let field_y = y + 1;
        if field_y < area.y + area.height {
            let width = FIELD_WIDTH.min((area.x + area.width).saturating_sub(x + 2));
            field.render(
                Rect::new(x + 2, field_y, width, 1),
                buf,
                self.focused_control() == Some(control),
            );
        }
        y + 3
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer, x: u16, mut y: u16) -> u16 {
        y = self.render_labeled_field(buf, area, Control::Title, "Challenge Title *", &self.title, x, y);
        y = self.render_labeled_field(
            buf,
            area,
            Control::Description,
            "Description *",
            &self.description,
            x,
            y,
        );
        put_line(
            buf,
            area,
            x,
            y,
            &self.label_line(Control::Category, "Category *".to_string()),
        );
        y += 1;
        for chunk in self.categories.chunks(3) {
            let mut spans: Vec<Span> = vec![Span::raw("  ")];
            for (i, category) in chunk.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("   "));
                }
                spans.push(choice_span(
                    self.draft.category == Some(*category),
                    category.icon(),
                    category.title(),
                ));
            }
            put_line(buf, area, x, y, &Line::from(spans));
            y += 1;
        }
        y + 1
    }

    fn render_settings(&self, area: Rect, buf: &mut Buffer, x: u16, mut y: u16) -> u16 {
        put_line(
            buf,
            area,
            x,
            y,
            &self.label_line(Control::Mode, "Challenge Mode *".to_string()),
        );
        y += 1;
        for mode in &self.modes {
            let mut spans = vec![
                Span::raw("  "),
                choice_span(self.draft.mode == Some(*mode), mode.icon(), mode.title()),
                Span::raw("  "),
            ];
            spans.push(Span::styled(mode.description(), styles::dim()));
            put_line(buf, area, x, y, &Line::from(spans));
            y += 1;
        }
        y += 1;

        if self.draft.mode == Some(Mode::Team) {
            put_line(
                buf,
                area,
                x,
                y,
                &self.label_line(
                    Control::TeamSize,
                    format!("Team Size  ‹ {} ›", self.draft.team_size),
                ),
            );
            y += 2;
            y = self.render_labeled_field(
                buf,
                area,
                Control::Guidelines,
                "Team Name Guidelines",
                &self.guidelines,
                x,
                y,
            );
        }

        put_line(
            buf,
            area,
            x,
            y,
            &self.label_line(Control::Difficulty, "Difficulty Level *".to_string()),
        );
        y += 1;
        let mut spans: Vec<Span> = vec![Span::raw("  ")];
        for (i, difficulty) in self.difficulties.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(choice_span(
                self.draft.difficulty == Some(*difficulty),
                difficulty.icon(),
                difficulty.title(),
            ));
        }
        put_line(buf, area, x, y, &Line::from(spans));
        y += 2;

        put_line(
            buf,
            area,
            x,
            y,
            &self.label_line(Control::Visibility, "Visibility".to_string()),
        );
        y += 1;
        for visibility in &self.visibilities {
            let line = Line::from(vec![
                Span::raw("  "),
                choice_span(
                    self.draft.visibility == *visibility,
                    visibility.icon(),
                    visibility.title(),
                ),
                Span::raw("  "),
                Span::styled(visibility.description(), styles::dim()),
            ]);
            put_line(buf, area, x, y, &line);
            y += 1;
        }
        y += 1;

        let marker = if self.draft.multi_stage { "[x]" } else { "[ ]" };
        put_line(
            buf,
            area,
            x,
            y,
            &self.label_line(Control::MultiStage, format!("{marker} Multi-Stage Challenge")),
        );
        y += 1;

        if self.draft.multi_stage {
            put_line(buf, area, x, y, &Line::styled("Challenge Stages", styles::dim()));
            y += 1;
            for (i, (name, rewards)) in self.stage_fields.iter().enumerate() {
                put_line(buf, area, x, y, &Line::from(format!("  Stage {}", i + 1)));
                y += 1;
                y = self.render_stage_field(buf, area, Control::StageName(i), name, x, y);
                y = self.render_stage_field(buf, area, Control::StageRewards(i), rewards, x, y);
            }
            put_line(
                buf,
                area,
                x,
                y,
                &self.label_line(Control::AddStage, "+ Add Stage".to_string()),
            );
            y += 1;
        }
        y + 1
    }

    fn render_stage_field(
        &self,
        buf: &mut Buffer,
        area: Rect,
        control: Control,
        field: &TextField,
        x: u16,
        y: u16,
    ) -> u16 {
        if y >= area.y + area.height {
            return y;
        }
        let focused = self.focused_control() == Some(control);
        let caret = if focused { "> " } else { "  " };
        put_line(buf, area, x + 2, y, &Line::from(caret));
        let width = FIELD_WIDTH.min((area.x + area.width).saturating_sub(x + 4));
        field.render(Rect::new(x + 4, y, width, 1), buf, focused);
        y + 1
    }

    fn render_rewards(&self, area: Rect, buf: &mut Buffer, x: u16, mut y: u16) -> u16 {
        put_line(buf, area, x, y, &Line::styled("Rewards", styles::title()));
        y += 1;
        for (i, kind) in self.reward_kinds.iter().enumerate() {
            let picked = self.draft.rewards.contains(kind);
            let marker = if picked { "[x]" } else { "[ ]" };
            let focused = self.focused_control() == Some(Control::Reward(i));
            let caret = if focused { "> " } else { "  " };
            let name_style = if focused {
                styles::selected()
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::raw(caret),
                Span::styled(format!("{marker} {} {}", kind.icon(), kind.title()), name_style),
                Span::raw("  "),
                Span::styled(kind.description(), styles::dim()),
            ]);
            put_line(buf, area, x, y, &line);
            y += 1;
        }
        y += 1;

        y = self.render_labeled_field(
            buf,
            area,
            Control::PublishStart,
            "Publish Start",
            &self.publish_start,
            x,
            y,
        );
        y = self.render_labeled_field(
            buf,
            area,
            Control::PublishEnd,
            "Publish End",
            &self.publish_end,
            x,
            y,
        );
        y = self.render_labeled_field(
            buf,
            area,
            Control::ChallengeStart,
            "Challenge Start",
            &self.challenge_start,
            x,
            y,
        );
        y = self.render_labeled_field(
            buf,
            area,
            Control::ChallengeEnd,
            "Challenge End",
            &self.challenge_end,
            x,
            y,
        );
        y
    }

    fn render_published(&self, area: Rect, buf: &mut Buffer, x: u16, mut y: u16) -> u16 {
        put_line(buf, area, x, y, &Line::from("🎉"));
        y += 1;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("Challenge Created!", styles::title()),
        );
        y += 1;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled(
                "Your challenge has been successfully published and is now live!",
                styles::dim(),
            ),
        );
        y += 2;
        if !self.draft.title.is_empty() {
            put_line(
                buf,
                area,
                x,
                y,
                &Line::from(format!("\"{}\"", self.draft.title)),
            );
            y += 2;
        }
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("[ Create Another Challenge ]", styles::selected()),
        );
        y + 1
    }
}

impl KeyboardHandler for CreateChallengeScreen {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if self.step == WizardStep::Published {
            match key_event.code {
                KeyCode::Char('n') => self.start_over(),
                KeyCode::Esc => self.app_event_tx.send(AppEvent::Flow(FlowEvent::Back)),
                _ => {}
            }
            return;
        }
        if self.busy {
            if key_event.code == KeyCode::Esc {
                self.app_event_tx.send(AppEvent::Flow(FlowEvent::Back));
            }
            return;
        }
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            match key_event.code {
                KeyCode::Char('n') => self.advance(),
                KeyCode::Char('p') => self.retreat(),
                KeyCode::Char('d') => self.remove_focused_stage(),
                _ => {}
            }
            return;
        }
        match key_event.code {
            KeyCode::Esc => self.app_event_tx.send(AppEvent::Flow(FlowEvent::Back)),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            _ => self.handle_control_key(key_event),
        }
    }
}

impl WidgetRef for CreateChallengeScreen {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("Create Challenge", styles::title()),
        );
        y += 1;

        if self.step.is_form() {
            self.render_progress(area, buf, x, y);
            y += 1;
            if let Some(error) = self.error {
                put_line(buf, area, x, y, &Line::styled(error.to_string(), styles::error()));
            }
            y += 2;
        } else {
            y += 1;
        }

        y = match self.step {
            WizardStep::Details => self.render_details(area, buf, x, y),
            WizardStep::Settings => self.render_settings(area, buf, x, y),
            WizardStep::Rewards => self.render_rewards(area, buf, x, y),
            WizardStep::Published => self.render_published(area, buf, x, y),
        };

        if self.step.is_form() {
            let button = if self.busy {
                Line::styled("[ Processing... ]", styles::dim())
            } else if self.step == WizardStep::Rewards {
                Line::styled("[ Publish Challenge ]", styles::selected())
            } else {
                Line::styled("[ Next Step ]", styles::selected())
            };
            put_line(buf, area, x, y, &button);
        }

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y + 1 {
            let hints: Line = if self.step.is_form() {
                styles::key_hint_line(&[
                    ("Tab", "field"),
                    ("Ctrl-N", "next"),
                    ("Ctrl-P", "previous"),
                    ("Esc", "dashboard"),
                ])
            } else {
                styles::key_hint_line(&[("n", "create another"), ("Esc", "dashboard")])
            };
            put_line(buf, area, x, footer_y, &hints);
        }
    }
}

fn stage_pair() -> (TextField, TextField) {
    (
        TextField::new().with_placeholder("Stage name"),
        TextField::new().with_placeholder("Rewards"),
    )
}

fn choice_span(picked: bool, icon: &str, title: &str) -> Span<'static> {
    let marker = if picked { "●" } else { "○" };
    let style = if picked {
        styles::selected()
    } else {
        Style::default()
    };
    Span::styled(format!("{marker} {icon} {title}"), style)
}

/// Left/Space/Right cycle through a catalog; anything else leaves it alone.
/// A `None` current lands on the first (or last) entry.
fn cycled<T: Copy + PartialEq>(items: &[T], current: Option<T>, code: KeyCode) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let forward = match code {
        KeyCode::Right | KeyCode::Char(' ') => true,
        KeyCode::Left => false,
        _ => return None,
    };
    let idx = current.and_then(|c| items.iter().position(|i| *i == c));
    let next = match (idx, forward) {
        (None, true) => 0,
        (None, false) => items.len() - 1,
        (Some(i), true) => (i + 1) % items.len(),
        (Some(i), false) => (i + items.len() - 1) % items.len(),
    };
    Some(items[next])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    fn make_screen() -> (CreateChallengeScreen, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();
        (CreateChallengeScreen::new(AppEventSender::new(tx)), rx)
    }

    fn press(screen: &mut CreateChallengeScreen, code: KeyCode) {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(screen: &mut CreateChallengeScreen, c: char) {
        screen.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(screen: &mut CreateChallengeScreen, s: &str) {
        for c in s.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn next_blocks_until_details_are_valid() {
        let (mut screen, mut rx) = make_screen();
        ctrl(&mut screen, 'n');
        assert_eq!(screen.error, Some(DraftError::MissingTitle));
        assert!(rx.try_recv().is_err());

        type_str(&mut screen, "Morning Run");
        ctrl(&mut screen, 'n');
        assert_eq!(screen.error, Some(DraftError::MissingDescription));

        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "Run 5k before work");
        ctrl(&mut screen, 'n');
        assert_eq!(screen.error, Some(DraftError::MissingCategory));

        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.draft.category, Some(Category::Football));
        assert_eq!(screen.error, None);

        ctrl(&mut screen, 'n');
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::StartMockOp(MockOp::AdvanceWizard))
        );
        assert!(screen.busy);

        screen.on_mock_op_finished(&MockOp::AdvanceWizard);
        assert_eq!(screen.step, WizardStep::Settings);
        assert!(!screen.busy);
    }

    #[test]
    fn full_wizard_reaches_published_and_resets() {
        let (mut screen, mut rx) = make_screen();
        type_str(&mut screen, "Spring Sprint");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "Six weeks of sprints");
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char(' '));
        ctrl(&mut screen, 'n');
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::StartMockOp(MockOp::AdvanceWizard))
        );
        screen.on_mock_op_finished(&MockOp::AdvanceWizard);
        assert_eq!(screen.step, WizardStep::Settings);

        // Mode, then difficulty; visibility keeps its Public default.
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.draft.mode, Some(Mode::Single));
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.draft.difficulty, Some(Difficulty::Easy));
        ctrl(&mut screen, 'n');
        screen.on_mock_op_finished(&MockOp::AdvanceWizard);
        assert_eq!(screen.step, WizardStep::Rewards);
        rx.try_recv().ok();

        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.draft.rewards, vec![RewardKind::Badges]);
        ctrl(&mut screen, 'n');
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::StartMockOp(MockOp::PublishChallenge))
        );
        screen.on_mock_op_finished(&MockOp::PublishChallenge);
        assert_eq!(screen.step, WizardStep::Published);
        assert_eq!(screen.draft.title, "Spring Sprint");

        press(&mut screen, KeyCode::Char('n'));
        assert_eq!(screen.step, WizardStep::Details);
        assert_eq!(screen.draft, ChallengeDraft::default());
        assert!(screen.title.is_empty());
    }

    #[test]
    fn team_mode_exposes_team_size_controls() {
        let (mut screen, _rx) = make_screen();
        screen.step = WizardStep::Settings;
        press(&mut screen, KeyCode::Char(' '));
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.draft.mode, Some(Mode::Team));

        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.focused_control(), Some(Control::TeamSize));
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Char('+'));
        assert_eq!(screen.draft.team_size, 4);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.draft.team_size, 3);
        for _ in 0..10 {
            press(&mut screen, KeyCode::Char('-'));
        }
        assert_eq!(screen.draft.team_size, 2);
    }

    #[test]
    fn publish_requires_a_reward() {
        let (mut screen, mut rx) = make_screen();
        screen.step = WizardStep::Rewards;
        ctrl(&mut screen, 'n');
        assert_eq!(screen.error, Some(DraftError::MissingRewards));
        assert!(rx.try_recv().is_err());

        press(&mut screen, KeyCode::Char(' '));
        press(&mut screen, KeyCode::Char(' '));
        assert!(screen.draft.rewards.is_empty());
        press(&mut screen, KeyCode::Char(' '));
        ctrl(&mut screen, 'n');
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::StartMockOp(MockOp::PublishChallenge))
        );
    }

    #[test]
    fn stages_can_be_added_and_removed() {
        let (mut screen, _rx) = make_screen();
        screen.step = WizardStep::Settings;
        for _ in 0..3 {
            press(&mut screen, KeyCode::Tab);
        }
        assert_eq!(screen.focused_control(), Some(Control::MultiStage));
        press(&mut screen, KeyCode::Char(' '));
        assert!(screen.draft.multi_stage);

        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.focused_control(), Some(Control::StageName(0)));
        type_str(&mut screen, "Week 1");

        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.focused_control(), Some(Control::AddStage));
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.stage_fields.len(), 2);
        assert_eq!(screen.draft.stages.len(), 2);
        assert_eq!(screen.focused_control(), Some(Control::StageName(1)));

        ctrl(&mut screen, 'd');
        assert_eq!(screen.stage_fields.len(), 1);
        assert_eq!(screen.draft.stages.len(), 1);
        assert_eq!(screen.stage_fields[0].0.text(), "Week 1");
    }

    #[test]
    fn previous_returns_without_any_mock_op() {
        let (mut screen, mut rx) = make_screen();
        screen.step = WizardStep::Rewards;
        ctrl(&mut screen, 'p');
        assert_eq!(screen.step, WizardStep::Settings);
        ctrl(&mut screen, 'p');
        assert_eq!(screen.step, WizardStep::Details);
        ctrl(&mut screen, 'p');
        assert_eq!(screen.step, WizardStep::Details);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn esc_leaves_for_the_dashboard() {
        let (mut screen, mut rx) = make_screen();
        press(&mut screen, KeyCode::Esc);
        assert_eq!(rx.try_recv().ok(), Some(AppEvent::Flow(FlowEvent::Back)));
    }

    #[test]
    fn renders_details_then_published() {
        let (mut screen, _rx) = make_screen();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        screen.render_ref(area, &mut buf);
        let lines = buffer_lines(&buf, area);
        assert!(lines.iter().any(|l| l.contains("Create Challenge")));
        assert!(lines.iter().any(|l| l.contains("Challenge Title *")));
        assert!(lines.iter().any(|l| l.contains("Enter challenge title")));
        assert!(lines.iter().any(|l| l.contains("Football")));

        screen.title.set_text("Spring Sprint");
        screen.sync_draft();
        screen.step = WizardStep::Published;
        let mut buf = Buffer::empty(area);
        screen.render_ref(area, &mut buf);
        let lines = buffer_lines(&buf, area);
        assert!(lines.iter().any(|l| l.contains("Challenge Created!")));
        assert!(lines.iter().any(|l| l.contains("Spring Sprint")));
        assert!(lines.iter().any(|l| l.contains("Create Another Challenge")));
    }

    fn buffer_lines(buf: &Buffer, area: Rect) -> Vec<String> {
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
}
