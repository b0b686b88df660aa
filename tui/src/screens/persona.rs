use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use questline_flow::FlowEvent;
use questline_flow::persona::AGE_MAX;
use questline_flow::persona::AGE_MIN;
use questline_flow::persona::Persona;
use questline_flow::persona::PersonaChoice;
use questline_flow::persona::all_personas;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::WidgetRef;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::screens::KeyboardHandler;
use crate::screens::put_line;
use crate::selection_menu::OptionRow;
use crate::selection_menu::ScrollState;
use crate::selection_menu::render_options;
use crate::styles;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    PickPersona,
    PickSub,
    PickMember,
    PickAge,
    Confirm,
}

/// Persona picker shown after the role choice. The selection cascades:
/// persona, then audience sub-option, then (Individual only) a member
/// option; Education asks for an age instead. Completion emits
/// `PersonaCompleted`.
pub(crate) struct PersonaScreen {
    app_event_tx: AppEventSender,
    personas: Vec<Persona>,
    choice: PersonaChoice,
    stage: Stage,
    menu: ScrollState,
}

impl PersonaScreen {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        let personas = all_personas();
        let mut menu = ScrollState::new();
        menu.clamp_selection(personas.len());
        Self {
            app_event_tx,
            personas,
            choice: PersonaChoice::default(),
            stage: Stage::PickPersona,
            menu,
        }
    }

    fn enter_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.menu.reset();
        self.menu.clamp_selection(self.stage_len());
    }

    fn stage_len(&self) -> usize {
        match self.stage {
            Stage::PickPersona => self.personas.len(),
            Stage::PickSub => self.sub_options().len(),
            Stage::PickMember => self.member_options().len(),
            Stage::PickAge | Stage::Confirm => 0,
        }
    }

    fn sub_options(&self) -> &'static [&'static str] {
        match self.choice.persona {
            Some(persona) => persona.sub_options(),
            None => &[],
        }
    }

    fn member_options(&self) -> &'static [&'static str] {
        match (self.choice.persona, self.choice.sub_option) {
            (Some(persona), Some(sub)) => persona.member_options(sub),
            _ => &[],
        }
    }

    fn accept(&mut self) {
        match self.stage {
            Stage::PickPersona => {
                let Some(idx) = self.menu.selected_idx else {
                    return;
                };
                let Some(persona) = self.personas.get(idx).copied() else {
                    return;
                };
                self.choice.select_persona(persona);
                match persona {
                    Persona::Education => self.enter_stage(Stage::PickAge),
                    _ => self.enter_stage(Stage::PickSub),
                }
            }
            Stage::PickSub => {
                let Some(idx) = self.menu.selected_idx else {
                    return;
                };
                let Some(sub) = self.sub_options().get(idx).copied() else {
                    return;
                };
                self.choice.select_sub_option(sub);
                if self.choice.persona == Some(Persona::Individual) {
                    self.enter_stage(Stage::PickMember);
                } else {
                    self.enter_stage(Stage::Confirm);
                }
            }
            Stage::PickMember => {
                let Some(idx) = self.menu.selected_idx else {
                    return;
                };
                let Some(member) = self.member_options().get(idx).copied() else {
                    return;
                };
                self.choice.select_member_option(member);
                self.enter_stage(Stage::Confirm);
            }
            Stage::PickAge => self.enter_stage(Stage::Confirm),
            Stage::Confirm => {
                if self.choice.is_complete() {
                    self.app_event_tx
                        .send(AppEvent::Flow(FlowEvent::PersonaCompleted));
                }
            }
        }
    }

    fn step_back(&mut self) {
        match self.stage {
            Stage::PickPersona => {}
            Stage::PickSub | Stage::PickAge => self.enter_stage(Stage::PickPersona),
            Stage::PickMember => self.enter_stage(Stage::PickSub),
            Stage::Confirm => match self.choice.persona {
                Some(Persona::Education) => self.enter_stage(Stage::PickAge),
                Some(Persona::Individual) => self.enter_stage(Stage::PickMember),
                _ => self.enter_stage(Stage::PickSub),
            },
        }
    }

    fn adjust_age(&mut self, delta: i16) {
        let age = i16::from(self.choice.age) + delta;
        let clamped = age.clamp(i16::from(AGE_MIN), i16::from(AGE_MAX));
        self.choice.set_age(clamped as u8);
    }
}

impl KeyboardHandler for PersonaScreen {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Up => self.menu.move_up_wrap(self.stage_len()),
            KeyCode::Down | KeyCode::Tab => self.menu.move_down_wrap(self.stage_len()),
            KeyCode::Enter => self.accept(),
            KeyCode::Esc => self.step_back(),
            KeyCode::Left | KeyCode::Char('-') if self.stage == Stage::PickAge => {
                self.adjust_age(-1);
            }
            KeyCode::Right | KeyCode::Char('+') if self.stage == Stage::PickAge => {
                self.adjust_age(1);
            }
            _ => {}
        }
    }
}

impl WidgetRef for PersonaScreen {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;
        put_line(buf, area, x, y, &Line::styled("Welcome!", styles::title()));
        y += 1;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled(
                "Help us personalize your experience by choosing your persona and audience.",
                styles::dim(),
            ),
        );
        y += 2;

        let mut picks: Vec<Span> = Vec::new();
        if let Some(persona) = self.choice.persona {
            picks.push(Span::raw(format!("{} {}", persona.icon(), persona.title())));
        }
        if let Some(sub) = self.choice.sub_option {
            picks.push(Span::raw(format!("  ›  {sub}")));
        }
        if let Some(member) = self.choice.member_option {
            picks.push(Span::raw(format!("  ›  {member}")));
        }
        if self.choice.persona == Some(Persona::Education) {
            picks.push(Span::raw(format!("  ›  {} years", self.choice.age)));
        }
        if !picks.is_empty() {
            put_line(buf, area, x, y, &Line::from(picks));
            y += 2;
        }

        match self.stage {
            Stage::PickPersona => {
                let rows: Vec<OptionRow> = self
                    .personas
                    .iter()
                    .map(|p| OptionRow {
                        icon: Some(p.icon()),
                        name: p.title().to_string(),
                        description: Some(p.description().to_string()),
                    })
                    .collect();
                let list_area = list_area(area, x, y);
                render_options(list_area, buf, &rows, &self.menu, 2);
            }
            Stage::PickSub => {
                put_line(buf, area, x, y, &Line::from("Who is your audience?"));
                y += 1;
                let rows: Vec<OptionRow> = self
                    .sub_options()
                    .iter()
                    .map(|s| OptionRow {
                        icon: None,
                        name: (*s).to_string(),
                        description: None,
                    })
                    .collect();
                let list_area = list_area(area, x, y);
                render_options(list_area, buf, &rows, &self.menu, 1);
            }
            Stage::PickMember => {
                put_line(buf, area, x, y, &Line::from("How will they take part?"));
                y += 1;
                let rows: Vec<OptionRow> = self
                    .member_options()
                    .iter()
                    .map(|m| OptionRow {
                        icon: None,
                        name: (*m).to_string(),
                        description: None,
                    })
                    .collect();
                let list_area = list_area(area, x, y);
                render_options(list_area, buf, &rows, &self.menu, 1);
            }
            Stage::PickAge => {
                put_line(
                    buf,
                    area,
                    x,
                    y,
                    &Line::from(vec![
                        Span::raw("Age Range  "),
                        Span::styled(format!("{} years", self.choice.age), styles::selected()),
                    ]),
                );
                y += 1;
                put_line(
                    buf,
                    area,
                    x,
                    y,
                    &Line::styled(
                        format!("←/→ to adjust ({AGE_MIN}-{AGE_MAX}), Enter to continue"),
                        styles::dim(),
                    ),
                );
            }
            Stage::Confirm => {
                put_line(
                    buf,
                    area,
                    x,
                    y,
                    &Line::styled("[ Continue ]", styles::selected()),
                );
            }
        }

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y + 1 {
            put_line(
                buf,
                area,
                x,
                footer_y,
                &styles::key_hint_line(&[
                    ("↑/↓", "choose"),
                    ("Enter", "select"),
                    ("Esc", "step back"),
                ]),
            );
        }
    }
}

fn list_area(area: Rect, x: u16, y: u16) -> Rect {
    Rect::new(
        x,
        y.min(area.y + area.height),
        (area.x + area.width).saturating_sub(x),
        (area.y + area.height).saturating_sub(y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    fn make_screen() -> (PersonaScreen, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();
        (PersonaScreen::new(AppEventSender::new(tx)), rx)
    }

    fn press(screen: &mut PersonaScreen, code: KeyCode) {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn education_path_asks_for_age_then_completes() {
        let (mut screen, mut rx) = make_screen();
        // Community, Company, Individual, Education
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.stage, Stage::PickAge);

        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.choice.age, 17);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.stage, Stage::Confirm);

        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::Flow(FlowEvent::PersonaCompleted))
        );
    }

    #[test]
    fn individual_path_requires_sub_and_member_options() {
        let (mut screen, mut rx) = make_screen();
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.stage, Stage::PickSub);

        // Football Player
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.stage, Stage::PickMember);

        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.stage, Stage::Confirm);
        assert!(screen.choice.is_complete());

        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::Flow(FlowEvent::PersonaCompleted))
        );
    }

    #[test]
    fn community_path_needs_only_a_sub_option() {
        let (mut screen, mut rx) = make_screen();
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.stage, Stage::PickSub);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.stage, Stage::Confirm);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::Flow(FlowEvent::PersonaCompleted))
        );
    }

    #[test]
    fn esc_steps_back_through_stages() {
        let (mut screen, mut rx) = make_screen();
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.stage, Stage::PickSub);
        press(&mut screen, KeyCode::Esc);
        assert_eq!(screen.stage, Stage::PickPersona);
        // Esc at the first stage goes nowhere and emits nothing.
        press(&mut screen, KeyCode::Esc);
        assert_eq!(screen.stage, Stage::PickPersona);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn age_clamps_to_range() {
        let (mut screen, _rx) = make_screen();
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Enter);
        for _ in 0..30 {
            press(&mut screen, KeyCode::Right);
        }
        assert_eq!(screen.choice.age, AGE_MAX);
        for _ in 0..60 {
            press(&mut screen, KeyCode::Left);
        }
        assert_eq!(screen.choice.age, AGE_MIN);
    }

    #[test]
    fn renders_welcome_and_personas() {
        let (screen, _rx) = make_screen();
        let area = Rect::new(0, 0, 80, 20);
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
        assert!(lines.iter().any(|l| l.contains("Welcome!")));
        assert!(lines.iter().any(|l| l.contains("Community")));
        assert!(lines.iter().any(|l| l.contains("Education")));
    }
}
