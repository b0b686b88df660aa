use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use questline_flow::FlowEvent;
use questline_flow::Role;
use questline_flow::SessionContext;
use questline_flow::dashboard::Banner;
use questline_flow::dashboard::CarouselState;
use questline_flow::dashboard::ChallengeCard;
use questline_flow::dashboard::banner_slides;
use questline_flow::dashboard::sample_challenges;
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

const PROGRESS_BAR_WIDTH: usize = 20;

/// Authenticated home: the rotating promo banner on top, the
/// active-challenge rail below, and shortcuts out to the challenge wizard
/// and the profile editor.
pub(crate) struct DashboardScreen {
    app_event_tx: AppEventSender,
    email: String,
    role: Option<Role>,
    slides: Vec<Banner>,
    carousel: CarouselState,
    cards: Vec<ChallengeCard>,
}

impl DashboardScreen {
    pub(crate) fn new(app_event_tx: AppEventSender, ctx: &SessionContext) -> Self {
        let slides = banner_slides();
        let carousel = CarouselState::new(slides.len());
        Self {
            app_event_tx,
            email: ctx.email.clone(),
            role: ctx.role,
            slides,
            carousel,
            cards: sample_challenges(),
        }
    }

    /// Auto-advance driven by the ticker thread while this screen is up.
    pub(crate) fn on_carousel_tick(&mut self) {
        self.carousel.next();
    }

    fn dot_row(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for i in 0..self.carousel.len() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            if i == self.carousel.current() {
                spans.push(Span::styled("●", Style::default().fg(styles::LIGHT_BLUE)));
            } else {
                spans.push(Span::styled("○", styles::dim()));
            }
        }
        Line::from(spans)
    }
}

impl KeyboardHandler for DashboardScreen {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Left => self.carousel.prev(),
            KeyCode::Right => self.carousel.next(),
            KeyCode::Char('n') => {
                self.app_event_tx
                    .send(AppEvent::Flow(FlowEvent::CreateChallengeRequested));
            }
            KeyCode::Char('p') => {
                self.app_event_tx
                    .send(AppEvent::Flow(FlowEvent::EditProfileRequested));
            }
            KeyCode::Char('q') => {
                self.app_event_tx.send(AppEvent::Flow(FlowEvent::Logout));
            }
            KeyCode::Char(c) => {
                if let Some(digit) = c.to_digit(10)
                    && digit >= 1
                {
                    self.carousel.go_to((digit - 1) as usize);
                }
            }
            _ => {}
        }
    }
}

impl WidgetRef for DashboardScreen {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;

        let mut header: Vec<Span> = vec![Span::styled("Questline", styles::title())];
        if let Some(role) = self.role {
            header.push(Span::raw("  "));
            header.push(Span::raw(format!("{} {}", role.icon(), role.title())));
        }
        if !self.email.is_empty() {
            header.push(Span::raw("  "));
            header.push(Span::styled(self.email.clone(), styles::dim()));
        }
        put_line(buf, area, x, y, &Line::from(header));
        y += 2;

        if let Some(slide) = self.slides.get(self.carousel.current()) {
            put_line(
                buf,
                area,
                x,
                y,
                &Line::styled(slide.title, styles::selected()),
            );
            y += 1;
            put_line(buf, area, x, y, &Line::styled(slide.subtitle, styles::dim()));
            y += 1;
            put_line(buf, area, x, y, &self.dot_row());
            y += 2;
        }

        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("Active Challenges", styles::title()),
        );
        y += 2;

        for card in &self.cards {
            let filled = usize::from(card.progress) * PROGRESS_BAR_WIDTH / 100;
            let bar = format!(
                "[{}{}] {:>3}%",
                "█".repeat(filled),
                "░".repeat(PROGRESS_BAR_WIDTH - filled),
                card.progress
            );

            put_line(
                buf,
                area,
                x,
                y,
                &Line::from(vec![
                    Span::raw(format!("{} ", card.icon)),
                    Span::styled(card.title, styles::title()),
                    Span::raw(format!("  ⭐ {} pts", card.points)),
                ]),
            );
            y += 1;
            put_line(buf, area, x, y, &Line::from(bar));
            y += 1;

            let mut meta: Vec<Span> = vec![Span::styled(
                format!("{} {}", card.role.icon(), card.role.label()),
                styles::dim(),
            )];
            if let Some(status) = card.status {
                meta.push(Span::raw("  "));
                meta.push(Span::styled(status, styles::dim()));
            }
            if let Some(participants) = card.participants {
                meta.push(Span::raw("  "));
                meta.push(Span::styled(
                    format!("{participants} participants"),
                    styles::dim(),
                ));
            }
            put_line(buf, area, x, y, &Line::from(meta));
            y += 2;
        }

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y {
            put_line(
                buf,
                area,
                x,
                footer_y,
                &styles::key_hint_line(&[
                    ("←/→", "banner"),
                    ("1-4", "jump"),
                    ("n", "new challenge"),
                    ("p", "profile"),
                    ("q", "log out"),
                ]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    fn make_screen() -> (DashboardScreen, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();
        let ctx = SessionContext {
            email: "jane@test.dev".to_string(),
            otp_purpose: None,
            role: Some(Role::Commander),
        };
        (DashboardScreen::new(AppEventSender::new(tx), &ctx), rx)
    }

    fn press(screen: &mut DashboardScreen, code: KeyCode) {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrows_and_digits_steer_the_banner() {
        let (mut screen, _rx) = make_screen();
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.carousel.current(), 1);
        press(&mut screen, KeyCode::Left);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.carousel.current(), 3);
        press(&mut screen, KeyCode::Char('3'));
        assert_eq!(screen.carousel.current(), 2);
        // Out-of-range dots are ignored.
        press(&mut screen, KeyCode::Char('9'));
        assert_eq!(screen.carousel.current(), 2);
    }

    #[test]
    fn tick_advances_and_wraps_the_banner() {
        let (mut screen, _rx) = make_screen();
        for expected in [1, 2, 3, 0] {
            screen.on_carousel_tick();
            assert_eq!(screen.carousel.current(), expected);
        }
    }

    #[test]
    fn shortcuts_emit_navigation_events() {
        let (mut screen, mut rx) = make_screen();
        press(&mut screen, KeyCode::Char('n'));
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::Flow(FlowEvent::CreateChallengeRequested))
        );
        press(&mut screen, KeyCode::Char('p'));
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::Flow(FlowEvent::EditProfileRequested))
        );
        press(&mut screen, KeyCode::Char('q'));
        assert_eq!(rx.try_recv().ok(), Some(AppEvent::Flow(FlowEvent::Logout)));
    }

    #[test]
    fn renders_header_banner_and_challenge_rail() {
        let (screen, _rx) = make_screen();
        let area = Rect::new(0, 0, 90, 30);
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
        assert!(lines.iter().any(|l| l.contains("Questline")));
        assert!(lines.iter().any(|l| l.contains("jane@test.dev")));
        assert!(lines.iter().any(|l| l.contains("Join Our Community")));
        assert!(lines.iter().any(|l| l.contains("Active Challenges")));
        assert!(lines.iter().any(|l| l.contains("Morning Run Streak")));
        assert!(lines.iter().any(|l| l.contains("72%")));
        assert!(lines.iter().any(|l| l.contains("Team Leader")));
    }
}
