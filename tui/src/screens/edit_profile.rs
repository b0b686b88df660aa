use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use questline_flow::FlowEvent;
use questline_flow::profile::Achievement;
use questline_flow::profile::Profile;
use questline_flow::profile::ProfileField;
use questline_flow::profile::achievements;
use questline_flow::profile::all_profile_fields;
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
use crate::selection_menu::ScrollState;
use crate::styles;
use crate::text_field::TextField;

/// Profile editor with per-field inline editing, the achievements grid,
/// and the logout confirmation dialog. Edits go straight into the session
/// profile on commit; "Save Changes" just returns to the dashboard.
pub(crate) struct EditProfileScreen {
    app_event_tx: AppEventSender,
    profile: Profile,
    fields: Vec<ProfileField>,
    list: ScrollState,
    editor: Option<TextField>,
    achievements: Vec<Achievement>,
    /// When open, holds whether the Logout button is the highlighted one.
    confirm_logout: Option<bool>,
    saved_notice: Option<&'static str>,
}

impl EditProfileScreen {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        let fields = all_profile_fields();
        let mut list = ScrollState::new();
        list.clamp_selection(fields.len());
        Self {
            app_event_tx,
            profile: Profile::default(),
            fields,
            list,
            editor: None,
            achievements: achievements(),
            confirm_logout: None,
            saved_notice: None,
        }
    }

    fn selected_field(&self) -> Option<ProfileField> {
        let idx = self.list.selected_idx?;
        self.fields.get(idx).copied()
    }

    fn begin_edit(&mut self) {
        let Some(field) = self.selected_field() else {
            return;
        };
        self.saved_notice = None;
        let mut editor = TextField::new();
        if field.is_secret() {
            editor = editor.masked().with_placeholder("New password");
        } else {
            editor.set_text(self.profile.get(field));
        }
        self.editor = Some(editor);
    }

    fn commit_edit(&mut self) {
        let Some(field) = self.selected_field() else {
            return;
        };
        let Some(editor) = self.editor.take() else {
            return;
        };
        let value = editor.text().to_string();
        // An empty password commit keeps the current one.
        if field.is_secret() && value.is_empty() {
            return;
        }
        self.profile.set(field, value);
        self.saved_notice = Some("Profile updated successfully");
    }

    fn toggle_editor_mask(&mut self) {
        let secret = self.selected_field().is_some_and(ProfileField::is_secret);
        if !secret {
            return;
        }
        if let Some(editor) = self.editor.as_mut() {
            let masked = editor.is_masked();
            editor.set_masked(!masked);
        }
    }
}

impl KeyboardHandler for EditProfileScreen {
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let Some(logout_focused) = self.confirm_logout {
            match key_event.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    self.confirm_logout = Some(!logout_focused);
                }
                KeyCode::Enter => {
                    self.confirm_logout = None;
                    if logout_focused {
                        self.app_event_tx.send(AppEvent::Flow(FlowEvent::Logout));
                    }
                }
                KeyCode::Esc => self.confirm_logout = None,
                _ => {}
            }
            return;
        }
        if self.editor.is_some() {
            match key_event.code {
                KeyCode::Enter => self.commit_edit(),
                KeyCode::Esc => self.editor = None,
                KeyCode::Tab => self.toggle_editor_mask(),
                _ => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.handle_key_event(key_event);
                    }
                }
            }
            return;
        }
        match key_event.code {
            KeyCode::Up | KeyCode::BackTab => self.list.move_up_wrap(self.fields.len()),
            KeyCode::Down | KeyCode::Tab => self.list.move_down_wrap(self.fields.len()),
            KeyCode::Enter => self.begin_edit(),
            KeyCode::Char('q') => self.confirm_logout = Some(false),
            KeyCode::Char('s') | KeyCode::Esc => {
                self.app_event_tx.send(AppEvent::Flow(FlowEvent::Back));
            }
            _ => {}
        }
    }
}

impl WidgetRef for EditProfileScreen {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + 2;
        let mut y = area.y + 1;
        put_line(buf, area, x, y, &Line::styled("Edit Profile", styles::title()));
        y += 2;

        put_line(
            buf,
            area,
            x,
            y,
            &Line::from(vec![
                Span::styled(format!("[{}]", self.profile.initials()), styles::selected()),
                Span::raw(" "),
                Span::styled(self.profile.name.clone(), styles::title()),
                Span::raw("  "),
                Span::styled(self.profile.unit_id.clone(), styles::dim()),
            ]),
        );
        y += 1;

        let stats = &self.profile.stats;
        put_line(
            buf,
            area,
            x,
            y,
            &Line::from(format!(
                "⭐ {} Points   🏆 {} Badges   💎 {} Gems",
                thousands(stats.points),
                thousands(stats.badges),
                thousands(stats.gems)
            )),
        );
        y += 1;

        if let Some(notice) = self.saved_notice {
            put_line(buf, area, x, y, &Line::styled(notice, styles::success()));
        }
        y += 2;

        put_line(
            buf,
            area,
            x,
            y,
            &Line::styled("Personal Information", styles::title()),
        );
        y += 1;
        for (i, field) in self.fields.iter().enumerate() {
            let selected = self.list.selected_idx == Some(i);
            let caret = if selected { "> " } else { "  " };
            let value = if field.is_secret() {
                Profile::masked_password().to_string()
            } else {
                self.profile.get(*field).to_string()
            };
            let label_style = if selected {
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
                    Span::raw(caret),
                    Span::raw(format!("{} ", field.icon())),
                    Span::styled(format!("{:<16}", field.label()), label_style),
                    Span::raw(value),
                ]),
            );
            y += 1;
            if selected
                && let Some(editor) = &self.editor
                && y < area.y + area.height
            {
                let width = 40u16.min((area.x + area.width).saturating_sub(x + 4));
                editor.render(Rect::new(x + 4, y, width, 1), buf, true);
                y += 1;
            }
        }
        y += 1;

        put_line(buf, area, x, y, &Line::styled("Achievements", styles::title()));
        y += 1;
        for chunk in self.achievements.chunks(3) {
            let mut spans: Vec<Span> = vec![Span::raw("  ")];
            for achievement in chunk {
                let cell = format!("{} {:<18}", achievement.icon, achievement.name);
                if achievement.earned {
                    spans.push(Span::raw(cell));
                } else {
                    spans.push(Span::styled(cell, styles::dim()));
                }
            }
            put_line(buf, area, x, y, &Line::from(spans));
            y += 1;
        }
        y += 1;

        if let Some(logout_focused) = self.confirm_logout {
            put_line(
                buf,
                area,
                x,
                y,
                &Line::styled("Are you sure you want to log out?", styles::title()),
            );
            y += 1;
            put_line(
                buf,
                area,
                x,
                y,
                &Line::styled(
                    "You will be logged out of your account and redirected to the login page.",
                    styles::dim(),
                ),
            );
            y += 1;
            let cancel_style = if logout_focused {
                Style::default()
            } else {
                styles::selected()
            };
            let logout_style = if logout_focused {
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
                    Span::styled("[ Cancel ]", cancel_style),
                    Span::raw("   "),
                    Span::styled("[ Logout ]", logout_style),
                ]),
            );
            y += 1;
        } else {
            put_line(
                buf,
                area,
                x,
                y,
                &Line::from(vec![
                    Span::styled("[ Save Changes ]", styles::selected()),
                    Span::raw("   "),
                    Span::raw("[ Logout ]"),
                ]),
            );
            y += 1;
        }

        let footer_y = area.y + area.height.saturating_sub(1);
        if footer_y > y {
            let hints = if self.confirm_logout.is_some() {
                styles::key_hint_line(&[
                    ("←/→", "choose"),
                    ("Enter", "confirm"),
                    ("Esc", "cancel"),
                ])
            } else if self.editor.is_some() {
                styles::key_hint_line(&[
                    ("Enter", "save"),
                    ("Esc", "cancel"),
                    ("Tab", "show/hide"),
                ])
            } else {
                styles::key_hint_line(&[
                    ("↑/↓", "field"),
                    ("Enter", "edit"),
                    ("s", "save & back"),
                    ("q", "log out"),
                ])
            };
            put_line(buf, area, x, footer_y, &hints);
        }
    }
}

/// 2450 renders as "2,450", matching the profile card.
fn thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
