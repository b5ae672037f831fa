use ratatui::style::{Color, Modifier, Style};

use crate::transcript::Role;

pub(crate) struct Theme {
    border: Color,
    title: Color,
    text: Color,
    dim: Color,
    accent: Color,
    user: Color,
    bot: Color,
    highlight_fg: Color,
    highlight_bg: Color,
    warn: Color,
    error: Color,
}

impl Theme {
    pub(crate) fn dark() -> Self {
        Self {
            border: Color::DarkGray,
            title: Color::Blue,
            text: Color::White,
            dim: Color::Gray,
            accent: Color::Cyan,
            user: Color::LightBlue,
            bot: Color::Green,
            highlight_fg: Color::White,
            highlight_bg: Color::DarkGray,
            warn: Color::Yellow,
            error: Color::Red,
        }
    }

    pub(crate) fn block<'a>(&self, title: &'a str) -> ratatui::widgets::Block<'a> {
        ratatui::widgets::Block::default()
            .title(ratatui::text::Span::styled(
                title,
                Style::default()
                    .fg(self.title)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(ratatui::widgets::Borders::ALL)
            .border_style(Style::default().fg(self.border))
    }

    pub(crate) fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub(crate) fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub(crate) fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn warn_style(&self) -> Style {
        Style::default().fg(self.warn).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn role_style(&self, role: Role) -> Style {
        let color = match role {
            Role::User => self.user,
            Role::Bot => self.bot,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Colors a message body line; error replies and verdict lines stand out.
    pub(crate) fn content_style(&self, line: &str) -> Style {
        if line.starts_with("Error:") {
            return Style::default().fg(self.error).add_modifier(Modifier::BOLD);
        }
        if let Some(verdict) = line.strip_prefix("Verdict: ") {
            let verdict = verdict.to_lowercase();
            if verdict.contains("phishing") {
                return Style::default().fg(self.error).add_modifier(Modifier::BOLD);
            }
            if verdict.contains("legitimate") || verdict.contains("safe") {
                return Style::default().fg(self.bot).add_modifier(Modifier::BOLD);
            }
            return self.warn_style();
        }
        self.text_style()
    }
}
