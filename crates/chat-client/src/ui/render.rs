use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use super::app::AppState;
use super::text::{
    display_width, sanitize_text_for_tui, tail_within_width, truncate_with_ellipsis,
    wrap_text_lines,
};
use super::theme::Theme;

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, app, &theme, chunks[0]);
    draw_transcript(frame, app, &theme, chunks[1]);
    draw_suggestions(frame, app, &theme, chunks[2]);
    draw_input(frame, app, &theme, chunks[3]);
    draw_footer(frame, app, &theme, chunks[4]);

    if app.voice_active() {
        draw_voice_overlay(frame, &theme);
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let status = if app.session.in_flight() {
        Span::styled("analyzing", theme.warn_style())
    } else {
        Span::styled("ready", theme.accent_style())
    };
    let width = area.width.saturating_sub(24) as usize;
    let header = Paragraph::new(Line::from(vec![
        Span::styled("Backend: ", theme.dim_style()),
        Span::styled(
            truncate_with_ellipsis(&app.endpoint, width),
            theme.text_style(),
        ),
        Span::styled("  Status: ", theme.dim_style()),
        status,
    ]))
    .block(theme.block("PhishGuard AI"));
    frame.render_widget(header, area);
}

fn draw_transcript(frame: &mut ratatui::Frame, app: &mut AppState, theme: &Theme, area: Rect) {
    let block = theme.block("Chat");
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for message in app.session.transcript().messages() {
        lines.push(Line::styled(
            format!("{}:", message.role.label()),
            theme.role_style(message.role),
        ));
        let content = sanitize_text_for_tui(&message.content);
        for raw in content.split('\n') {
            let style = theme.content_style(raw);
            for wrapped in wrap_text_lines(raw, width.saturating_sub(2)) {
                lines.push(Line::styled(format!("  {wrapped}"), style));
            }
        }
        lines.push(Line::default());
    }

    app.set_transcript_metrics(lines.len(), inner.height);
    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((app.scroll_offset(), 0));
    frame.render_widget(widget, area);
}

fn draw_suggestions(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let suggestions = app.suggestions();
    let line = if suggestions.is_empty() {
        Line::styled("no suggestions", theme.dim_style())
    } else {
        let mut spans = Vec::with_capacity(suggestions.len() * 2);
        for (index, suggestion) in suggestions.iter().enumerate() {
            let style = if index == app.suggestion_selected {
                theme.highlight_style()
            } else {
                theme.text_style()
            };
            spans.push(Span::styled(format!(" {suggestion} "), style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    };
    frame.render_widget(
        Paragraph::new(line).block(theme.block("Suggestions")),
        area,
    );
}

fn draw_input(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let title = if app.session.in_flight() {
        "URL (analyzing...)"
    } else {
        "URL"
    };
    let block = theme.block(title);
    let inner = block.inner(area);
    let shown = tail_within_width(&app.input, inner.width.saturating_sub(1) as usize);
    let style = if app.session.in_flight() {
        theme.dim_style()
    } else {
        theme.text_style()
    };
    frame.render_widget(Paragraph::new(shown).style(style).block(block), area);
    if !app.voice_active() {
        let x = inner.x.saturating_add(display_width(shown) as u16);
        frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

fn draw_footer(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let mut spans = vec![Span::styled(
        "Enter=send  Tab=next suggestion  Ctrl+S=use suggestion  Ctrl+V=voice  PgUp/PgDn=scroll  Esc=quit  ",
        theme.dim_style(),
    )];
    if app.confirm_quit {
        spans.push(Span::styled(
            "Press Esc again to quit, any other key to stay",
            theme.warn_style(),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(theme.block("Controls")),
        area,
    );
}

fn draw_voice_overlay(frame: &mut ratatui::Frame, theme: &Theme) {
    let area = centered_rect(frame.area(), 44, 5);
    let body = Paragraph::new(vec![
        Line::styled("Listening...", theme.accent_style()),
        Line::styled("Esc to stop", theme.dim_style()),
    ])
    .block(theme.block("Voice input"));
    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
