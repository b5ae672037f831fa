use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;
use crate::session::ChatSession;
use crate::suggestions::SuggestionInput;

pub(crate) struct AppState {
    pub(crate) session: ChatSession,
    pub(crate) input: String,
    pub(crate) endpoint: String,
    pub(crate) suggestion_selected: usize,
    pub(crate) voice: Option<CancellationToken>,
    pub(crate) confirm_quit: bool,
    pub(crate) scroll_back: usize,
    pub(crate) max_scroll: usize,
    pub(crate) view_height: u16,
    suggestion_input: SuggestionInput,
}

impl AppState {
    pub(crate) fn new(
        session: ChatSession,
        endpoint: String,
        suggestion_input: SuggestionInput,
    ) -> Self {
        Self {
            session,
            input: String::new(),
            endpoint,
            suggestion_selected: 0,
            voice: None,
            confirm_quit: false,
            scroll_back: 0,
            max_scroll: 0,
            view_height: 0,
            suggestion_input,
        }
    }

    pub(crate) fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Reply(reply) => {
                self.session.complete(reply);
                self.suggestion_selected = 0;
                self.scroll_back = 0;
            }
            UiEvent::VoiceTranscribed(text) => {
                if self.voice.take().is_some() {
                    self.input = text;
                }
            }
        }
    }

    pub(crate) fn suggestions(&self) -> &[String] {
        self.session.transcript().latest_suggestions()
    }

    pub(crate) fn select_next_suggestion(&mut self) {
        let count = self.suggestions().len();
        if count == 0 {
            return;
        }
        self.suggestion_selected = (self.suggestion_selected + 1) % count;
    }

    pub(crate) fn select_prev_suggestion(&mut self) {
        let count = self.suggestions().len();
        if count == 0 {
            return;
        }
        self.suggestion_selected = if self.suggestion_selected == 0 {
            count - 1
        } else {
            self.suggestion_selected - 1
        };
    }

    pub(crate) fn apply_selected_suggestion(&mut self) {
        let Some(suggestion) = self.suggestions().get(self.suggestion_selected) else {
            return;
        };
        let input = self.suggestion_input.to_input(suggestion);
        self.input = input;
    }

    pub(crate) fn voice_active(&self) -> bool {
        self.voice.is_some()
    }

    pub(crate) fn start_voice(&mut self, cancel: CancellationToken) {
        if let Some(previous) = self.voice.replace(cancel) {
            previous.cancel();
        }
    }

    pub(crate) fn stop_voice(&mut self) {
        if let Some(cancel) = self.voice.take() {
            cancel.cancel();
        }
    }

    pub(crate) fn set_transcript_metrics(&mut self, total_lines: usize, view_height: u16) {
        self.view_height = view_height;
        self.max_scroll = total_lines.saturating_sub(view_height as usize);
        if self.scroll_back > self.max_scroll {
            self.scroll_back = self.max_scroll;
        }
    }

    /// Top line of the transcript viewport; `scroll_back` counts from the bottom.
    ///
    /// Saturates at `u16::MAX`, the furthest a ratatui paragraph can scroll.
    pub(crate) fn scroll_offset(&self) -> u16 {
        let offset = self.max_scroll.saturating_sub(self.scroll_back);
        offset.min(u16::MAX as usize) as u16
    }

    pub(crate) fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = (self.scroll_back + lines).min(self.max_scroll);
    }

    pub(crate) fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub(crate) fn page_size(&self) -> usize {
        let height = self.view_height.max(1) as usize;
        height.saturating_sub(1).max(1)
    }
}

#[cfg(test)]
pub(crate) fn test_app(analyzing_delay: Option<std::time::Duration>) -> AppState {
    AppState::new(
        ChatSession::new(analyzing_delay),
        "http://127.0.0.1:5000/predict".to_string(),
        SuggestionInput::new().unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BotReply;

    #[test]
    fn reply_event_completes_submission() {
        let mut app = test_app(None);
        app.input = "server status".to_string();
        app.session.begin_submit(&mut app.input).unwrap();
        app.suggestion_selected = 2;

        app.handle_event(UiEvent::Reply(BotReply {
            content: "Verdict: safe".to_string(),
            suggestions: crate::suggestions::render_suggestions("server status"),
        }));

        assert!(!app.session.in_flight());
        assert_eq!(app.suggestion_selected, 0);
        assert_eq!(app.suggestions()[0], "⚙️ Configure agent settings");
    }

    #[test]
    fn suggestion_selection_wraps() {
        let mut app = test_app(None);
        app.select_prev_suggestion();
        assert_eq!(app.suggestion_selected, 2);
        app.select_next_suggestion();
        assert_eq!(app.suggestion_selected, 0);
    }

    #[test]
    fn picking_suggestion_fills_input_without_icon() {
        let mut app = test_app(None);
        app.select_next_suggestion();
        app.apply_selected_suggestion();
        assert_eq!(app.input, "View threat intelligence");
    }

    #[test]
    fn voice_text_ignored_after_stop() {
        let mut app = test_app(None);
        let cancel = CancellationToken::new();
        app.start_voice(cancel.clone());
        assert!(app.voice_active());

        app.stop_voice();
        assert!(cancel.is_cancelled());
        app.handle_event(UiEvent::VoiceTranscribed("late text".to_string()));
        assert!(app.input.is_empty());
    }

    #[test]
    fn voice_text_fills_input_and_hides_overlay() {
        let mut app = test_app(None);
        app.start_voice(CancellationToken::new());
        app.handle_event(UiEvent::VoiceTranscribed(
            "Check suspicious domain amazon-security-update.com".to_string(),
        ));
        assert!(!app.voice_active());
        assert_eq!(app.input, "Check suspicious domain amazon-security-update.com");
    }

    #[test]
    fn scroll_is_bounded() {
        let mut app = test_app(None);
        app.set_transcript_metrics(30, 10);
        assert_eq!(app.scroll_offset(), 20);
        app.scroll_up(100);
        assert_eq!(app.scroll_offset(), 0);
        app.scroll_down(5);
        assert_eq!(app.scroll_offset(), 5);
        app.set_transcript_metrics(8, 10);
        assert_eq!(app.scroll_offset(), 0);
    }

    #[test]
    fn huge_transcript_offset_saturates() {
        let mut app = test_app(None);
        app.set_transcript_metrics(100_000, 10);
        assert_eq!(app.scroll_offset(), u16::MAX);
        app.scroll_up(99_990 - u16::MAX as usize);
        assert_eq!(app.scroll_offset(), u16::MAX);
        app.scroll_up(1);
        assert_eq!(app.scroll_offset(), u16::MAX - 1);
    }
}
