pub(crate) const WELCOME_MESSAGE: &str =
    "Welcome to PhishGuard AI! How can I assist you with phishing threat detection today?";
pub(crate) const ANALYZING_PLACEHOLDER: &str = "PhishGuard AI is analyzing...";

const WELCOME_SUGGESTIONS: [&str; 3] = [
    "🛡️ Analyze suspicious domain",
    "📊 View threat intelligence",
    "⚡ Real-time monitoring status",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    User,
    Bot,
}

impl Role {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "PhishGuard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ChatMessage {
    pub(crate) id: u64,
    pub(crate) role: Role,
    pub(crate) content: String,
    pub(crate) suggestions: Option<Vec<String>>,
}

/// Every change to the transcript goes through [`Transcript::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TranscriptAction {
    User(String),
    Bot {
        content: String,
        suggestions: Option<Vec<String>>,
    },
    ShowPlaceholder,
    /// Drops the placeholder, if any, then appends the bot reply.
    ReplacePlaceholder {
        content: String,
        suggestions: Option<Vec<String>>,
    },
}

/// Append-only list of chat messages for one session.
///
/// The only removal is the analyzing placeholder, which is always followed
/// by an append. Ids come from a counter so they stay unique after removal.
#[derive(Debug)]
pub(crate) struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
    placeholder: Option<u64>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
            placeholder: None,
        }
    }
}

impl Transcript {
    pub(crate) fn with_welcome() -> Self {
        let mut transcript = Self::default();
        transcript.apply(TranscriptAction::Bot {
            content: WELCOME_MESSAGE.to_string(),
            suggestions: Some(WELCOME_SUGGESTIONS.iter().map(|s| s.to_string()).collect()),
        });
        transcript
    }

    pub(crate) fn apply(&mut self, action: TranscriptAction) -> u64 {
        match action {
            TranscriptAction::User(content) => self.push(Role::User, content, None),
            TranscriptAction::Bot {
                content,
                suggestions,
            } => self.push(Role::Bot, content, suggestions),
            TranscriptAction::ShowPlaceholder => {
                if let Some(id) = self.placeholder {
                    return id;
                }
                let id = self.push(Role::Bot, ANALYZING_PLACEHOLDER.to_string(), None);
                self.placeholder = Some(id);
                id
            }
            TranscriptAction::ReplacePlaceholder {
                content,
                suggestions,
            } => {
                if let Some(id) = self.placeholder.take() {
                    self.messages.retain(|message| message.id != id);
                }
                self.push(Role::Bot, content, suggestions)
            }
        }
    }

    pub(crate) fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub(crate) fn len(&self) -> usize {
        self.messages.len()
    }

    pub(crate) fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Suggestions offered by the most recent bot turn.
    pub(crate) fn latest_suggestions(&self) -> &[String] {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::Bot && self.placeholder != Some(message.id))
            .and_then(|message| message.suggestions.as_deref())
            .unwrap_or(&[])
    }

    fn push(&mut self, role: Role, content: String, suggestions: Option<Vec<String>>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            content,
            suggestions,
        });
        id
    }
}
