use std::time::Duration;

use protocol::PredictionRequest;
use tracing::{info, warn};

use crate::client::PredictionBackend;
use crate::format::{format_prediction, SERVER_UNREACHABLE};
use crate::suggestions::render_suggestions;
use crate::transcript::{Transcript, TranscriptAction};

/// A url accepted by [`ChatSession::begin_submit`] and waiting for its reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingSubmission {
    pub(crate) url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BotReply {
    pub(crate) content: String,
    pub(crate) suggestions: Vec<String>,
}

pub(crate) struct ChatSession {
    transcript: Transcript,
    in_flight: bool,
    analyzing_delay: Option<Duration>,
}

impl ChatSession {
    /// `analyzing_delay` enables the simulated "analyzing" placeholder.
    pub(crate) fn new(analyzing_delay: Option<Duration>) -> Self {
        Self {
            transcript: Transcript::with_welcome(),
            in_flight: false,
            analyzing_delay,
        }
    }

    pub(crate) fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn analyzing_delay(&self) -> Duration {
        self.analyzing_delay.unwrap_or(Duration::ZERO)
    }

    /// Records the user turn and clears `input`.
    ///
    /// Returns `None` without touching anything when the trimmed input is
    /// empty or another request is still in flight.
    pub(crate) fn begin_submit(&mut self, input: &mut String) -> Option<PendingSubmission> {
        let url = input.trim().to_string();
        if url.is_empty() || self.in_flight {
            return None;
        }
        input.clear();
        self.transcript.apply(TranscriptAction::User(url.clone()));
        if self.analyzing_delay.is_some() {
            self.transcript.apply(TranscriptAction::ShowPlaceholder);
        }
        self.in_flight = true;
        info!(url = %url, "prediction submitted");
        Some(PendingSubmission { url })
    }

    pub(crate) fn complete(&mut self, reply: BotReply) {
        self.transcript.apply(TranscriptAction::ReplacePlaceholder {
            content: reply.content,
            suggestions: Some(reply.suggestions),
        });
        self.in_flight = false;
    }

    /// Runs one full submit cycle. Returns `false` when the input was ignored.
    pub(crate) async fn submit(
        &mut self,
        input: &mut String,
        backend: &dyn PredictionBackend,
    ) -> bool {
        let Some(pending) = self.begin_submit(input) else {
            return false;
        };
        let reply = resolve_reply(backend, &pending, self.analyzing_delay()).await;
        self.complete(reply);
        true
    }
}

/// Calls the backend and turns any outcome into a bot reply.
///
/// The reply is held back for at least `min_delay`.
pub(crate) async fn resolve_reply(
    backend: &dyn PredictionBackend,
    pending: &PendingSubmission,
    min_delay: Duration,
) -> BotReply {
    let request = PredictionRequest::new(pending.url.clone());
    let (result, _) = tokio::join!(backend.predict(&request), tokio::time::sleep(min_delay));
    let content = match result {
        Ok(response) => {
            info!(
                url = %pending.url,
                verdict = response.verdict.as_deref().unwrap_or(""),
                probability = response.probability,
                error = response.error.as_deref(),
                "prediction received"
            );
            format_prediction(&pending.url, &response)
        }
        Err(err) => {
            warn!(url = %pending.url, error = %err, "prediction failed");
            SERVER_UNREACHABLE.to_string()
        }
    };
    BotReply {
        content,
        suggestions: render_suggestions(&pending.url),
    }
}
