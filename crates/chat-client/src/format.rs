use protocol::PredictionResponse;

pub(crate) const SERVER_UNREACHABLE: &str = "Error: Could not reach server.";
pub(crate) const REASON_MARKER: &str = "• ";

const UNKNOWN_VERDICT: &str = "unknown";
const UNKNOWN_PROBABILITY: &str = "n/a";

/// Bot message text for a decoded backend response.
///
/// `submitted` is shown when the backend does not echo the url back.
pub(crate) fn format_prediction(submitted: &str, response: &PredictionResponse) -> String {
    // An empty error string does not count as a failure.
    if let Some(error) = response.error.as_deref().filter(|error| !error.is_empty()) {
        return format!("Error: {error}");
    }

    let url = response
        .url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(submitted);
    let verdict = response
        .verdict
        .as_deref()
        .filter(|verdict| !verdict.trim().is_empty())
        .unwrap_or(UNKNOWN_VERDICT);
    let probability = response
        .probability
        .map(format_probability)
        .unwrap_or_else(|| UNKNOWN_PROBABILITY.to_string());

    let mut message = format!("🔍 URL: {url}\nVerdict: {verdict}\nProbability: {probability}");
    let reasons = response.reasons();
    if !reasons.is_empty() {
        message.push_str("\nReasons:");
        for reason in reasons {
            message.push('\n');
            message.push_str(REASON_MARKER);
            message.push_str(reason);
        }
    }
    message
}

fn format_probability(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        UNKNOWN_PROBABILITY.to_string()
    }
}
