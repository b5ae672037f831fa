use anyhow::Context;
use regex::Regex;

const DOMAIN_SUGGESTIONS: [&str; 3] = [
    "📈 View domain reputation",
    "🔄 Run deeper analysis",
    "📋 Export threat report",
];

const STATUS_SUGGESTIONS: [&str; 3] = [
    "⚙️ Configure agent settings",
    "📊 View detailed metrics",
    "🔔 Set up alerts",
];

const DEFAULT_SUGGESTIONS: [&str; 3] = [
    "🛡️ Analyze new domain",
    "📊 System health check",
    "🎯 Threat landscape",
];

// Glyphs used as suggestion icons, plus the emoji variation selector.
const ICON_PATTERN: &str =
    r"[\x{1F6E1}\x{1F4CA}\x{26A1}\x{1F3AF}\x{1F4C8}\x{1F504}\x{1F4CB}\x{2699}\x{1F514}\x{FE0F}]";

/// Quick replies offered after a bot turn, keyed on the user's input.
pub(crate) fn render_suggestions(input: &str) -> Vec<String> {
    let input = input.to_lowercase();
    let picked = if input.contains("domain") {
        &DOMAIN_SUGGESTIONS
    } else if input.contains("status") {
        &STATUS_SUGGESTIONS
    } else {
        &DEFAULT_SUGGESTIONS
    };
    picked.iter().map(|item| item.to_string()).collect()
}

pub(crate) struct SuggestionInput {
    icons: Regex,
}

impl SuggestionInput {
    pub(crate) fn new() -> anyhow::Result<Self> {
        let icons = Regex::new(ICON_PATTERN).context("invalid suggestion icon pattern")?;
        Ok(Self { icons })
    }

    /// Text placed in the input box when a suggestion is picked.
    pub(crate) fn to_input(&self, suggestion: &str) -> String {
        self.icons.replace_all(suggestion, "").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_keyword_selects_domain_set() {
        assert_eq!(
            render_suggestions("check this domain"),
            vec![
                "📈 View domain reputation".to_string(),
                "🔄 Run deeper analysis".to_string(),
                "📋 Export threat report".to_string(),
            ]
        );
    }

    #[test]
    fn status_keyword_selects_status_set() {
        assert_eq!(
            render_suggestions("server status"),
            vec![
                "⚙️ Configure agent settings".to_string(),
                "📊 View detailed metrics".to_string(),
                "🔔 Set up alerts".to_string(),
            ]
        );
    }

    #[test]
    fn other_input_selects_default_set() {
        assert_eq!(
            render_suggestions("http://paypal-login.tk"),
            vec![
                "🛡️ Analyze new domain".to_string(),
                "📊 System health check".to_string(),
                "🎯 Threat landscape".to_string(),
            ]
        );
    }

    #[test]
    fn keyword_match_ignores_case_and_prefers_domain() {
        assert_eq!(render_suggestions("DOMAIN STATUS")[0], "📈 View domain reputation");
        assert_eq!(render_suggestions("Status?")[0], "⚙️ Configure agent settings");
    }

    #[test]
    fn picked_suggestion_loses_its_icon() {
        let input = SuggestionInput::new().unwrap();
        assert_eq!(input.to_input("📈 View domain reputation"), "View domain reputation");
        assert_eq!(input.to_input("⚙️ Configure agent settings"), "Configure agent settings");
        assert_eq!(input.to_input("🛡️ Analyze new domain"), "Analyze new domain");
        assert_eq!(input.to_input("⚡ Real-time monitoring status"), "Real-time monitoring status");
        assert_eq!(input.to_input("plain text"), "plain text");
    }
}
