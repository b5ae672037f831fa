use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod endpoint;

pub use endpoint::{join_base_path, PREDICT_PATH};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionRequest {
    pub url: String,
}

impl PredictionRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Body returned by the prediction backend.
///
/// Every field is optional on the wire: the backend omits `url` on success,
/// sends only `error` on failure, and a misbehaving backend may send anything.
/// A field of the wrong type decodes as absent instead of failing the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub verdict: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub probability: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_reasons",
        skip_serializing_if = "Option::is_none"
    )]
    pub reasons: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// Keeps the string entries of a list, dropping anything else.
fn lenient_reasons<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let reasons = match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(reason) => Some(reason),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    };
    Ok(reasons)
}

impl PredictionResponse {
    pub fn verdict(url: &str, verdict: &str, probability: f64, reasons: Vec<String>) -> Self {
        Self {
            url: Some(url.to_string()),
            verdict: Some(verdict.to_string()),
            probability: Some(probability),
            reasons: Some(reasons),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn reasons(&self) -> &[String] {
        self.reasons.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_single_url_field() {
        let json = serde_json::to_value(PredictionRequest::new("http://example.com")).expect("json");
        assert_eq!(json, serde_json::json!({ "url": "http://example.com" }));
    }

    #[test]
    fn response_without_url_decodes() {
        let body = r#"{"verdict":"PHISHING","probability":0.87,"reasons":["Does not use HTTPS"]}"#;
        let decoded: PredictionResponse = serde_json::from_str(body).expect("deserialize");
        assert_eq!(decoded.url, None);
        assert_eq!(decoded.verdict.as_deref(), Some("PHISHING"));
        assert_eq!(decoded.probability, Some(0.87));
        assert_eq!(decoded.reasons(), ["Does not use HTTPS".to_string()]);
        assert_eq!(decoded.error, None);
    }

    #[test]
    fn error_only_response_decodes() {
        let decoded: PredictionResponse =
            serde_json::from_str(r#"{"error":"No URL provided"}"#).expect("deserialize");
        assert_eq!(decoded, PredictionResponse::failed("No URL provided"));
        assert!(decoded.reasons().is_empty());
    }

    #[test]
    fn wrongly_typed_fields_decode_as_absent() {
        let body = r#"{"verdict":"phishing","probability":"0.92","reasons":["Suspicious TLD"]}"#;
        let decoded: PredictionResponse = serde_json::from_str(body).expect("deserialize");
        assert_eq!(decoded.verdict.as_deref(), Some("phishing"));
        assert_eq!(decoded.probability, None);
        assert_eq!(decoded.reasons(), ["Suspicious TLD".to_string()]);

        let body = r#"{"verdict":7,"probability":0.4,"reasons":"none","error":null}"#;
        let decoded: PredictionResponse = serde_json::from_str(body).expect("deserialize");
        assert_eq!(decoded.verdict, None);
        assert_eq!(decoded.probability, Some(0.4));
        assert_eq!(decoded.reasons, None);
        assert_eq!(decoded.error, None);
    }

    #[test]
    fn non_string_reasons_are_skipped() {
        let body = r#"{"verdict":"safe","reasons":["Uses HTTPS",3,null,"Known domain"]}"#;
        let decoded: PredictionResponse = serde_json::from_str(body).expect("deserialize");
        assert_eq!(
            decoded.reasons(),
            ["Uses HTTPS".to_string(), "Known domain".to_string()]
        );
    }

    #[test]
    fn non_object_body_still_fails() {
        assert!(serde_json::from_str::<PredictionResponse>("not json").is_err());
        assert!(serde_json::from_str::<PredictionResponse>(r#""verdict""#).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let decoded: PredictionResponse =
            serde_json::from_str(r#"{"verdict":"safe","model":"rf-v2"}"#).expect("deserialize");
        assert_eq!(decoded.verdict.as_deref(), Some("safe"));
        assert_eq!(decoded.probability, None);
    }
}
