use std::time::Duration;

use async_trait::async_trait;
use protocol::{join_base_path, PredictionRequest, PredictionResponse, PREDICT_PATH};
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, warn};

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub(crate) enum PredictError {
    #[error("prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction response is not valid json: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub(crate) trait PredictionBackend: Send + Sync {
    async fn predict(&self, request: &PredictionRequest)
        -> Result<PredictionResponse, PredictError>;
}

pub(crate) struct HttpPredictionClient {
    client: Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()?;
        Self::with_client(base_url, client)
    }

    pub(crate) fn with_client(base_url: &str, client: Client) -> anyhow::Result<Self> {
        let endpoint = join_base_path(base_url, PREDICT_PATH).map_err(anyhow::Error::msg)?;
        Ok(Self { client, endpoint })
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionBackend for HttpPredictionClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(
                    endpoint = %self.endpoint,
                    timeout = err.is_timeout(),
                    connect = err.is_connect(),
                    "prediction request failed"
                );
                PredictError::Transport(err)
            })?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            body_len = body.len(),
            "prediction response received"
        );
        // Error statuses still carry a json body with an `error` field.
        let decoded = serde_json::from_str(&body)?;
        Ok(decoded)
    }
}
