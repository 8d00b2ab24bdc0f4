use crate::sim::error::ClientError;
use crate::sim::params::SimulationParams;
use crate::sim::record::{decode_records, ResultRecord};
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/simulate";

const MAX_TEXT_DETAIL_CHARS: usize = 200;

/// Thin wrapper around the `/simulate` endpoint.
#[derive(Debug, Clone)]
pub struct SimulationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for SimulationClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl SimulationClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts the parameters and decodes the returned records.
    pub async fn run(&self, params: &SimulationParams) -> Result<Vec<ResultRecord>, ClientError> {
        tracing::debug!(endpoint = %self.endpoint, ?params, "sending simulation request");
        let response = self.http.post(&self.endpoint).json(params).send().await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "simulation response received");

        if !status.is_success() {
            let detail = match response.text().await {
                Ok(body) => error_detail(&body),
                Err(err) => {
                    tracing::warn!(error = %err, "could not read error response body");
                    None
                }
            };
            tracing::error!(status = status.as_u16(), ?detail, "simulation endpoint returned an error");
            return Err(ClientError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        let records = decode_records(&body)?;
        tracing::info!(count = records.len(), "simulation results received");
        Ok(records)
    }
}

/// Extracts a human-readable detail from a non-2xx body.
///
/// Structured `{"error": "..."}` wins, then any other JSON (compact), then
/// raw text cut at 200 characters. Blank bodies yield nothing.
pub fn error_detail(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(error) = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|error| !error.is_empty())
        {
            return Some(error.to_string());
        }
        return Some(value.to_string());
    }

    Some(body.chars().take(MAX_TEXT_DETAIL_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_field_is_preferred() {
        assert_eq!(
            error_detail(r#"{"error":"propagation model timeout"}"#).as_deref(),
            Some("propagation model timeout")
        );
    }

    #[test]
    fn other_json_is_compacted() {
        assert_eq!(
            error_detail("{ \"code\" : 7 }").as_deref(),
            Some(r#"{"code":7}"#)
        );
        assert_eq!(
            error_detail(r#"{"error":""}"#).as_deref(),
            Some(r#"{"error":""}"#)
        );
    }

    #[test]
    fn plain_text_is_truncated() {
        let long = "x".repeat(250);
        let detail = error_detail(&long).unwrap();
        assert_eq!(detail.chars().count(), 200);
        assert_eq!(
            error_detail("<html>Bad Gateway</html>").as_deref(),
            Some("<html>Bad Gateway</html>")
        );
    }

    #[test]
    fn blank_body_has_no_detail() {
        assert_eq!(error_detail(""), None);
        assert_eq!(error_detail("  \n"), None);
    }

    #[test]
    fn default_endpoint() {
        assert_eq!(SimulationClient::default().endpoint(), DEFAULT_ENDPOINT);
    }
}
