//! HTTP client for the Alloy evaluations endpoint.

use crate::config::AlloyConfig;
use crate::onboarding::submission::EvaluationRequest;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use tracing::debug;

/// One-shot client for `POST {base_url}/evaluations/`.
///
/// The endpoint and credential are injected at construction; nothing here
/// reads process-wide state. No retries and no explicit timeout beyond the
/// transport default.
pub struct EvaluationsClient {
    http: reqwest::Client,
    base_url: String,
    auth_key: String,
}

/// The provider's reply, unmodified: status plus decoded JSON body. Whether a
/// non-success status is an error is the caller's call, not this layer's.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl EvaluationsClient {
    pub fn new(config: AlloyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_key: config.auth_key,
        }
    }

    pub async fn post_evaluation(
        &self,
        request: &EvaluationRequest,
    ) -> Result<ProviderResponse, reqwest::Error> {
        let url = format!("{}/evaluations/", self.base_url);

        debug!(url = %url, "posting evaluation to alloy");
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.auth_key.as_str())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.json().await?;
        Ok(ProviderResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = EvaluationsClient::new(AlloyConfig {
            base_url: "https://sandbox.alloy.co/v1/".to_string(),
            auth_key: String::new(),
        });
        assert_eq!(client.base_url, "https://sandbox.alloy.co/v1");
    }
}
