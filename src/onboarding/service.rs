use crate::onboarding::alloy::EvaluationsClient;
use crate::onboarding::outcome::Outcome;
use crate::onboarding::submission::{ApplicantSubmission, ValidationError};
use tracing::info;

/// Failures past validation: the provider rejected the evaluation, the
/// network call itself failed, or a success reply was missing the summary.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Error calling Alloy API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error from Alloy API: {body}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
    #[error("Error retrieving summary/outcome from Alloy API.")]
    MissingSummary,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Orchestrates one applicant submission: validate and map the fields, post
/// the evaluation, extract `summary.outcome`. Shared by the HTTP handler and
/// the `submit` CLI path.
pub struct OnboardingService {
    client: EvaluationsClient,
}

impl OnboardingService {
    pub fn new(client: EvaluationsClient) -> Self {
        Self { client }
    }

    pub async fn submit(
        &self,
        submission: Option<&ApplicantSubmission>,
    ) -> Result<Outcome, SubmitError> {
        let submission = submission.ok_or(ValidationError::MissingBody)?;
        let request = submission.validate()?;

        let response = self
            .client
            .post_evaluation(&request)
            .await
            .map_err(ProviderError::Transport)?;

        if !response.status.is_success() {
            return Err(ProviderError::Rejected {
                status: response.status.as_u16(),
                body: response.body,
            }
            .into());
        }

        let outcome = response
            .body
            .get("summary")
            .and_then(|summary| summary.get("outcome"))
            .and_then(serde_json::Value::as_str)
            .ok_or(ProviderError::MissingSummary)?;

        let outcome = Outcome::from_provider(outcome);
        info!(outcome = %outcome, "evaluation outcome received");
        Ok(outcome)
    }
}
