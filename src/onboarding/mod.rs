//! Applicant onboarding: submission validation, the Alloy evaluation call,
//! and the session-side outcome presenter.

pub mod alloy;
pub mod outcome;
pub mod presenter;
pub mod service;
pub mod states;
pub mod submission;

pub use alloy::{EvaluationsClient, ProviderResponse};
pub use outcome::Outcome;
pub use presenter::{FormSession, SessionView};
pub use service::{OnboardingService, ProviderError};
pub use submission::{
    ApplicantSubmission, EvaluationRequest, PostalAddress, ValidationError,
};
