//! Session-side state machine behind the applicant form.
//!
//! The session starts on the form, accumulates field edits through a pure
//! reducer, and moves to a terminal decided state once a submission succeeds.
//! A failed submission leaves the form open with a pending alert, mirroring
//! the blocking alert the original form raised.

use crate::onboarding::outcome::Outcome;
use crate::onboarding::submission::{ApplicantSubmission, PostalAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    Ssn,
    EmailAddress,
    DateOfBirth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    FieldChanged { field: FormField, value: String },
    DecisionReceived(Outcome),
    SubmissionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSession {
    Form {
        draft: ApplicantSubmission,
        alert: Option<String>,
    },
    Decided(Outcome),
}

/// What the session renders: the open form (with any pending alert) or one of
/// the fixed decision messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    Form { alert: Option<String> },
    Decision { message: String },
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::Form {
            draft: ApplicantSubmission {
                address: Some(PostalAddress {
                    // The form pins the country; it is not editable.
                    country: "US".to_string(),
                    ..PostalAddress::default()
                }),
                ..ApplicantSubmission::default()
            },
            alert: None,
        }
    }

    /// Pure reducer: consumes the current state and one event, returns the
    /// next state. A decided session is terminal and ignores further events.
    pub fn apply(self, event: SessionEvent) -> Self {
        match (self, event) {
            (Self::Form { draft, .. }, SessionEvent::FieldChanged { field, value }) => {
                Self::Form {
                    draft: apply_field(draft, field, value),
                    alert: None,
                }
            }
            (Self::Form { .. }, SessionEvent::DecisionReceived(outcome)) => Self::Decided(outcome),
            (Self::Form { draft, .. }, SessionEvent::SubmissionFailed(message)) => Self::Form {
                draft,
                alert: Some(message),
            },
            (decided @ Self::Decided(_), _) => decided,
        }
    }

    pub fn draft(&self) -> Option<&ApplicantSubmission> {
        match self {
            Self::Form { draft, .. } => Some(draft),
            Self::Decided(_) => None,
        }
    }

    pub fn view(&self) -> SessionView {
        match self {
            Self::Form { alert, .. } => SessionView::Form {
                alert: alert.clone(),
            },
            Self::Decided(outcome) => SessionView::Decision {
                message: decision_message(outcome),
            },
        }
    }
}

fn apply_field(mut draft: ApplicantSubmission, field: FormField, value: String) -> ApplicantSubmission {
    let address = draft.address.get_or_insert_with(PostalAddress::default);
    match field {
        FormField::FirstName => draft.first_name = value,
        FormField::LastName => draft.last_name = value,
        FormField::AddressLine1 => address.line1 = value,
        FormField::AddressLine2 => address.line2 = Some(value),
        FormField::City => address.city = value,
        // The form uppercases the state code as the applicant types.
        FormField::State => address.state = value.to_ascii_uppercase(),
        FormField::PostalCode => address.postal = value,
        FormField::Ssn => draft.ssn = value,
        FormField::EmailAddress => draft.email_address = value,
        FormField::DateOfBirth => draft.date_of_birth = value,
    }
    draft
}

fn decision_message(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Approved => "Success, your account has been Approved ✓".to_string(),
        Outcome::ManualReview => {
            "Thanks for submitting your application, we'll be in touch shortly".to_string()
        }
        Outcome::Denied => "Sorry, your application was not Successful".to_string(),
        Outcome::Unknown(value) => format!(
            "We received your application, but the decision \"{value}\" was not recognized. \
             Please contact support."
        ),
    }
}
