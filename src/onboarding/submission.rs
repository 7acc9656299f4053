use crate::onboarding::states;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Raw applicant details as posted by the form.
///
/// Field presence is deliberately loose here: every rule the original intake
/// enforced is applied in [`ApplicantSubmission::validate`], in a fixed order,
/// so a missing field fails with the message of the first rule that notices it
/// rather than a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSubmission {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: Option<PostalAddress>,
    #[serde(default, deserialize_with = "deserialize_ssn")]
    pub ssn: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub date_of_birth: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostalAddress {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal: String,
    #[serde(default)]
    pub country: String,
}

/// The provider-specific projection of a submission. Only constructed from a
/// submission that has passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationRequest {
    pub name_first: String,
    pub name_last: String,
    pub address_line_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    pub address_city: String,
    pub address_state: String,
    pub address_postal_code: String,
    pub address_country_code: String,
    pub document_ssn: String,
    pub email_address: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid request body.")]
    MissingBody,
    #[error("Invalid address line 1")]
    MissingAddressLine1,
    #[error("Invalid email address")]
    MissingEmailAddress,
    #[error("Invalid address state.")]
    InvalidState,
    #[error("Invalid country, needs to be US.")]
    InvalidCountry,
    #[error("Invalid date of birth.")]
    InvalidDateOfBirth,
    #[error("Invalid SSN.")]
    InvalidSsn,
}

impl ApplicantSubmission {
    /// Validates the submission and, when every rule passes, maps it to the
    /// provider field names. Rules run in a fixed order and the first
    /// violation wins.
    pub fn validate(&self) -> Result<EvaluationRequest, ValidationError> {
        let address = self
            .address
            .as_ref()
            .ok_or(ValidationError::MissingBody)?;

        if address.line1.is_empty() {
            return Err(ValidationError::MissingAddressLine1);
        }
        if self.email_address.is_empty() {
            return Err(ValidationError::MissingEmailAddress);
        }
        if !states::is_us_state(&address.state) {
            return Err(ValidationError::InvalidState);
        }
        if address.country != "US" {
            return Err(ValidationError::InvalidCountry);
        }
        let birth_date = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDateOfBirth)?;
        if !is_nine_ascii_digits(&self.ssn) {
            return Err(ValidationError::InvalidSsn);
        }

        Ok(EvaluationRequest {
            name_first: self.first_name.clone(),
            name_last: self.last_name.clone(),
            address_line_1: address.line1.clone(),
            address_line_2: address.line2.clone(),
            address_city: address.city.clone(),
            address_state: address.state.clone(),
            address_postal_code: address.postal.clone(),
            address_country_code: address.country.clone(),
            document_ssn: self.ssn.clone(),
            email_address: self.email_address.clone(),
            birth_date,
        })
    }
}

fn is_nine_ascii_digits(ssn: &str) -> bool {
    ssn.len() == 9 && ssn.bytes().all(|b| b.is_ascii_digit())
}

// The form posts the SSN as a string, but clients are not obliged to; a bare
// JSON number is accepted and coerced to its decimal text before the
// nine-digit check, matching the original intake.
fn deserialize_ssn<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Number(number) => number.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> ApplicantSubmission {
        ApplicantSubmission {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            address: Some(PostalAddress {
                line1: "100 Main St".to_string(),
                line2: Some("Apt 4".to_string()),
                city: "Des Moines".to_string(),
                state: "IA".to_string(),
                postal: "50309".to_string(),
                country: "US".to_string(),
            }),
            ssn: "123456789".to_string(),
            email_address: "john@metalbank.com".to_string(),
            date_of_birth: "1990-01-31".to_string(),
        }
    }

    #[test]
    fn valid_submission_maps_every_field() {
        let request = valid_submission().validate().expect("submission is valid");
        assert_eq!(request.name_first, "John");
        assert_eq!(request.name_last, "Smith");
        assert_eq!(request.address_line_1, "100 Main St");
        assert_eq!(request.address_line_2.as_deref(), Some("Apt 4"));
        assert_eq!(request.address_city, "Des Moines");
        assert_eq!(request.address_state, "IA");
        assert_eq!(request.address_postal_code, "50309");
        assert_eq!(request.address_country_code, "US");
        assert_eq!(request.document_ssn, "123456789");
        assert_eq!(request.email_address, "john@metalbank.com");
        assert_eq!(
            request.birth_date,
            NaiveDate::from_ymd_opt(1990, 1, 31).expect("valid date")
        );
    }

    #[test]
    fn missing_address_fails_as_invalid_body() {
        let submission = ApplicantSubmission {
            address: None,
            ..valid_submission()
        };
        assert_eq!(submission.validate(), Err(ValidationError::MissingBody));
    }

    #[test]
    fn empty_address_line_1_fails() {
        let mut submission = valid_submission();
        submission.address.as_mut().expect("address present").line1 = String::new();
        assert_eq!(
            submission.validate(),
            Err(ValidationError::MissingAddressLine1)
        );
    }

    #[test]
    fn empty_email_fails() {
        let mut submission = valid_submission();
        submission.email_address = String::new();
        assert_eq!(
            submission.validate(),
            Err(ValidationError::MissingEmailAddress)
        );
    }

    #[test]
    fn unknown_state_fails() {
        let mut submission = valid_submission();
        submission.address.as_mut().expect("address present").state = "ZZ".to_string();
        assert_eq!(submission.validate(), Err(ValidationError::InvalidState));
    }

    #[test]
    fn non_us_country_fails() {
        let mut submission = valid_submission();
        submission.address.as_mut().expect("address present").country = "GB".to_string();
        assert_eq!(submission.validate(), Err(ValidationError::InvalidCountry));
    }

    #[test]
    fn unparseable_date_of_birth_fails() {
        let mut submission = valid_submission();
        submission.date_of_birth = "31/01/1990".to_string();
        assert_eq!(
            submission.validate(),
            Err(ValidationError::InvalidDateOfBirth)
        );

        submission.date_of_birth = "1990-02-30".to_string();
        assert_eq!(
            submission.validate(),
            Err(ValidationError::InvalidDateOfBirth)
        );
    }

    #[test]
    fn ssn_must_be_exactly_nine_digits() {
        for bad in ["12345678", "123456789X", "1234567890", "", "12345678 "] {
            let mut submission = valid_submission();
            submission.ssn = bad.to_string();
            assert_eq!(
                submission.validate(),
                Err(ValidationError::InvalidSsn),
                "ssn {bad:?} should be rejected"
            );
        }

        let mut submission = valid_submission();
        submission.ssn = "123456789".to_string();
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn rules_apply_in_fixed_order() {
        // Multiple violations: line1 missing must win over the bad SSN.
        let mut submission = valid_submission();
        submission.address.as_mut().expect("address present").line1 = String::new();
        submission.ssn = "123".to_string();
        assert_eq!(
            submission.validate(),
            Err(ValidationError::MissingAddressLine1)
        );
    }

    #[test]
    fn numeric_ssn_is_coerced_to_text() {
        let submission: ApplicantSubmission = serde_json::from_value(serde_json::json!({
            "firstName": "John",
            "lastName": "Smith",
            "address": {
                "line1": "100 Main St",
                "city": "Des Moines",
                "state": "IA",
                "postal": "50309",
                "country": "US"
            },
            "ssn": 123456789,
            "emailAddress": "john@metalbank.com",
            "dateOfBirth": "1990-01-31"
        }))
        .expect("submission deserializes");
        assert_eq!(submission.ssn, "123456789");
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn absent_line2_is_omitted_from_the_mapped_request() {
        let mut submission = valid_submission();
        submission.address.as_mut().expect("address present").line2 = None;
        let request = submission.validate().expect("submission is valid");
        let encoded = serde_json::to_value(&request).expect("request serializes");
        assert!(encoded.get("address_line_2").is_none());
        assert_eq!(encoded["birth_date"], "1990-01-31");
    }
}
