use serde::{Serialize, Serializer};
use std::fmt;

/// The provider's coarse decision. The provider's outcome vocabulary is an
/// open set, so anything outside the three documented values is carried
/// through as `Unknown` rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Approved,
    ManualReview,
    Denied,
    Unknown(String),
}

impl Outcome {
    pub fn from_provider(value: &str) -> Self {
        match value {
            "Approved" => Self::Approved,
            "Manual Review" => Self::ManualReview,
            "Denied" => Self::Denied,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Approved => "Approved",
            Self::ManualReview => "Manual Review",
            Self::Denied => "Denied",
            Self::Unknown(value) => value,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Outcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
