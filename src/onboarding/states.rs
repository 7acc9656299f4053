use std::collections::HashSet;
use std::sync::OnceLock;

static US_STATE_CODES: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Whether `code` is a recognized two-letter US state code.
///
/// The comparison is exact: the form uppercases state input before submission,
/// and lowercase or padded codes are rejected here just as they would be by
/// the provider.
pub fn is_us_state(code: &str) -> bool {
    us_state_codes().contains(code)
}

fn us_state_codes() -> &'static HashSet<&'static str> {
    US_STATE_CODES.get_or_init(|| {
        const CODES: &[&str] = &[
            "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL",
            "IN", "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE",
            "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD",
            "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
        ];
        CODES.iter().copied().collect()
    })
}
