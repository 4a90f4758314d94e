//! Client-side relay failures and the messages shown for them.

use std::fmt;

pub const NETWORK_PROBLEM_MESSAGE: &str =
    "There was a problem with the network. Please check your connection and try again.";
pub const UNREACHABLE_MESSAGE: &str =
    "The server is currently unreachable. Please try again later.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Why a call to the relay failed, tagged where the failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFailure {
    /// The relay answered with a non-success status.
    BadStatus { status: u16, status_text: String },
    /// The relay could not be reached at all.
    Unreachable(String),
    /// Anything else, e.g. a response body that could not be read.
    Unexpected(String),
}

impl RelayFailure {
    /// Classifies an error that is only available as text, such as a
    /// rejected browser `fetch`.
    pub fn from_description(description: &str) -> Self {
        if description.contains("Network response was not ok") {
            RelayFailure::BadStatus {
                status: 0,
                status_text: description.to_string(),
            }
        } else if description.contains("Failed to fetch") {
            RelayFailure::Unreachable(description.to_string())
        } else {
            RelayFailure::Unexpected(description.to_string())
        }
    }

    /// Fixed user-facing message for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            RelayFailure::BadStatus { .. } => NETWORK_PROBLEM_MESSAGE,
            RelayFailure::Unreachable(_) => UNREACHABLE_MESSAGE,
            RelayFailure::Unexpected(_) => UNEXPECTED_MESSAGE,
        }
    }
}

impl fmt::Display for RelayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayFailure::BadStatus {
                status,
                status_text,
            } => write!(f, "Network response was not ok: {status} {status_text}"),
            RelayFailure::Unreachable(e) => write!(f, "Failed to fetch: {e}"),
            RelayFailure::Unexpected(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_to_fetch_is_unreachable() {
        let failure = RelayFailure::from_description("TypeError: Failed to fetch");
        assert!(matches!(failure, RelayFailure::Unreachable(_)));
        assert_eq!(
            failure.user_message(),
            "The server is currently unreachable. Please try again later."
        );
    }

    #[test]
    fn bad_status_text_is_network_problem() {
        let failure =
            RelayFailure::from_description("Network response was not ok: Internal Server Error");
        assert_eq!(failure.user_message(), NETWORK_PROBLEM_MESSAGE);
    }

    #[test]
    fn anything_else_is_unexpected() {
        let failure = RelayFailure::from_description("SyntaxError: Unexpected token <");
        assert_eq!(failure.user_message(), UNEXPECTED_MESSAGE);
    }

    #[test]
    fn display_round_trips_through_classification() {
        let failures = [
            RelayFailure::BadStatus {
                status: 500,
                status_text: "Internal Server Error".into(),
            },
            RelayFailure::Unreachable("connection refused".into()),
        ];
        for failure in failures {
            let reclassified = RelayFailure::from_description(&failure.to_string());
            assert_eq!(reclassified.user_message(), failure.user_message());
        }
    }
}
