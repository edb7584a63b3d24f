use models::ErrorKind;

use std::sync::OnceLock;

use regex::Regex;

const CONNECTION_REFUSED_PATTERN: &str = r"(?i)connection refused";
const TIMEOUT_PATTERN: &str = r"(?i)timeout";
const AUTH_FAILURE_PATTERN: &str = r"(?i)authentication|password";

static CLASSIFIERS: OnceLock<Vec<(Regex, ErrorKind)>> = OnceLock::new();

pub(crate) fn get_classifiers() -> &'static [(Regex, ErrorKind)] {
    CLASSIFIERS.get_or_init(|| {
        [
            (CONNECTION_REFUSED_PATTERN, ErrorKind::ConnectionRefused),
            (TIMEOUT_PATTERN, ErrorKind::Timeout),
            (AUTH_FAILURE_PATTERN, ErrorKind::AuthFailure),
        ]
        .into_iter()
        .map(|(pattern, kind)| (Regex::new(pattern).expect("valid regex pattern"), kind))
        .collect()
    })
}

/// Map a client error message to an [`ErrorKind`].
///
/// Case-insensitive substring match; the first matching rule wins, in the
/// order refused, timeout, authentication.
pub fn classify(message: &str) -> ErrorKind {
    get_classifiers()
        .iter()
        .find(|(re, _)| re.is_match(message))
        .map(|(_, kind)| *kind)
        .unwrap_or(ErrorKind::Unclassified)
}
