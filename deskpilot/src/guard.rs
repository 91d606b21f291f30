//! Shared-secret access check

/// Validates a caller-supplied token against the configured secret.
///
/// With no secret configured every request is authorized (open mode).
#[derive(Debug, Clone, Default)]
pub struct TokenGuard {
    expected: Option<String>,
}

impl TokenGuard {
    pub fn new(token: Option<String>) -> Self {
        Self {
            expected: normalize_token(token),
        }
    }

    /// Whether a secret is configured at all.
    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    /// Surrounding whitespace on the supplied value is ignored, the rest
    /// must match exactly.
    pub fn authorize(&self, supplied: Option<&str>) -> bool {
        match &self.expected {
            None => true,
            Some(expected) => supplied.is_some_and(|s| s.trim() == expected),
        }
    }

    /// Authorizes if any of the candidate values matches.
    pub fn authorize_any<'a>(&self, candidates: impl IntoIterator<Item = Option<&'a str>>) -> bool {
        if !self.is_enabled() {
            return true;
        }
        candidates.into_iter().any(|c| self.authorize(c))
    }
}

/// Trims the token and turns a blank value into `None`.
pub(crate) fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
