use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Body of a successful client-credentials exchange
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: SecretString,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds. Absent and zero are treated the same way.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Bearer token with its expiration
///
/// `expires_at` is derived once from `issued_at + expires_in` when the
/// credential is created and cannot be changed afterwards; a fresh exchange
/// produces a new `Credential`.
#[derive(Debug)]
pub struct Credential {
    access_token: SecretString,
    token_type: Option<String>,
    issued_at: DateTime<Utc>,
    expires_in: i64,
    expires_at: DateTime<Utc>,
}

impl Credential {
    /// Negative lifetimes are clamped to zero, yielding an already stale credential.
    pub fn new(
        access_token: impl Into<String>,
        token_type: Option<String>,
        issued_at: DateTime<Utc>,
        expires_in: i64,
    ) -> Self {
        let expires_in = expires_in.max(0);
        Self {
            access_token: SecretString::from(access_token.into()),
            token_type,
            issued_at,
            expires_in,
            expires_at: expiry(issued_at, expires_in),
        }
    }

    pub fn from_response(response: TokenResponse, issued_at: DateTime<Utc>) -> Self {
        let expires_in = response.expires_in.unwrap_or_default().max(0);
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            issued_at,
            expires_in,
            expires_at: expiry(issued_at, expires_in),
        }
    }

    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the credential is still usable at `now` once `buffer` is kept in reserve.
    pub fn is_valid_at(&self, now: DateTime<Utc>, buffer: Duration) -> bool {
        now + buffer < self.expires_at
    }
}

/// Lifetimes too large to represent saturate at the latest instant chrono supports.
fn expiry(issued_at: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    Duration::try_seconds(expires_in)
        .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_at_is_derived_from_issue_time() {
        let issued_at = Utc::now();
        let credential = Credential::new("tok", Some("Bearer".into()), issued_at, 3600);

        assert_eq!(credential.expires_at(), issued_at + Duration::seconds(3600));
        assert_eq!(credential.token_type(), Some("Bearer"));
        assert_eq!(credential.access_token(), "tok");
    }

    #[test]
    fn test_missing_expires_in_yields_stale_credential() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"tok"}"#).unwrap();
        let issued_at = Utc::now();
        let credential = Credential::from_response(response, issued_at);

        assert_eq!(credential.expires_in(), 0);
        assert_eq!(credential.expires_at(), issued_at);
        assert!(!credential.is_valid_at(issued_at, Duration::zero()));
    }

    #[test]
    fn test_validity_respects_buffer() {
        let now = Utc::now();
        let credential = Credential::new("tok", None, now, 90);

        assert!(credential.is_valid_at(now, Duration::seconds(60)));
        assert!(credential.is_valid_at(now + Duration::seconds(29), Duration::seconds(60)));
        // Exactly on the boundary counts as stale
        assert!(!credential.is_valid_at(now + Duration::seconds(30), Duration::seconds(60)));
        assert!(!credential.is_valid_at(now + Duration::seconds(45), Duration::seconds(60)));
    }

    #[test]
    fn test_debug_output_hides_token() {
        let credential = Credential::new("super-secret", None, Utc::now(), 60);
        assert!(!format!("{:?}", credential).contains("super-secret"));
    }

    #[test]
    fn test_huge_lifetime_saturates_instead_of_overflowing() {
        let issued_at = Utc::now();
        let credential = Credential::new("tok", None, issued_at, i64::MAX);

        assert_eq!(credential.expires_in(), i64::MAX);
        assert_eq!(credential.expires_at(), DateTime::<Utc>::MAX_UTC);
        assert!(credential.is_valid_at(issued_at, Duration::seconds(60)));

        // Representable as a duration but past chrono's maximum date
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"tok","expires_in":9000000000000}"#).unwrap();
        let credential = Credential::from_response(response, issued_at);
        assert_eq!(credential.expires_at(), DateTime::<Utc>::MAX_UTC);
    }
}
