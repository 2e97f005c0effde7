// Verification results and the rules that classify them.

use std::fmt;

/// Opaque token decoded from a QR code. Never inspected locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Owner of a token as reported by the verification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

// Rendered as "NAME (EMAIL)"; the service may send null for either field.
impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("unknown");
        let email = self.email.as_deref().unwrap_or("unknown");
        write!(f, "{name} ({email})")
    }
}

/// Parsed verification reply, independent of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerifyResponse {
    pub valid: bool,
    /// Only meaningful when `valid`.
    pub already_redeemed: bool,
    /// Only meaningful when `valid` and not `already_redeemed`.
    pub redeemed: bool,
    pub user: Option<UserInfo>,
}

/// The single result rendered for an accepted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Invalid,
    ValidUnredeemed {
        user: UserInfo,
        // Whether the service redeemed the token as part of this call.
        redeemed_now: bool,
    },
    ValidAlreadyRedeemed {
        user: UserInfo,
    },
    TransportError,
}

impl VerificationOutcome {
    /// Short label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationOutcome::Invalid => "invalid",
            VerificationOutcome::ValidUnredeemed { .. } => "valid_unredeemed",
            VerificationOutcome::ValidAlreadyRedeemed { .. } => "valid_already_redeemed",
            VerificationOutcome::TransportError => "transport_error",
        }
    }
}

/// Maps a verification reply onto exactly one outcome.
///
/// A reply that claims `valid` without a `user` object is malformed and is
/// treated like a failed request.
pub fn classify(response: &VerifyResponse) -> VerificationOutcome {
    if !response.valid {
        return VerificationOutcome::Invalid;
    }

    let Some(user) = response.user.clone() else {
        return VerificationOutcome::TransportError;
    };

    if response.already_redeemed {
        VerificationOutcome::ValidAlreadyRedeemed { user }
    } else {
        VerificationOutcome::ValidUnredeemed {
            user,
            redeemed_now: response.redeemed,
        }
    }
}
