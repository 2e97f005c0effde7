// Wire DTOs for the verification endpoint and their domain conversions.

use crate::domain::{UserInfo, VerifyResponse};
use serde::{Deserialize, Serialize};

/// Body of `POST /verify_token`.
#[derive(Debug, Serialize)]
pub struct VerifyTokenRequest<'a> {
    pub token: &'a str,
}

/// Reply of `POST /verify_token`. Redemption flags are omitted by the
/// service when they do not apply.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    #[serde(default)]
    pub already_redeemed: bool,
    #[serde(default)]
    pub redeemed: bool,
    #[serde(default)]
    pub user: Option<UserDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<UserDto> for UserInfo {
    fn from(user: UserDto) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}

impl From<VerifyTokenResponse> for VerifyResponse {
    fn from(response: VerifyTokenResponse) -> Self {
        Self {
            valid: response.valid,
            already_redeemed: response.already_redeemed,
            redeemed: response.redeemed,
            user: response.user.map(UserInfo::from),
        }
    }
}
