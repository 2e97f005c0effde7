use crate::domain::{Token, TokenVerifier, VerifyResponse};
use crate::interface_adapters::protocol::{ErrorResponse, VerifyTokenRequest, VerifyTokenResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;
use url::form_urlencoded;

#[derive(Debug)]
pub enum VerifyClientError {
    Transport(reqwest::Error),
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
    Decode(reqwest::Error),
    LoginRejected,
}

impl fmt::Display for VerifyClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyClientError::Transport(err) => write!(f, "verify transport error: {err}"),
            VerifyClientError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "verify upstream error {status}: {message}")
                } else {
                    write!(f, "verify upstream error {status}")
                }
            }
            VerifyClientError::Decode(err) => write!(f, "verify response decode error: {err}"),
            VerifyClientError::LoginRejected => write!(f, "verifier login rejected"),
        }
    }
}

impl std::error::Error for VerifyClientError {}

/// Credentials of a verifier account on the web app.
#[derive(Clone)]
pub struct VerifierCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for VerifierCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifierCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

// Thin reqwest client for the web app's token verification endpoint.
// The endpoint is guarded by a verifier session, so cookies are kept between calls.
#[derive(Clone)]
pub struct VerifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl VerifyClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Opens a verifier session; the session cookie is reused by later calls.
    pub async fn login(&self, credentials: &VerifierCredentials) -> Result<(), VerifyClientError> {
        let url = format!("{}/verifier", self.base_url);
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("username", &credentials.username)
            .append_pair("password", &credentials.password)
            .finish();
        let res = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(VerifyClientError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(VerifyClientError::Upstream {
                status,
                message: None,
            });
        }

        // The login page answers 200 for bad credentials too; only a guarded
        // request tells whether the session cookie was granted.
        match self.verify_token("").await {
            Ok(_) => Ok(()),
            Err(VerifyClientError::Upstream { status, .. })
                if status == StatusCode::UNAUTHORIZED =>
            {
                Err(VerifyClientError::LoginRejected)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn verify_token(
        &self,
        token: &str,
    ) -> Result<VerifyTokenResponse, VerifyClientError> {
        // Compose the verification URL and POST the scanned token.
        let url = format!("{}/verify_token", self.base_url);
        let res = self
            .http
            .post(url)
            .json(&VerifyTokenRequest { token })
            .send()
            .await
            .map_err(VerifyClientError::Transport)?;
        let status = res.status();

        // Keep upstream status/message for the logs; the gate only sees a failure.
        if !status.is_success() {
            let message = res
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|payload| payload.error);
            return Err(VerifyClientError::Upstream { status, message });
        }

        res.json::<VerifyTokenResponse>()
            .await
            .map_err(VerifyClientError::Decode)
    }
}

#[async_trait]
impl TokenVerifier for VerifyClient {
    async fn verify(
        &self,
        token: &Token,
    ) -> Result<VerifyResponse, Box<dyn std::error::Error + Send + Sync>> {
        let response = self.verify_token(token.as_str()).await?;
        Ok(response.into())
    }
}
