use async_trait::async_trait;

use crate::domain::status::StatusView;
use crate::domain::verification::{Token, VerifyResponse};

// The use cases depend on these traits, not on the HTTP client, terminal or QR crate.
// Dependencies point inwards to the domain layer.

// Port for the external token verification service.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(
        &self,
        token: &Token,
    ) -> Result<VerifyResponse, Box<dyn std::error::Error + Send + Sync>>;
}

// Port for the element that shows the latest outcome.
pub trait StatusDisplay: Send + Sync {
    fn render(&self, view: &StatusView);
}

// Port for turning a token into a scannable image document.
pub trait QrRenderer: Send + Sync {
    fn render(&self, token: &Token) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
