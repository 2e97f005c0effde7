// QR image generation for a token, unrelated to the scan flow.

use crate::domain::Token;
use crate::domain::ports::QrRenderer;
use std::fmt;
use std::io::Write;

#[derive(Debug)]
pub enum QrRenderError {
    Encode(Box<dyn std::error::Error + Send + Sync>),
    Write(std::io::Error),
}

impl fmt::Display for QrRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrRenderError::Encode(err) => write!(f, "qr encode error: {err}"),
            QrRenderError::Write(err) => write!(f, "qr write error: {err}"),
        }
    }
}

impl std::error::Error for QrRenderError {}

// Renders a token and writes the resulting document to the display target.
pub struct QrRenderUseCase<R> {
    pub renderer: R,
}

impl<R> QrRenderUseCase<R>
where
    R: QrRenderer,
{
    pub fn execute<W: Write>(&self, token: &Token, target: &mut W) -> Result<(), QrRenderError> {
        // Encode fully before touching the target so a failure leaves it untouched.
        let document = self.renderer.render(token).map_err(QrRenderError::Encode)?;

        target
            .write_all(document.as_bytes())
            .and_then(|()| target.flush())
            .map_err(QrRenderError::Write)
    }
}
