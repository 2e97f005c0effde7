// QR rendering backed by the `qrcode` crate.

use crate::domain::{QrRenderer, Token};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};

/// Fixed look of generated codes.
#[derive(Debug, Clone)]
pub struct QrStyle {
    /// Edge of the square box the image must fit in, in pixels.
    pub size: u32,
    pub dark_color: String,
    pub light_color: String,
    pub ec_level: EcLevel,
}

#[derive(Debug, Clone)]
pub struct SvgQrRenderer {
    style: QrStyle,
}

impl SvgQrRenderer {
    pub fn new(style: QrStyle) -> Self {
        Self { style }
    }

    fn encode(&self, token: &Token) -> Result<QrCode, qrcode::types::QrError> {
        QrCode::with_error_correction_level(token.as_str().as_bytes(), self.style.ec_level)
    }

    /// Console preview using half-block characters.
    pub fn render_terminal(&self, token: &Token) -> Result<String, qrcode::types::QrError> {
        let code = self.encode(token)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build())
    }
}

impl QrRenderer for SvgQrRenderer {
    fn render(&self, token: &Token) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let code = self.encode(token)?;
        let image = code
            .render::<svg::Color<'_>>()
            .max_dimensions(self.style.size, self.style.size)
            .dark_color(svg::Color(&self.style.dark_color))
            .light_color(svg::Color(&self.style.light_color))
            .build();
        Ok(image)
    }
}
