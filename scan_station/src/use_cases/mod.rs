// Use cases layer: the scan-and-verify flow and QR rendering.

pub mod qr_render;
pub mod scan_gate;
#[cfg(test)]
pub(crate) mod test_support;

pub use qr_render::{QrRenderError, QrRenderUseCase};
pub use scan_gate::{ScanDisposition, ScanGate};
