pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::station::{Command, render_qr, run_scanner, run_with_args};
pub use use_cases::{ScanDisposition, ScanGate};
