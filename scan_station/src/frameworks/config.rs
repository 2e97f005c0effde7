use crate::interface_adapters::clients::VerifierCredentials;
use crate::interface_adapters::qr::QrStyle;
use crate::interface_adapters::scanner::ScannerConfig;
use qrcode::EcLevel;
use std::{env, time::Duration};

// Runtime constants and env-driven settings for the scan station.

pub fn verify_service_url() -> String {
    env::var("VERIFY_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}

pub fn verify_timeout() -> Duration {
    let millis = env::var("VERIFY_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(5000);
    Duration::from_millis(millis)
}

// Both variables must be set for the station to open a verifier session.
pub fn verifier_credentials() -> Option<VerifierCredentials> {
    let username = env::var("VERIFIER_USERNAME").ok()?;
    let password = env::var("VERIFIER_PASSWORD").ok()?;
    Some(VerifierCredentials { username, password })
}

pub fn scanner_config() -> ScannerConfig {
    ScannerConfig {
        fps: parse_u32("SCANNER_FPS").unwrap_or(10),
        qrbox: parse_u32("SCANNER_QRBOX").unwrap_or(250),
    }
}

pub fn qr_style() -> QrStyle {
    QrStyle {
        size: QR_SIZE_PX,
        dark_color: QR_DARK_COLOR.to_string(),
        light_color: QR_LIGHT_COLOR.to_string(),
        ec_level: QR_EC_LEVEL,
    }
}

fn parse_u32(key: &str) -> Option<u32> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}

// Time the gate stays closed after an outcome is shown.
pub const GATE_COOLDOWN: Duration = Duration::from_millis(2000);

pub const QR_SIZE_PX: u32 = 256;
pub const QR_DARK_COLOR: &str = "#000000";
pub const QR_LIGHT_COLOR: &str = "#ffffff";
pub const QR_EC_LEVEL: EcLevel = EcLevel::H;
