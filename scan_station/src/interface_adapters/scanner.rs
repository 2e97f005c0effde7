// Scanner source: a keyboard-wedge QR scanner types each decoded token as one line.

use crate::domain::Token;
use crate::use_cases::{ScanDisposition, ScanGate};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Widget settings handed to the scanner. Opaque to the scan flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    pub fps: u32,
    pub qrbox: u32,
}

/// Counters reported when the input ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub accepted: u64,
    pub dropped: u64,
}

pub struct LineScanner<R> {
    input: R,
    config: ScannerConfig,
}

impl LineScanner<BufReader<tokio::io::Stdin>> {
    pub fn stdin(config: ScannerConfig) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), config)
    }
}

impl<R> LineScanner<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(input: R, config: ScannerConfig) -> Self {
        Self { input, config }
    }

    pub fn config(&self) -> ScannerConfig {
        self.config
    }

    /// Feeds every decoded token to the gate until the input ends.
    ///
    /// Verification tasks are not awaited; the gate decides what happens to
    /// each token.
    pub async fn run(self, gate: &ScanGate) -> std::io::Result<ScanStats> {
        info!(fps = self.config.fps, qrbox = self.config.qrbox, "scanner started");

        let mut stats = ScanStats::default();
        let mut lines = self.input.lines();
        while let Some(line) = lines.next_line().await? {
            // A bare newline carries no token.
            if line.is_empty() {
                continue;
            }

            match gate.on_result(Token::new(line)) {
                ScanDisposition::Accepted(_) => stats.accepted += 1,
                ScanDisposition::Dropped => stats.dropped += 1,
            }
        }

        debug!(
            accepted = stats.accepted,
            dropped = stats.dropped,
            "scanner input closed"
        );
        Ok(stats)
    }
}
