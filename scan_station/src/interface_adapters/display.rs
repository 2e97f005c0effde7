// Status display that mirrors the panel onto a terminal.

use crate::domain::{StatusClass, StatusDisplay, StatusPanel, StatusView};
use std::io::Write;
use std::sync::Mutex;

const RESET: &str = "\x1b[0m";

fn ansi_color(class: StatusClass) -> &'static str {
    match class {
        StatusClass::Success => "\x1b[32m",
        StatusClass::Warning => "\x1b[33m",
        StatusClass::Danger => "\x1b[31m",
    }
}

/// Keeps the panel state and redraws it on every render.
pub struct TerminalDisplay<W> {
    panel: Mutex<StatusPanel>,
    out: Mutex<W>,
    colored: bool,
}

impl TerminalDisplay<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), true)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self {
            panel: Mutex::new(StatusPanel::default()),
            out: Mutex::new(out),
            colored,
        }
    }

    pub fn panel(&self) -> StatusPanel {
        match self.panel.lock() {
            Ok(panel) => panel.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn draw(&self, panel: &StatusPanel) -> std::io::Result<()> {
        let Some(class) = panel.class() else {
            return Ok(());
        };
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };

        let (start, end) = if self.colored {
            (ansi_color(class), RESET)
        } else {
            ("", "")
        };
        writeln!(out, "{start}[{}]{end}", class.as_str().to_uppercase())?;
        for line in panel.message().lines() {
            writeln!(out, "{start}  {line}{end}")?;
        }
        out.flush()
    }
}

impl<W: Write + Send> StatusDisplay for TerminalDisplay<W> {
    fn render(&self, view: &StatusView) {
        let snapshot = {
            let mut panel = match self.panel.lock() {
                Ok(panel) => panel,
                Err(poisoned) => poisoned.into_inner(),
            };
            panel.apply(view);
            panel.clone()
        };

        if let Err(e) = self.draw(&snapshot) {
            tracing::warn!(error = %e, "failed to draw status panel");
        }
    }
}
