// Framework bootstrap for the scan station runtime.

use crate::domain::Token;
use crate::frameworks::config;
use crate::interface_adapters::clients::VerifyClient;
use crate::interface_adapters::display::TerminalDisplay;
use crate::interface_adapters::qr::SvgQrRenderer;
use crate::interface_adapters::scanner::LineScanner;
use crate::use_cases::{QrRenderUseCase, ScanGate};

use std::io::{Result, Write};
use std::path::PathBuf;
use std::sync::Arc;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Stdout belongs to the status panel and QR output.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Command selected from the process arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read decoded tokens from stdin and verify them.
    Scan,
    /// Render a token as a QR image into a file, or stdout when no path is given.
    Qr { token: String, output: Option<PathBuf> },
}

impl Command {
    pub fn parse<I>(args: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        match args.next().as_deref() {
            None | Some("scan") => Ok(Command::Scan),
            Some("qr") => {
                let token = args
                    .next()
                    .ok_or_else(|| "usage: scan_station qr <TOKEN> [OUTPUT]".to_string())?;
                let output = args.next().map(PathBuf::from);
                Ok(Command::Qr { token, output })
            }
            Some(other) => Err(format!("unknown command: {other}")),
        }
    }
}

pub async fn run_with_args<I>(args: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    init_runtime();

    let command = Command::parse(args).map_err(|message| {
        tracing::error!(error = %message, "invalid arguments");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
    })?;

    match command {
        Command::Scan => run_scanner().await,
        Command::Qr { token, output } => render_qr(&Token::new(token), output),
    }
}

pub async fn run_scanner() -> Result<()> {
    let gate = build_gate().await?;
    let scanner = LineScanner::stdin(config::scanner_config());

    let stats = scanner.run(&gate).await.inspect_err(|e| {
        tracing::error!(error = %e, "scanner input failed");
    })?;

    // Let the last accepted token finish before exiting.
    let mut state_rx = gate.subscribe();
    let _ = state_rx.wait_for(|state| state.is_open()).await;

    tracing::info!(
        accepted = stats.accepted,
        dropped = stats.dropped,
        "scan station stopped"
    );
    Ok(())
}

pub async fn build_gate() -> Result<ScanGate> {
    let verify_base_url = config::verify_service_url();
    url::Url::parse(&verify_base_url).map_err(|e| {
        tracing::error!(verify_base_url = %verify_base_url, error = %e, "invalid verify service url");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let verify_timeout = config::verify_timeout();
    let client = VerifyClient::new(verify_base_url.clone(), verify_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize verify client: {e}")))?;
    tracing::debug!(
        verify_base_url = %verify_base_url,
        verify_timeout_ms = verify_timeout.as_millis(),
        "verify client configured"
    );

    if let Some(credentials) = config::verifier_credentials() {
        client.login(&credentials).await.map_err(|e| {
            tracing::error!(username = %credentials.username, error = %e, "verifier login failed");
            std::io::Error::other(format!("verifier login failed: {e}"))
        })?;
        tracing::info!(username = %credentials.username, "verifier session opened");
    } else {
        tracing::warn!("no verifier credentials configured; requests may be rejected");
    }

    Ok(ScanGate::new(
        Arc::new(client),
        Arc::new(TerminalDisplay::stdout()),
        config::GATE_COOLDOWN,
    ))
}

pub fn render_qr(token: &Token, output: Option<PathBuf>) -> Result<()> {
    let renderer = SvgQrRenderer::new(config::qr_style());
    let use_case = QrRenderUseCase {
        renderer: renderer.clone(),
    };

    // Render fully before touching the target so a failed encode leaves it as it was.
    let mut svg = Vec::new();
    use_case.execute(token, &mut svg).map_err(|e| {
        tracing::error!(error = %e, "qr render failed");
        std::io::Error::other(e.to_string())
    })?;

    match &output {
        Some(path) => std::fs::write(path, &svg)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&svg)?;
            stdout.flush()?;
        }
    }

    if let Some(path) = output {
        tracing::info!(path = %path.display(), "qr code written");
        // Show the code on the console as well when the image went to a file.
        if let Ok(preview) = renderer.render_terminal(token) {
            eprintln!("{preview}");
        }
    }
    Ok(())
}
