//! CLI binary for doc2pdf-client.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ClientConfig`, drives one upload session, and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use doc2pdf_client::{ClientConfig, SessionState, UploadSession};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a document, save next to the current directory
  doc2pdf report.docx

  # Save into a specific directory
  doc2pdf report.docx -o ~/Documents/converted

  # Point at a remote service
  doc2pdf report.docx --endpoint https://convert.example.com/convert

  # Print a JSON receipt instead of the summary line
  doc2pdf report.docx --json

  # Upload and discard the result (smoke-test the service)
  doc2pdf report.docx --discard

ENVIRONMENT VARIABLES:
  DOC2PDF_ENDPOINT   Conversion endpoint URL
  DOC2PDF_OUTPUT     Output directory
  DOC2PDF_TIMEOUT    Request timeout in seconds

SERVER CONTRACT:
  POST {endpoint} with one multipart field `file`. Any 2xx answer is the
  converted document; the download name comes from Content-Disposition when
  present, otherwise from the input name with its extension swapped for the
  target one. A non-2xx answer carries a plain-text error which is shown
  verbatim.
"#;

/// Upload a document to a doc2pdf conversion service and save the result.
#[derive(Parser, Debug)]
#[command(
    name = "doc2pdf",
    version,
    about = "Upload a document to a doc2pdf conversion service and save the result",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Document to convert.
    input: PathBuf,

    /// Directory to save the converted document into.
    #[arg(short, long, env = "DOC2PDF_OUTPUT", default_value = ".")]
    output: PathBuf,

    /// Conversion endpoint URL.
    #[arg(long, env = "DOC2PDF_ENDPOINT", default_value = "http://localhost:5000/convert")]
    endpoint: String,

    /// Fallback extension when the server suggests no name.
    #[arg(long, default_value = "pdf")]
    extension: String,

    /// Whole-request timeout in seconds.
    #[arg(long, env = "DOC2PDF_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Print a JSON receipt instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Discard the converted artifact instead of saving it.
    #[arg(long)]
    discard: bool,

    /// Disable the spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config and session ─────────────────────────────────────────
    let config = ClientConfig::builder()
        .endpoint(&cli.endpoint)
        .target_extension(&cli.extension)
        .request_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;

    let mut session = UploadSession::new(config).context("Failed to create upload session")?;

    session
        .select(&cli.input)
        .with_context(|| format!("Cannot select {}", cli.input.display()))?;

    // ── Submit ───────────────────────────────────────────────────────────
    let spinner = if show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.set_message(
            session
                .selected_name()
                .unwrap_or_default()
                .to_string(),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let submit_result = session.submit().await.map(|_| ());

    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }

    if let Err(e) = submit_result {
        // Server rejections carry the service's own message verbatim; every
        // other failure formats its own hint. Either way the session has
        // already reset itself, so a rerun is safe.
        if !cli.quiet {
            eprintln!("{} {}", red("✘"), e);
        }
        debug_assert_eq!(session.state(), SessionState::Idle);
        std::process::exit(1);
    }

    // ── Download or discard ──────────────────────────────────────────────
    if cli.discard {
        let name = session.download_name().unwrap_or_default().to_string();
        session.convert_another();
        if !cli.quiet {
            eprintln!("{} converted '{}' (discarded)", green("✔"), bold(&name));
        }
        return Ok(());
    }

    let receipt = session
        .download_to(&cli.output)
        .await
        .context("Failed to save converted document")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&receipt).context("Failed to serialise receipt")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {}  →  {}  {}",
            green("✔"),
            cli.input.display(),
            bold(&receipt.path.display().to_string()),
            dim(&format!("{} bytes, {}ms", receipt.bytes, receipt.duration_ms)),
        );
    }

    Ok(())
}
