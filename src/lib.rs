//! # doc2pdf-client
//!
//! Client for a doc2pdf conversion service: upload a document as a multipart
//! POST, receive the converted PDF, and manage its lifecycle.
//!
//! ## Why this crate?
//!
//! The doc2pdf service speaks a deliberately small HTTP contract — one
//! `POST /convert` route taking a `file` multipart field and answering with
//! the converted bytes (plus an optional `Content-Disposition` name) or a
//! plain-text error. This crate wraps that contract in a typed state
//! machine so double submits, leaked artifacts, and swallowed server
//! messages are API-level impossibilities rather than UI accidents.
//!
//! ## Session lifecycle
//!
//! ```text
//! Idle ── select ──▶ Idle ── submit ──▶ Submitting
//!                                           │
//!                    ┌── 2xx ──────────────▶ Success ── download_to / convert_another ──▶ Idle
//!                    └── non-2xx / transport error ──▶ Idle (selection cleared)
//! ```
//!
//! At most one converted [`Artifact`] is alive at a time; every path out of
//! `Success` releases it exactly once. No retries, no cancellation — a
//! failed attempt is terminal and the session is left resubmittable.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2pdf_client::{convert_to_dir, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .endpoint("http://localhost:5000/convert")
//!         .build()?;
//!     let receipt = convert_to_dir("report.docx", ".", &config).await?;
//!     println!("saved {} ({} bytes)", receipt.filename, receipt.bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! doc2pdf-client = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod artifact;
pub mod config;
pub mod convert;
pub mod error;
pub mod filename;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use artifact::Artifact;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use convert::{convert, convert_sync, convert_to_dir};
pub use error::ConvertError;
pub use session::{DownloadReceipt, SessionState, UploadSession};
