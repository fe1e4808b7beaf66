//! # Batch Processing
//!
//! Runs the renderer over every file in a host request.
//!
//! ## Request Format
//!
//! ```json
//! {
//!   "pparams": { "background_color": [255, 255, 255], "dots_color": [0, 0, 0] },
//!   "devid": -1,
//!   "process_files_info": [
//!     {
//!       "src_img_path": "in/cat.jpg",
//!       "dst_img_path": "out/cat_polka",
//!       "placeholder_path": "queue/cat.placeholder"
//!     }
//!   ]
//! }
//! ```
//!
//! ## Per-Item Flow
//!
//! ```text
//! render ──► stamp ──► save <dst_img_path>.png ──► Rendered
//!    │         │          │
//!    └─────────┴──────────┴──► ledger + Failed
//!
//! then, always: remove placeholder_path
//! ```
//!
//! A failing item never stops the batch. The only batch-level failure is
//! admission: an unsupported device or too little memory rejects the request
//! before any item is touched, and placeholders are left for the scheduler.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use super::memory::{MemoryProbe, admit};
use super::stamp::Stamper;
use super::Device;
use crate::config::PolkaConfig;
use crate::error::{BatchError, PolkaError};
use crate::render::{self, PolkaRenderer};

/// One file to process.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    pub src_img_path: PathBuf,
    /// Output path without extension; `.png` is appended.
    pub dst_img_path: PathBuf,
    /// Marker file the host created when queueing this item.
    pub placeholder_path: PathBuf,
    #[serde(default)]
    pub process: Option<String>,
    #[serde(default)]
    pub started: Option<serde_json::Value>,
    #[serde(default)]
    pub selection_dir: Option<PathBuf>,
}

impl FileInfo {
    /// Where the rendered PNG goes.
    pub fn output_path(&self) -> PathBuf {
        let mut path = OsString::from(self.dst_img_path.as_os_str());
        path.push(".png");
        PathBuf::from(path)
    }
}

fn default_devid() -> i32 {
    -1
}

/// A batch request as the host sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    /// Loose parameter bag, validated into a [`PolkaConfig`].
    pub pparams: serde_json::Value,
    #[serde(default = "default_devid")]
    pub devid: i32,
    pub process_files_info: Vec<FileInfo>,
}

impl BatchRequest {
    pub fn from_json(json: &str) -> Result<Self, BatchError> {
        serde_json::from_str(json).map_err(|e| BatchError::Request(e.to_string()))
    }

    pub fn device(&self) -> Device {
        Device::from_id(self.devid)
    }
}

/// What happened to one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ItemOutcome {
    Rendered { source: PathBuf, output: PathBuf },
    Failed { source: PathBuf, reason: String },
}

impl ItemOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, ItemOutcome::Rendered { .. })
    }
}

/// A failure recorded against its source image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub source: PathBuf,
    pub message: String,
}

/// Failures collected over a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorLedger {
    entries: Vec<LedgerEntry>,
}

impl ErrorLedger {
    pub fn add_error(&mut self, source: &Path, message: impl Into<String>) {
        self.entries.push(LedgerEntry {
            source: source.to_path_buf(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Result of a whole batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
    pub ledger: ErrorLedger,
}

impl BatchReport {
    pub fn rendered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_rendered()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.rendered()
    }
}

/// Render, stamp, and save a single item.
fn render_item(
    renderer: &PolkaRenderer,
    info: &FileInfo,
    config: &PolkaConfig,
    stamper: &dyn Stamper,
) -> Result<PathBuf, PolkaError> {
    let source = render::loader::open(&info.src_img_path)?;
    let mut canvas = renderer.render(&source, config)?;
    stamper.stamp(&mut canvas)?;

    let output = info.output_path();
    canvas
        .save_with_format(&output, ImageFormat::Png)
        .map_err(|e| PolkaError::Save(format!("{}: {}", output.display(), e)))?;

    Ok(output)
}

/// Process every item of `request`.
///
/// Admission is checked once up front. After that, each item yields exactly
/// one [`ItemOutcome`], failures are also added to the report's ledger, and
/// every item's placeholder is removed whether it succeeded or not.
pub fn process_batch(
    request: &BatchRequest,
    stamper: &dyn Stamper,
    probe: &dyn MemoryProbe,
) -> Result<BatchReport, BatchError> {
    admit(probe, request.device())?;

    tracing::debug!(pparams = %request.pparams, "batch parameters");
    let config = PolkaConfig::from_params(&request.pparams);
    let renderer = PolkaRenderer::new();
    let mut report = BatchReport::default();

    for info in &request.process_files_info {
        let started = Instant::now();

        let result = match &config {
            Ok(config) => render_item(&renderer, info, config, stamper).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let outcome = match result {
            Ok(output) => {
                tracing::info!(
                    source = %info.src_img_path.display(),
                    output = %output.display(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "rendered"
                );
                ItemOutcome::Rendered {
                    source: info.src_img_path.clone(),
                    output,
                }
            }
            Err(reason) => {
                tracing::error!(source = %info.src_img_path.display(), %reason, "render failed");
                report.ledger.add_error(&info.src_img_path, reason.clone());
                ItemOutcome::Failed {
                    source: info.src_img_path.clone(),
                    reason,
                }
            }
        };
        report.outcomes.push(outcome);

        if let Err(e) = fs::remove_file(&info.placeholder_path) {
            tracing::warn!(
                placeholder = %info.placeholder_path.display(),
                error = %e,
                "failed to remove placeholder"
            );
        }
    }

    Ok(report)
}
