//! # Plugin Host Layer
//!
//! Everything around the rendering core that a batch image-processing host
//! needs: a module descriptor, device and memory declarations, the
//! capabilities the host injects ([`Stamper`], [`MemoryProbe`]), and the
//! batch loop that renders, stamps, saves, and cleans up after each item.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | Batch request processing with per-item outcomes |
//! | [`memory`] | Memory probes and admission checks |
//! | [`stamp`] | Post-render overlays (QR code stamp) |

pub mod batch;
pub mod memory;
pub mod stamp;

use std::fmt;

use serde::Serialize;

pub use batch::{BatchReport, BatchRequest, ErrorLedger, FileInfo, ItemOutcome, process_batch};
pub use memory::{MeminfoProbe, MemoryProbe, StaticProbe};
pub use stamp::{NoStamp, QrStamper, Stamper};

/// Estimated peak memory of one render, in GB.
pub const REQUIRED_MEMORY_GB: f64 = 0.5;

/// A compute device the host can schedule work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Cuda(u32),
}

impl Device {
    /// Host device ids: negative means CPU, `0..` are CUDA devices.
    pub fn from_id(devid: i32) -> Self {
        match u32::try_from(devid) {
            Ok(id) => Device::Cuda(id),
            Err(_) => Device::Cpu,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(id) => write!(f, "cuda:{}", id),
        }
    }
}

/// Devices this module can run on.
pub fn supported_devices() -> &'static [Device] {
    &[Device::Cpu]
}

/// One user-facing feature of the module.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub feature_name: &'static str,
    /// Web UI page that collects the feature's parameters.
    pub pagename: &'static str,
}

/// What the host shows about this module in its process dialog.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    pub module: &'static str,
    pub module_id: &'static str,
    pub version: &'static str,
    pub category: &'static str,
    pub features: Vec<Feature>,
    pub supported_devices: Vec<Device>,
    pub required_memory_gb: f64,
}

/// The module descriptor.
pub fn module_info() -> ModuleInfo {
    ModuleInfo {
        module: "PolkaDots",
        module_id: "polkadots",
        version: "1.2",
        category: "Artistic",
        features: vec![Feature {
            feature_name: "Polka Dots",
            pagename: "PolkaDots.html",
        }],
        supported_devices: supported_devices().to_vec(),
        required_memory_gb: REQUIRED_MEMORY_GB,
    }
}
