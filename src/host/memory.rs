//! Memory probes.
//!
//! The host gates work on available memory. Probes report what a device has
//! free; [`admit`] compares that with [`REQUIRED_MEMORY_GB`]. A probe that
//! cannot tell returns `None`, which admits the work.

use std::fs;
use std::path::PathBuf;

use super::{Device, REQUIRED_MEMORY_GB, supported_devices};
use crate::error::BatchError;

/// Reports available memory per device.
pub trait MemoryProbe: Send + Sync {
    /// Available memory on `device` in GB, or `None` if unknown.
    fn available_gb(&self, device: Device) -> Option<f64>;
}

/// Always reports the same amount, for every device.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub f64);

impl MemoryProbe for StaticProbe {
    fn available_gb(&self, _device: Device) -> Option<f64> {
        Some(self.0)
    }
}

/// Reads `MemAvailable` from a `/proc/meminfo`-style file for the CPU.
#[derive(Debug, Clone)]
pub struct MeminfoProbe {
    path: PathBuf,
}

impl Default for MeminfoProbe {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/proc/meminfo"),
        }
    }
}

impl MeminfoProbe {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// `MemAvailable:   16384 kB` -> GB
fn parse_mem_available(meminfo: &str) -> Option<f64> {
    let line = meminfo
        .lines()
        .find(|line| line.starts_with("MemAvailable:"))?;
    let kb: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb / (1024.0 * 1024.0))
}

impl MemoryProbe for MeminfoProbe {
    fn available_gb(&self, device: Device) -> Option<f64> {
        if device != Device::Cpu {
            return None;
        }
        let contents = fs::read_to_string(&self.path).ok()?;
        parse_mem_available(&contents)
    }
}

/// Decide whether a render may start on `device`.
pub fn admit(probe: &dyn MemoryProbe, device: Device) -> Result<(), BatchError> {
    if !supported_devices().contains(&device) {
        return Err(BatchError::Unavailable(format!(
            "device {} is not supported",
            device
        )));
    }

    match probe.available_gb(device) {
        Some(available) if available < REQUIRED_MEMORY_GB => {
            Err(BatchError::Unavailable(format!(
                "{:.2} GB available on {}, {:.2} GB required",
                available, device, REQUIRED_MEMORY_GB
            )))
        }
        Some(available) => {
            tracing::debug!(%device, available_gb = available, "memory admission granted");
            Ok(())
        }
        None => {
            tracing::debug!(%device, "available memory unknown, admitting");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_mem_available() {
        let meminfo = "MemTotal:       32768000 kB\nMemFree:  100 kB\nMemAvailable:    2097152 kB\n";
        assert_eq!(parse_mem_available(meminfo), Some(2.0));
        assert_eq!(parse_mem_available("MemTotal: 1 kB\n"), None);
    }

    #[test]
    fn test_meminfo_probe_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MemAvailable:    1048576 kB").unwrap();

        let probe = MeminfoProbe::with_path(file.path());
        assert_eq!(probe.available_gb(Device::Cpu), Some(1.0));
        assert_eq!(probe.available_gb(Device::Cuda(0)), None);
    }

    #[test]
    fn test_meminfo_probe_missing_file() {
        let probe = MeminfoProbe::with_path("/no/such/meminfo");
        assert_eq!(probe.available_gb(Device::Cpu), None);
    }

    #[test]
    fn test_admit() {
        assert!(admit(&StaticProbe(8.0), Device::Cpu).is_ok());
        assert!(admit(&StaticProbe(0.5), Device::Cpu).is_ok());
        assert!(matches!(
            admit(&StaticProbe(0.25), Device::Cpu),
            Err(BatchError::Unavailable(_))
        ));
        assert!(matches!(
            admit(&StaticProbe(64.0), Device::Cuda(0)),
            Err(BatchError::Unavailable(_))
        ));
        assert!(admit(&MeminfoProbe::with_path("/no/such/meminfo"), Device::Cpu).is_ok());
    }
}
