//! GPU hardware detection.
//!
//! Runs an ordered list of enumeration commands (lspci first, then the more
//! expensive lshw/glxinfo) and looks for vendor names in their output. Once
//! both vendors are confirmed the remaining commands are skipped. Cards that
//! no command reported are picked up from /sys/class/drm vendor IDs as a
//! last resort.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::exec::{is_command_available, run_command};

/// GPU vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuVendor {
    Nvidia,
    Intel,
}

impl std::fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuVendor::Nvidia => write!(f, "NVIDIA"),
            GpuVendor::Intel => write!(f, "INTEL"),
        }
    }
}

/// Commands able to name GPU hardware, cheapest first.
const GPU_PROBE_COMMANDS: &[&[&str]] = &[
    &["lspci"],
    &["lshw", "-C", "display"],
    &["glxinfo", "-B"],
];

/// PCI vendor IDs as exposed by /sys/class/drm/card*/device/vendor.
const NVIDIA_VENDOR_ID: &str = "0x10de";
const INTEL_VENDOR_ID: &str = "0x8086";

const DRM_SYSFS_ROOT: &str = "/sys/class/drm";

/// Which vendors' hardware was observed. Written only during detection,
/// read-only afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorPresence {
    pub nvidia: bool,
    pub intel: bool,
}

impl VendorPresence {
    pub fn all(&self) -> bool {
        self.nvidia && self.intel
    }

    pub fn any(&self) -> bool {
        self.nvidia || self.intel
    }

    pub fn detected(&self, vendor: GpuVendor) -> bool {
        match vendor {
            GpuVendor::Nvidia => self.nvidia,
            GpuVendor::Intel => self.intel,
        }
    }

    /// Mark vendors named anywhere in a command's output.
    fn scan_text(&mut self, output: &str) {
        let lower = output.to_lowercase();
        if lower.contains("nvidia") {
            self.nvidia = true;
        }
        if lower.contains("intel") {
            self.intel = true;
        }
    }
}

/// Detect presence of NVIDIA and Intel GPUs using available system utilities.
pub async fn detect_gpus() -> VendorPresence {
    let mut presence = VendorPresence::default();

    for command in GPU_PROBE_COMMANDS {
        if presence.all() {
            break;
        }
        if !is_command_available(command[0]) {
            continue;
        }
        if let Some(output) = run_command(command).await {
            presence.scan_text(&output);
        }
    }

    if !presence.all() {
        scan_drm_sysfs(Path::new(DRM_SYSFS_ROOT), &mut presence);
    }

    presence
}

/// Fallback signal: match PCI vendor IDs of DRM cards. An unreadable vendor
/// file skips that card only.
fn scan_drm_sysfs(root: &Path, presence: &mut VendorPresence) {
    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        // card0, card1, ... but not connector nodes like card0-DP-1
        if !name.starts_with("card") || name.contains('-') {
            continue;
        }

        let vendor_path = entry.path().join("device").join("vendor");
        match fs::read_to_string(&vendor_path) {
            Ok(vendor_id) => match vendor_id.trim() {
                NVIDIA_VENDOR_ID => presence.nvidia = true,
                INTEL_VENDOR_ID => presence.intel = true,
                other => debug!("unrecognized vendor id {other} for {name}"),
            },
            Err(err) => {
                debug!("skipping {}: {err}", vendor_path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn vendor_names_are_matched_case_insensitively() {
        let mut presence = VendorPresence::default();
        presence.scan_text(
            "01:00.0 VGA compatible controller: NVIDIA Corporation GA104 [GeForce RTX 3070]",
        );
        assert!(presence.nvidia);
        assert!(!presence.intel);

        presence.scan_text("00:02.0 VGA compatible controller: intel corporation UHD Graphics");
        assert!(presence.all());
    }

    #[test]
    fn output_without_vendor_names_sets_nothing() {
        let mut presence = VendorPresence::default();
        presence.scan_text("00:1f.3 Audio device: Advanced Micro Devices [AMD] Starship");
        assert!(!presence.any());
    }

    #[test]
    fn sysfs_scan_reads_vendor_ids_and_skips_connector_nodes() {
        let root = tempfile::tempdir().expect("tempdir");

        let card0 = root.path().join("card0").join("device");
        fs::create_dir_all(&card0).unwrap();
        fs::write(card0.join("vendor"), "0x8086\n").unwrap();

        let card1 = root.path().join("card1").join("device");
        fs::create_dir_all(&card1).unwrap();
        fs::write(card1.join("vendor"), "0x10de\n").unwrap();

        // Connector node carrying an AMD-looking vendor file must be ignored.
        let connector = root.path().join("card0-DP-1").join("device");
        fs::create_dir_all(&connector).unwrap();
        fs::write(connector.join("vendor"), "0x1002\n").unwrap();

        let mut presence = VendorPresence::default();
        scan_drm_sysfs(root.path(), &mut presence);
        assert!(presence.all());
    }

    #[test]
    fn sysfs_scan_tolerates_missing_vendor_file() {
        let root = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(root.path().join("card0").join("device")).unwrap();

        let mut presence = VendorPresence::default();
        scan_drm_sysfs(root.path(), &mut presence);
        assert!(!presence.any());
    }

    #[test]
    fn sysfs_scan_tolerates_missing_root() {
        let mut presence = VendorPresence::default();
        scan_drm_sysfs(Path::new("/no/such/sysfs/root"), &mut presence);
        assert!(!presence.any());
    }
}
