//! Driver classification: combine kernel-module and package evidence into a
//! per-vendor status.

use std::collections::BTreeSet;

use crate::detect::GpuVendor;
use crate::exec::{is_command_available, run_command};
use crate::packages::package_evidence;

pub const NVIDIA_PROPRIETARY_MODULES: &[&str] =
    &["nvidia", "nvidia_drm", "nvidia_modeset", "nvidia_uvm"];
pub const NVIDIA_OPEN_MODULES: &[&str] = &["nouveau"];
pub const INTEL_MODULES: &[&str] = &["i915"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverVariant {
    NvidiaProprietary,
    Nouveau,
    IntelOpenSource,
}

impl std::fmt::Display for DriverVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverVariant::NvidiaProprietary => write!(f, "proprietary NVIDIA"),
            DriverVariant::Nouveau => write!(f, "nouveau (open-source)"),
            DriverVariant::IntelOpenSource => write!(f, "open-source Intel"),
        }
    }
}

/// Outcome of the driver check for one vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverStatus {
    /// No module, command, or package evidence at all.
    NotInstalled,
    /// A matching kernel module is loaded (or nvidia-smi answered).
    Active {
        variant: DriverVariant,
        modules: Vec<String>,
        packages: Vec<String>,
    },
    /// Driver packages are installed but no module is loaded, e.g. a fresh
    /// install before reboot.
    Inactive {
        variant: DriverVariant,
        packages: Vec<String>,
    },
}

/// Check NVIDIA driver installation and status.
pub async fn nvidia_status(loaded_modules: &BTreeSet<String>) -> DriverStatus {
    let smi_active = nvidia_smi_responds().await;
    match classify_nvidia_modules(loaded_modules, smi_active) {
        DriverStatus::NotInstalled => {
            // No module evidence: fall back to installed packages.
            let packages = package_evidence(GpuVendor::Nvidia).await;
            if packages.is_empty() {
                DriverStatus::NotInstalled
            } else {
                DriverStatus::Inactive {
                    variant: DriverVariant::NvidiaProprietary,
                    packages,
                }
            }
        }
        status => status,
    }
}

/// Check Intel driver installation and status.
pub async fn intel_status(loaded_modules: &BTreeSet<String>) -> DriverStatus {
    let modules = intersect(INTEL_MODULES, loaded_modules);
    let packages = package_evidence(GpuVendor::Intel).await;
    classify_intel(modules, packages)
}

/// Module-level NVIDIA classification.
///
/// A responding nvidia-smi is definitive evidence that the proprietary stack
/// is active, so it upgrades the variant even when nouveau is the module
/// actually loaded. The loaded-module list is kept as observed.
fn classify_nvidia_modules(loaded_modules: &BTreeSet<String>, smi_active: bool) -> DriverStatus {
    let proprietary = intersect(NVIDIA_PROPRIETARY_MODULES, loaded_modules);
    let nouveau = intersect(NVIDIA_OPEN_MODULES, loaded_modules);

    let (mut variant, modules) = if !proprietary.is_empty() {
        (DriverVariant::NvidiaProprietary, proprietary)
    } else if !nouveau.is_empty() {
        (DriverVariant::Nouveau, nouveau)
    } else if smi_active {
        (DriverVariant::NvidiaProprietary, Vec::new())
    } else {
        return DriverStatus::NotInstalled;
    };

    if smi_active {
        variant = DriverVariant::NvidiaProprietary;
    }

    DriverStatus::Active {
        variant,
        modules,
        packages: Vec::new(),
    }
}

fn classify_intel(modules: Vec<String>, packages: Vec<String>) -> DriverStatus {
    if modules.is_empty() && packages.is_empty() {
        return DriverStatus::NotInstalled;
    }
    DriverStatus::Active {
        variant: DriverVariant::IntelOpenSource,
        modules,
        packages,
    }
}

async fn nvidia_smi_responds() -> bool {
    is_command_available("nvidia-smi") && run_command(&["nvidia-smi"]).await.is_some()
}

/// Sorted intersection of a known-module table with the loaded set.
fn intersect(wanted: &[&str], loaded: &BTreeSet<String>) -> Vec<String> {
    let mut found: Vec<String> = wanted
        .iter()
        .filter(|module| loaded.contains(**module))
        .map(|module| module.to_string())
        .collect();
    found.sort_unstable();
    found
}
