//! Installed-package evidence via the host's package managers.
//!
//! Each known manager is queried only if its binary is on PATH; its listing
//! is then matched against a vendor-specific case-insensitive pattern. A
//! host with several managers installed can contribute several evidence
//! records for the same vendor.

use regex::RegexBuilder;
use tracing::error;

use crate::detect::GpuVendor;
use crate::exec::{is_command_available, run_command};

pub struct PackageManager {
    pub name: &'static str,
    pub list_command: &'static [&'static str],
    nvidia_pattern: &'static str,
    intel_pattern: &'static str,
}

impl PackageManager {
    fn pattern_for(&self, vendor: GpuVendor) -> &'static str {
        match vendor {
            GpuVendor::Nvidia => self.nvidia_pattern,
            GpuVendor::Intel => self.intel_pattern,
        }
    }
}

pub const PACKAGE_MANAGERS: &[PackageManager] = &[
    PackageManager {
        name: "dpkg",
        list_command: &["dpkg", "-l"],
        nvidia_pattern: r"nvidia-driver|nvidia-\d+",
        intel_pattern: r"i965-va-driver|intel-media-va-driver|xserver-xorg-video-intel",
    },
    PackageManager {
        name: "rpm",
        list_command: &["rpm", "-qa"],
        nvidia_pattern: r"nvidia-driver|kmod-nvidia|akmod-nvidia",
        intel_pattern: r"libva-intel-driver|xorg-x11-drv-intel",
    },
    PackageManager {
        name: "pacman",
        list_command: &["pacman", "-Q"],
        nvidia_pattern: r"nvidia",
        intel_pattern: r"libva-intel-driver|xf86-video-intel",
    },
    PackageManager {
        name: "zypper",
        list_command: &["zypper", "se", "-i"],
        nvidia_pattern: r"nvidia",
        intel_pattern: r"libva-intel-driver|xorg-x11-drv-intel",
    },
];

/// Query every available package manager for driver packages of `vendor`.
/// Returns one "Found via {manager}" record per matching manager.
pub async fn package_evidence(vendor: GpuVendor) -> Vec<String> {
    let mut found_via = Vec::new();
    for manager in PACKAGE_MANAGERS {
        if !is_command_available(manager.list_command[0]) {
            continue;
        }
        let Some(listing) = run_command(manager.list_command).await else {
            continue;
        };
        if pattern_matches(manager.pattern_for(vendor), &listing) {
            found_via.push(format!("Found via {}", manager.name));
        }
    }
    found_via
}

fn pattern_matches(pattern: &str, haystack: &str) -> bool {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(haystack),
        Err(err) => {
            // Patterns are const tables; this only fires on a bad edit.
            error!("invalid package pattern {pattern:?}: {err}");
            false
        }
    }
}
