//! Capability probe: which external tools are usable on this host.
//!
//! `lspci` and `lsmod` are mandatory; without them no meaningful detection is
//! possible and the run aborts. Everything else (lshw, glxinfo, the package
//! managers, nvidia-smi) is optional and is skipped individually at the call
//! site when absent.

use thiserror::Error;
use tracing::debug;

use crate::exec::is_command_available;

pub const REQUIRED_TOOLS: &[&str] = &["lspci", "lsmod"];

/// Optional helpers. Only probed here for diagnostics; each detection step
/// re-checks availability before invoking a tool.
pub const OPTIONAL_TOOLS: &[&str] = &[
    "lshw",
    "glxinfo",
    "nvidia-smi",
    "dpkg",
    "rpm",
    "pacman",
    "zypper",
];

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("missing required system utilities: {}", .0.join(", "))]
    MissingRequiredTools(Vec<String>),
}

/// Verify the mandatory tools resolve on PATH.
///
/// Logs absent optional tools at debug level so a surprising "not found"
/// report can be traced back to missing utilities.
pub fn ensure_required_tools() -> Result<(), ProbeError> {
    for tool in OPTIONAL_TOOLS {
        if !is_command_available(tool) {
            debug!("optional tool not available, will skip: {tool}");
        }
    }

    let missing: Vec<String> = REQUIRED_TOOLS
        .iter()
        .filter(|tool| !is_command_available(tool))
        .map(|tool| tool.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ProbeError::MissingRequiredTools(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tools_error_lists_every_name() {
        let err = ProbeError::MissingRequiredTools(vec!["lspci".into(), "lsmod".into()]);
        assert_eq!(
            err.to_string(),
            "missing required system utilities: lspci, lsmod"
        );
    }
}
