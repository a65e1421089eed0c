//! Loaded kernel module inspection via `lsmod`.

use std::collections::BTreeSet;

use crate::exec::run_command;

/// Get the set of currently loaded kernel module names.
///
/// Empty or unparseable output degrades to an empty set; driver detection
/// then falls back to package evidence alone.
pub async fn loaded_kernel_modules() -> BTreeSet<String> {
    match run_command(&["lsmod"]).await {
        Some(output) => parse_lsmod(&output),
        None => BTreeSet::new(),
    }
}

/// First whitespace-delimited token of every line after the header.
fn parse_lsmod(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_module_names_and_skips_header() {
        let output = "Module Size Used by\nnvidia 123 0\nnvidia_drm 10 0\n";
        let modules = parse_lsmod(output);
        assert_eq!(
            modules.iter().collect::<Vec<_>>(),
            vec!["nvidia", "nvidia_drm"]
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        let output = "Module Size Used by\ni915 456 12\n\nsnd_hda_intel 78 3\n";
        let modules = parse_lsmod(output);
        assert!(modules.contains("i915"));
        assert!(modules.contains("snd_hda_intel"));
        assert_eq!(modules.len(), 2);
    }

    #[test]
    fn header_only_output_yields_empty_set() {
        assert!(parse_lsmod("Module Size Used by\n").is_empty());
        assert!(parse_lsmod("").is_empty());
    }
}
