//! Human-readable report output.

use colored::*;

use crate::detect::GpuVendor;
use crate::driver::DriverStatus;

pub fn print_banner() {
    println!(
        "\n{}",
        "Linux GPU & Driver Detection Utility".bright_magenta().bold()
    );
    println!("{}", "=".repeat(40));
}

/// Print the section for one vendor. `status` is `None` when no hardware was
/// detected for it (driver checks are skipped in that case).
pub fn print_vendor_report(vendor: GpuVendor, status: Option<&DriverStatus>) {
    println!(
        "{}",
        format!("----- {vendor} GPU -----").bright_magenta()
    );

    let Some(status) = status else {
        println!(
            "{} {vendor} hardware not found.",
            "Detection:".bright_yellow()
        );
        return;
    };

    println!("{} {vendor} hardware found.", "Detection:".bright_green());

    match status {
        DriverStatus::NotInstalled => {
            println!(
                "{} No active {vendor} driver detected.",
                "Driver Status:".bright_red()
            );
            println!(
                "{}",
                "  -> Consider installing the appropriate drivers for your distribution."
                    .bright_yellow()
            );
        }
        DriverStatus::Active {
            variant,
            modules,
            packages,
        } => {
            println!(
                "{} {} driver detected.",
                "Driver Status:".bright_green(),
                capitalize(&variant.to_string())
            );
            print_evidence(modules, packages);
        }
        DriverStatus::Inactive { variant, packages } => {
            println!(
                "{} {} (inactive) driver detected.",
                "Driver Status:".bright_green(),
                capitalize(&variant.to_string())
            );
            print_evidence(&[], packages);
        }
    }
}

/// Printed when neither vendor's hardware turned up anywhere.
pub fn print_no_hardware_warning() {
    println!(
        "{}",
        "Warning: Could not detect any supported GPU hardware (NVIDIA, Intel).".bright_yellow()
    );
    println!(
        "{}",
        "This may be due to missing optional utilities (lshw, glxinfo) or an unsupported GPU."
            .bright_cyan()
    );
}

fn print_evidence(modules: &[String], packages: &[String]) {
    if !modules.is_empty() {
        println!(
            "{} {}",
            "  -> Loaded Modules:".bright_cyan(),
            modules.join(", ")
        );
    }
    if !packages.is_empty() {
        println!(
            "{} {}",
            "  -> Detected Packages:".bright_cyan(),
            packages.join(", ")
        );
    }
}

/// Upper-case the first character, leaving the rest untouched (driver labels
/// carry vendor capitalization like "NVIDIA").
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
