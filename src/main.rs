//! gpu-doctor - Linux GPU hardware and driver detection
//!
//! Single-pass diagnostic that:
//! - Confirms NVIDIA/Intel GPU hardware via lspci/lshw/glxinfo (sysfs fallback)
//! - Inspects loaded kernel modules and installed driver packages
//! - Classifies the driver stack per vendor (proprietary, open-source, inactive)
//!
//! No flags, no daemon mode, no state: run it, read the report.

mod detect;
mod driver;
mod exec;
mod modules;
mod packages;
mod probe;
mod report;

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use crate::detect::GpuVendor;

/// Report NVIDIA/Intel GPU hardware and driver status on this Linux host
#[derive(Parser)]
#[command(name = "gpu-doctor")]
#[command(version)]
#[command(about = "Report NVIDIA/Intel GPU hardware and driver status")]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    report::print_banner();

    if let Err(err) = probe::ensure_required_tools() {
        println!("\n{} {err}", "Aborting:".bright_red());
        std::process::exit(1);
    }

    // External commands carry a per-invocation timeout; the pipeline itself
    // is sequential, so a single-threaded runtime is enough.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run());

    Ok(())
}

async fn run() {
    // Detect once up front so the per-vendor checks never re-run probes.
    let gpus = detect::detect_gpus().await;
    let loaded_modules = modules::loaded_kernel_modules().await;
    println!();

    if !gpus.any() {
        report::print_no_hardware_warning();
        return;
    }

    for vendor in [GpuVendor::Nvidia, GpuVendor::Intel] {
        let status = if gpus.detected(vendor) {
            Some(match vendor {
                GpuVendor::Nvidia => driver::nvidia_status(&loaded_modules).await,
                GpuVendor::Intel => driver::intel_status(&loaded_modules).await,
            })
        } else {
            None
        };
        report::print_vendor_report(vendor, status.as_ref());
        println!();
    }
}
