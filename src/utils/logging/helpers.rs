//! Simple logging helper functions for pipeline milestones

use crate::encoding::{EncodeMode, ScalePlan, SourceProbe};
use crate::utils::filesystem::format_file_size;

/// Logs what the probe found and the scale derived from it
pub fn log_probe_result(probe: &SourceProbe, plan: &ScalePlan) {
    tracing::info!(
        "Source {}x{}, {:.2}s{}; fixing {} to {}",
        probe.width,
        probe.height,
        probe.duration_seconds,
        if probe.duration_known { "" } else { " (assumed)" },
        plan.axis.as_str(),
        plan.long_side
    );
}

/// Logs the result of one encoder pass against the hard cap
pub fn log_encode_attempt(mode: EncodeMode, size_bytes: u64, hard_cap_bytes: u64) {
    let verdict = if size_bytes <= hard_cap_bytes {
        "fits"
    } else {
        "too big"
    };
    match mode.bitrate_bps() {
        Some(bitrate) => tracing::info!(
            "{} pass at {} bps: {} ({})",
            mode.as_str(),
            bitrate,
            format_file_size(size_bytes),
            verdict
        ),
        None => tracing::info!(
            "{} pass: {} ({})",
            mode.as_str(),
            format_file_size(size_bytes),
            verdict
        ),
    }
}

/// Logs how a sticker landed in its set
pub fn log_upsert_result(set_name: &str, created: bool) {
    if created {
        tracing::info!("Created sticker set {}", set_name);
    } else {
        tracing::info!("Added sticker to set {}", set_name);
    }
}
