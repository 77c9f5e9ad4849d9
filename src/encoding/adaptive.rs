use super::backend::MediaBackend;
use super::job::EncodeJob;
use super::modes::{EncodeMode, SizeBudget};
use super::probe::SourceProbe;
use crate::config::EncodingConfig;
use crate::utils::filesystem::{get_file_size, remove_file_quietly, replace_file};
use crate::utils::logging::log_encode_attempt;
use crate::utils::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct EncodeAttempt {
    pub mode: EncodeMode,
    pub result_path: PathBuf,
    pub result_size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOutcome {
    pub output_path: PathBuf,
    pub size_bytes: u64,
    pub attempts: Vec<EncodeAttempt>,
}

impl EncodeOutcome {
    pub fn compressed(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| matches!(a.mode, EncodeMode::Compress { .. }))
    }
}

/// Quality pass first; a bitrate-constrained compress pass only when the
/// quality result does not fit the size budget.
pub struct AdaptiveEncoder<'a, B> {
    backend: &'a B,
    budget: SizeBudget,
    quality_crf: u32,
    hard_size_truncation: bool,
}

impl<'a, B: MediaBackend> AdaptiveEncoder<'a, B> {
    pub fn new(backend: &'a B, config: &EncodingConfig) -> Self {
        Self {
            backend,
            budget: SizeBudget::from_config(config),
            quality_crf: config.quality_crf,
            hard_size_truncation: config.hard_size_truncation,
        }
    }

    pub fn budget(&self) -> SizeBudget {
        self.budget
    }

    /// Encodes `job` into `output_path`. The quality pass writes to
    /// `temp_path` and is only moved into place once it is known to fit.
    pub async fn encode(
        &self,
        job: &EncodeJob,
        probe: &SourceProbe,
        temp_path: &Path,
        output_path: &Path,
    ) -> Result<EncodeOutcome> {
        let quality_mode = EncodeMode::Quality {
            crf: self.quality_crf,
        };
        self.backend
            .encode(&job.request(quality_mode, temp_path))
            .await?;
        let quality_size = get_file_size(temp_path).await?;
        log_encode_attempt(quality_mode, quality_size, self.budget.hard_cap_bytes);

        let quality_attempt = EncodeAttempt {
            mode: quality_mode,
            result_path: temp_path.to_path_buf(),
            result_size_bytes: quality_size,
        };

        if self.budget.fits(quality_size) {
            replace_file(temp_path, output_path).await?;
            info!("Quality pass fits the size budget, no compress pass needed");
            return Ok(EncodeOutcome {
                output_path: output_path.to_path_buf(),
                size_bytes: quality_size,
                attempts: vec![quality_attempt],
            });
        }

        // Bitrate is derived from the source duration rather than the capped
        // clip length; long sources therefore get a conservative bitrate.
        let compress_mode = self
            .budget
            .compress_mode(probe.duration_seconds, self.hard_size_truncation);
        debug!(
            "Compress pass: source duration {:.2}s, clip length {:.2}s, bitrate {:?}",
            probe.duration_seconds,
            job.max_duration_seconds(),
            compress_mode.bitrate_bps()
        );

        remove_file_quietly(temp_path);
        self.backend
            .encode(&job.request(compress_mode, output_path))
            .await?;
        let compress_size = get_file_size(output_path).await?;
        log_encode_attempt(compress_mode, compress_size, self.budget.hard_cap_bytes);

        if !self.budget.fits(compress_size) {
            warn!(
                "Compress pass still produced {} bytes (limit {})",
                compress_size, self.budget.hard_cap_bytes
            );
            return Err(Error::SizeConstraintUnmet {
                size: compress_size,
                limit: self.budget.hard_cap_bytes,
            });
        }

        Ok(EncodeOutcome {
            output_path: output_path.to_path_buf(),
            size_bytes: compress_size,
            attempts: vec![
                quality_attempt,
                EncodeAttempt {
                    mode: compress_mode,
                    result_path: output_path.to_path_buf(),
                    result_size_bytes: compress_size,
                },
            ],
        })
    }
}
