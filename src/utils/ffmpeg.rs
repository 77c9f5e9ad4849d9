use crate::encoding::{parse_probe_output, EncodeRequest, MediaBackend, SourceProbe};
use crate::utils::{Error, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tracing::{debug, error};

/// Lines of ffmpeg stderr kept in error messages.
const STDERR_TAIL_LINES: usize = 8;

#[derive(Debug, Clone)]
pub struct FfmpegWrapper {
    ffmpeg_path: String,
    ffprobe_path: String,
    timeout: Duration,
    fallback_duration: f64,
}

impl FfmpegWrapper {
    pub fn new(ffmpeg_path: String, ffprobe_path: String, timeout_seconds: u64) -> Self {
        Self {
            ffmpeg_path,
            ffprobe_path,
            timeout: Duration::from_secs(timeout_seconds),
            fallback_duration: crate::encoding::FALLBACK_DURATION_SECONDS,
        }
    }

    pub fn with_fallback_duration(mut self, seconds: f64) -> Self {
        self.fallback_duration = seconds;
        self
    }

    pub async fn check_availability(&self) -> Result<()> {
        for tool in [&self.ffmpeg_path, &self.ffprobe_path] {
            let output = TokioCommand::new(tool)
                .arg("-version")
                .output()
                .await
                .map_err(|e| Error::ffmpeg(format!("{} could not be started: {}", tool, e)))?;

            if !output.status.success() {
                return Err(Error::ffmpeg(format!(
                    "{} is not available or not executable",
                    tool
                )));
            }
        }

        Ok(())
    }

    /// Run ffprobe with custom arguments and return stdout as string. Bound by
    /// the same wall-clock timeout as ffmpeg; the child is killed on expiry.
    pub async fn run_ffprobe(&self, args: &[&str]) -> Result<String> {
        debug!("Running ffprobe with args: {:?}", args);

        let child = TokioCommand::new(&self.ffprobe_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::probe(format!("failed to run ffprobe: {}", e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                Error::probe(format!(
                    "ffprobe timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Error::probe(format!("failed to run ffprobe: {}", e)))?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(Error::probe(format!("ffprobe failed: {}", error_msg.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run ffmpeg to completion under the wall-clock timeout. The child is
    /// killed when the timeout elapses.
    pub async fn run_ffmpeg(&self, args: &[String]) -> Result<()> {
        let mut cmd_args = vec!["-y".to_string(), "-nostdin".to_string()];
        cmd_args.extend_from_slice(args);

        debug!("Running: {} {}", self.ffmpeg_path, cmd_args.join(" "));

        let child = TokioCommand::new(&self.ffmpeg_path)
            .args(&cmd_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::encode(format!("failed to spawn ffmpeg: {}", e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| Error::EncodeTimeout {
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| Error::encode(format!("ffmpeg failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail = stderr_tail(&stderr, STDERR_TAIL_LINES);
            error!("ffmpeg exited with {}: {}", output.status, tail);
            return Err(Error::encode(format!(
                "ffmpeg exited with {}: {}",
                output.status, tail
            )));
        }

        Ok(())
    }
}

impl MediaBackend for FfmpegWrapper {
    async fn probe(&self, path: &Path) -> Result<SourceProbe> {
        let input_path = path.to_string_lossy();
        let stdout = self
            .run_ffprobe(&[
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height,duration",
                "-of",
                "csv=s=x:p=0",
                &input_path,
            ])
            .await?;

        parse_probe_output(&stdout, self.fallback_duration)
    }

    async fn encode(&self, request: &EncodeRequest) -> Result<()> {
        self.run_ffmpeg(&request.build_ffmpeg_args()).await?;

        if !request.output_path.exists() {
            return Err(Error::encode(
                "ffmpeg completed but output file not found",
            ));
        }

        Ok(())
    }
}

fn stderr_tail(stderr: &str, lines: usize) -> String {
    let collected: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let start = collected.len().saturating_sub(lines);
    collected[start..].join(" | ")
}
