use super::modes::EncodeMode;
use super::scale::ScalePlan;
use crate::config::EncodingConfig;
use std::path::{Path, PathBuf};

/// Longest clip the sticker platform accepts, with a margin below its 3s limit.
pub const MAX_CLIP_SECONDS: f64 = 2.9;

/// Everything an encode of one source shares across passes.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeJob {
    source_path: PathBuf,
    scale: ScalePlan,
    max_duration_seconds: f64,
    framerate: u32,
}

impl EncodeJob {
    pub fn new<P: Into<PathBuf>>(source_path: P, scale: ScalePlan, config: &EncodingConfig) -> Self {
        Self {
            source_path: source_path.into(),
            scale,
            max_duration_seconds: config.max_duration_seconds.min(MAX_CLIP_SECONDS),
            framerate: config.framerate,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn scale(&self) -> ScalePlan {
        self.scale
    }

    pub fn max_duration_seconds(&self) -> f64 {
        self.max_duration_seconds
    }

    pub fn framerate(&self) -> u32 {
        self.framerate
    }

    pub fn request<P: Into<PathBuf>>(&self, mode: EncodeMode, output_path: P) -> EncodeRequest {
        EncodeRequest {
            job: self.clone(),
            mode,
            output_path: output_path.into(),
        }
    }
}

/// A single encoder invocation: the job, the rate-control mode and the file to write.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeRequest {
    pub job: EncodeJob,
    pub mode: EncodeMode,
    pub output_path: PathBuf,
}

impl EncodeRequest {
    pub fn build_ffmpeg_args(&self) -> Vec<String> {
        let job = &self.job;
        let mut args = vec![
            "-i".to_string(),
            job.source_path.to_string_lossy().to_string(),
            "-c:v".to_string(),
            "libvpx-vp9".to_string(),
            "-an".to_string(),
            "-vf".to_string(),
            format!("{},fps={}", job.scale.filter(), job.framerate),
            "-t".to_string(),
            format_timestamp(job.max_duration_seconds),
        ];
        args.extend(self.mode.build_ffmpeg_args());
        args.push(self.output_path.to_string_lossy().to_string());
        args
    }
}

/// `HH:MM:SS.mmm`, as accepted by ffmpeg's `-t`.
pub fn format_timestamp(seconds: f64) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis / 60_000) % 60;
    let secs = (total_millis / 1000) % 60;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::scale;
    use pretty_assertions::assert_eq;

    fn job() -> EncodeJob {
        EncodeJob::new("/scratch/in", scale::plan(1920, 1080), &EncodingConfig::default())
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(2.9), "00:00:02.900");
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(3725.25), "01:02:05.250");
    }

    #[test]
    fn test_quality_args() {
        let request = job().request(EncodeMode::Quality { crf: 30 }, "/scratch/out.temp.webm");
        assert_eq!(
            request.build_ffmpeg_args(),
            vec![
                "-i",
                "/scratch/in",
                "-c:v",
                "libvpx-vp9",
                "-an",
                "-vf",
                "scale=512:-1,fps=30",
                "-t",
                "00:00:02.900",
                "-b:v",
                "0",
                "-crf",
                "30",
                "/scratch/out.temp.webm",
            ]
        );
    }

    #[test]
    fn test_every_pass_drops_audio_and_caps_duration() {
        let job = EncodeJob::new("/in", scale::plan(720, 1280), &EncodingConfig::default());
        let modes = [
            EncodeMode::Quality { crf: 30 },
            crate::encoding::SizeBudget::default().compress_mode(42.0, true),
        ];
        for mode in modes {
            let args = job.request(mode, "/out.webm").build_ffmpeg_args();
            assert!(args.contains(&"-an".to_string()));
            assert!(args.contains(&"scale=-1:512,fps=30".to_string()));
            let t = args.iter().position(|a| a == "-t").unwrap();
            assert_eq!(args[t + 1], "00:00:02.900");
            assert_eq!(args.last().unwrap(), "/out.webm");
        }
    }

    #[test]
    fn test_configured_duration_never_exceeds_clip_limit() {
        let config = EncodingConfig {
            max_duration_seconds: 10.0,
            ..EncodingConfig::default()
        };
        let job = EncodeJob::new("/in", scale::plan(10, 10), &config);
        assert_eq!(job.max_duration_seconds(), MAX_CLIP_SECONDS);

        let config = EncodingConfig {
            max_duration_seconds: 1.5,
            ..EncodingConfig::default()
        };
        let job = EncodeJob::new("/in", scale::plan(10, 10), &config);
        assert_eq!(job.max_duration_seconds(), 1.5);
    }
}
