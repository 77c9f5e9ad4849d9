use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory for per-request scratch files
    pub temp_dir: String,
    pub max_concurrent_jobs: usize,
    /// Requests allowed to wait for a worker slot before new ones are turned away
    pub max_queued_jobs: usize,
    pub encode_timeout_seconds: u64,
    pub purge_stale_scratch: bool,
    /// Minimum age before a leftover scratch file is purged at startup
    pub stale_scratch_minutes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            temp_dir: std::env::temp_dir()
                .join("sticker_scratch")
                .to_string_lossy()
                .to_string(),
            max_concurrent_jobs: cores,
            max_queued_jobs: 16,
            encode_timeout_seconds: 120,
            purge_stale_scratch: true,
            stale_scratch_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub target_long_side: u32,
    pub framerate: u32,
    pub max_duration_seconds: f64,
    pub quality_crf: u32,
    /// Substituted when the probe cannot report a duration
    pub fallback_duration_seconds: f64,
    pub hard_cap_bytes: u64,
    pub target_bytes: u64,
    /// Pass `-fs <hard cap>` to the compress pass
    pub hard_size_truncation: bool,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            target_long_side: 512,
            framerate: 30,
            max_duration_seconds: 2.9,
            quality_crf: 30,
            fallback_duration_seconds: 3.0,
            hard_cap_bytes: 256 * 1024,
            target_bytes: 250 * 1024,
            hard_size_truncation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickerConfig {
    pub set_prefix: String,
    pub title_label: String,
    pub default_emoji: String,
    /// Bot username used in set names; resolved via getMe when unset
    pub service_identity: Option<String>,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            set_prefix: "video".to_string(),
            title_label: "Video Stickers".to_string(),
            default_emoji: "🎬".to_string(),
            service_identity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_base: String,
    pub poll_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            poll_timeout_seconds: 30,
            request_timeout_seconds: 60,
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_timestamps: bool,
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_timestamps: true,
            colored_output: true,
        }
    }
}
