use crate::config::EncodingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// Constant quality, no bitrate ceiling
    Quality { crf: u32 },
    /// Explicit bitrate window, optionally truncated at `size_limit_bytes`
    Compress {
        bitrate_bps: u64,
        min_rate_bps: u64,
        max_rate_bps: u64,
        size_limit_bytes: Option<u64>,
    },
}

impl EncodeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quality { .. } => "quality",
            Self::Compress { .. } => "compress",
        }
    }

    pub fn bitrate_bps(&self) -> Option<u64> {
        match self {
            Self::Quality { .. } => None,
            Self::Compress { bitrate_bps, .. } => Some(*bitrate_bps),
        }
    }

    pub fn build_ffmpeg_args(&self) -> Vec<String> {
        match *self {
            Self::Quality { crf } => vec![
                "-b:v".to_string(),
                "0".to_string(),
                "-crf".to_string(),
                crf.to_string(),
            ],
            Self::Compress {
                bitrate_bps,
                min_rate_bps,
                max_rate_bps,
                size_limit_bytes,
            } => {
                let mut args = vec![
                    "-b:v".to_string(),
                    bitrate_bps.to_string(),
                    "-minrate".to_string(),
                    min_rate_bps.to_string(),
                    "-maxrate".to_string(),
                    max_rate_bps.to_string(),
                ];
                if let Some(limit) = size_limit_bytes {
                    args.extend(["-fs".to_string(), limit.to_string()]);
                }
                args
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBudget {
    pub hard_cap_bytes: u64,
    /// Aim of the compress pass, kept below the hard cap as a margin
    pub target_bytes: u64,
}

impl Default for SizeBudget {
    fn default() -> Self {
        Self {
            hard_cap_bytes: 256 * 1024,
            target_bytes: 250 * 1024,
        }
    }
}

impl SizeBudget {
    pub fn from_config(config: &EncodingConfig) -> Self {
        Self {
            hard_cap_bytes: config.hard_cap_bytes,
            target_bytes: config.target_bytes,
        }
    }

    pub fn fits(&self, size_bytes: u64) -> bool {
        size_bytes <= self.hard_cap_bytes
    }

    /// `target_bytes * 8 / duration` bits per second, floored, with a
    /// 0.7x..1.3x rate window. `duration_seconds` is the probed source
    /// duration, not the capped clip length.
    pub fn compress_mode(&self, duration_seconds: f64, truncate: bool) -> EncodeMode {
        let bitrate_bps = ((self.target_bytes * 8) as f64 / duration_seconds).floor() as u64;
        EncodeMode::Compress {
            bitrate_bps,
            min_rate_bps: (bitrate_bps as f64 * 0.7).floor() as u64,
            max_rate_bps: (bitrate_bps as f64 * 1.3).floor() as u64,
            size_limit_bytes: truncate.then_some(self.hard_cap_bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compress_bitrate_formula() {
        let budget = SizeBudget::default();
        for duration in [1.0_f64, 2.9, 3.0, 7.3, 10.0, 61.5] {
            let expected = (250.0 * 8192.0 / duration).floor() as u64;
            match budget.compress_mode(duration, false) {
                EncodeMode::Compress {
                    bitrate_bps,
                    min_rate_bps,
                    max_rate_bps,
                    size_limit_bytes,
                } => {
                    assert_eq!(bitrate_bps, expected);
                    assert_eq!(min_rate_bps, (bitrate_bps as f64 * 0.7).floor() as u64);
                    assert_eq!(max_rate_bps, (bitrate_bps as f64 * 1.3).floor() as u64);
                    assert_eq!(size_limit_bytes, None);
                }
                other => panic!("unexpected mode {:?}", other),
            }
        }
    }

    #[test]
    fn test_ten_second_source() {
        let mode = SizeBudget::default().compress_mode(10.0, true);
        assert_eq!(
            mode,
            EncodeMode::Compress {
                bitrate_bps: 204_800,
                min_rate_bps: 143_360,
                max_rate_bps: 266_240,
                size_limit_bytes: Some(262_144),
            }
        );
    }

    #[test]
    fn test_mode_args() {
        assert_eq!(
            EncodeMode::Quality { crf: 30 }.build_ffmpeg_args(),
            vec!["-b:v", "0", "-crf", "30"]
        );

        let args = SizeBudget::default()
            .compress_mode(10.0, true)
            .build_ffmpeg_args();
        assert_eq!(
            args,
            vec![
                "-b:v", "204800", "-minrate", "143360", "-maxrate", "266240", "-fs", "262144"
            ]
        );
    }

    #[test]
    fn test_fits_is_inclusive() {
        let budget = SizeBudget::default();
        assert!(budget.fits(262_144));
        assert!(!budget.fits(262_145));
    }
}
