pub mod cli;
pub mod config;
pub mod encoding;
pub mod service;
pub mod stickers;
pub mod telegram;
pub mod utils;

pub use config::Config;
pub use encoding::{AdaptiveEncoder, EncodeJob, EncodeMode, MediaBackend, ScalePlan, SizeBudget, SourceProbe};
pub use service::{StickerBot, StickerPipeline, StickerReport, StickerRequest};
pub use stickers::{CollectionItem, CollectionStore, CollectionTarget, StoreError, UpsertOutcome};
pub use utils::{Error, FfmpegWrapper, Result};
