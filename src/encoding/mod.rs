pub mod adaptive;
pub mod backend;
pub mod job;
pub mod modes;
pub mod probe;
pub mod scale;

pub use adaptive::{AdaptiveEncoder, EncodeAttempt, EncodeOutcome};
pub use backend::MediaBackend;
pub use job::{EncodeJob, EncodeRequest, MAX_CLIP_SECONDS};
pub use modes::{EncodeMode, SizeBudget};
pub use probe::{parse_probe_output, SourceProbe, FALLBACK_DURATION_SECONDS};
pub use scale::{ScaleAxis, ScalePlan, STICKER_LONG_SIDE};
