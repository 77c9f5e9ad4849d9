pub mod admission;
pub mod bot;
pub mod health;
pub mod pipeline;
pub mod scratch;

pub use admission::{AdmissionControl, AdmissionTicket, JobPermit};
pub use bot::{status_message_for, StickerBot};
pub use pipeline::{convert, StickerPipeline, StickerReport, StickerRequest};
pub use scratch::{purge_stale, ScratchSpace};
