pub mod store;
pub mod target;
pub mod upsert;

pub use store::{CollectionStore, StoreError, StoreResult};
pub use target::{sanitize_prefix, CollectionItem, CollectionTarget, StickerFormat};
pub use upsert::{upsert_item, UpsertOutcome};
