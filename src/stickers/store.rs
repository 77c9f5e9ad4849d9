use super::target::{CollectionItem, CollectionTarget};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("sticker set not found")]
    NotFound,

    #[error("sticker set is at capacity")]
    CapacityExceeded,

    #[error("{0}")]
    Other(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The external sticker set store. It is authoritative: callers react to its
/// rejections instead of checking for existence first.
pub trait CollectionStore: Send + Sync {
    fn append_item(
        &self,
        target: &CollectionTarget,
        item: &CollectionItem,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    fn create_collection(
        &self,
        target: &CollectionTarget,
        item: &CollectionItem,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}
