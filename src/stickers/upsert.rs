use super::store::{CollectionStore, StoreError};
use super::target::{CollectionItem, CollectionTarget};
use crate::utils::logging::log_upsert_result;
use crate::utils::{Error, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Appended,
    Created,
}

/// Append first; create only when the store reports the set missing.
pub async fn upsert_item<S: CollectionStore>(
    store: &S,
    target: &CollectionTarget,
    item: &CollectionItem,
) -> Result<UpsertOutcome> {
    let outcome = match store.append_item(target, item).await {
        Ok(()) => UpsertOutcome::Appended,
        Err(StoreError::NotFound) => {
            debug!("Sticker set {} not found, creating it", target.name);
            store
                .create_collection(target, item)
                .await
                .map_err(|e| match e {
                    StoreError::NotFound => Error::CollectionNotFound {
                        name: target.name.clone(),
                    },
                    StoreError::CapacityExceeded => Error::CollectionFull {
                        name: target.name.clone(),
                    },
                    StoreError::Other(message) => Error::collection_other(message),
                })?;
            UpsertOutcome::Created
        }
        Err(StoreError::CapacityExceeded) => {
            return Err(Error::CollectionFull {
                name: target.name.clone(),
            })
        }
        Err(StoreError::Other(message)) => return Err(Error::collection_other(message)),
    };

    log_upsert_result(&target.name, outcome == UpsertOutcome::Created);
    Ok(outcome)
}
