use super::api::BotApi;
use crate::stickers::{CollectionItem, CollectionStore, CollectionTarget, StoreError, StoreResult};
use crate::utils::Error;
use once_cell::sync::Lazy;
use regex::Regex;

static NOT_FOUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)STICKERSET_INVALID|sticker ?set not found").unwrap());

static AT_CAPACITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)STICKERS_TOO_MUCH|too many stickers").unwrap());

/// Sticker sets held by Telegram, addressed through the Bot API.
#[derive(Debug, Clone)]
pub struct TelegramStickerStore {
    api: BotApi,
}

impl TelegramStickerStore {
    pub fn new(api: BotApi) -> Self {
        Self { api }
    }
}

impl CollectionStore for TelegramStickerStore {
    async fn append_item(&self, target: &CollectionTarget, item: &CollectionItem) -> StoreResult<()> {
        self.api
            .add_sticker_to_set(target, item)
            .await
            .map_err(classify)
    }

    async fn create_collection(
        &self,
        target: &CollectionTarget,
        item: &CollectionItem,
    ) -> StoreResult<()> {
        self.api
            .create_new_sticker_set(target, item)
            .await
            .map_err(classify)
    }
}

pub fn classify(error: Error) -> StoreError {
    match error {
        Error::Telegram { message } => classify_description(&message),
        other => StoreError::Other(other.to_string()),
    }
}

pub fn classify_description(description: &str) -> StoreError {
    if NOT_FOUND.is_match(description) {
        StoreError::NotFound
    } else if AT_CAPACITY.is_match(description) {
        StoreError::CapacityExceeded
    } else {
        StoreError::Other(description.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_description() {
        assert_eq!(
            classify_description("Bad Request: STICKERSET_INVALID"),
            StoreError::NotFound
        );
        assert_eq!(
            classify_description("Bad Request: sticker set not found"),
            StoreError::NotFound
        );
        assert_eq!(
            classify_description("Bad Request: STICKERS_TOO_MUCH"),
            StoreError::CapacityExceeded
        );
        assert_eq!(
            classify_description("Bad Request: file is too big"),
            StoreError::Other("Bad Request: file is too big".to_string())
        );
    }

    #[test]
    fn test_transport_errors_are_other() {
        let error = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "reset"));
        assert!(matches!(classify(error), StoreError::Other(_)));
    }
}
