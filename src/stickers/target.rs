use crate::config::StickerConfig;
use once_cell::sync::Lazy;
use regex::Regex;

/// Telegram limits for sticker set names and titles.
const MAX_NAME_LEN: usize = 64;
const MAX_TITLE_LEN: usize = 64;

static INVALID_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static REPEATED_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());

/// The per-owner sticker set. Always re-derived, never stored, so that every
/// request from the same owner addresses the same set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTarget {
    pub owner_id: u64,
    pub name: String,
    pub title: String,
}

impl CollectionTarget {
    pub fn derive(owner_id: u64, service_identity: &str, config: &StickerConfig) -> Self {
        let prefix = sanitize_prefix(&config.set_prefix);
        let identity = service_identity.trim().trim_start_matches('@');
        let name = format!("{}_{}_by_{}", prefix, owner_id, identity);

        let title: String = format!("{} {}", config.title_label.trim(), owner_id)
            .chars()
            .take(MAX_TITLE_LEN)
            .collect();

        if name.len() > MAX_NAME_LEN {
            tracing::warn!("Sticker set name {} exceeds {} characters", name, MAX_NAME_LEN);
        }

        Self {
            owner_id,
            name,
            title,
        }
    }

    pub fn share_link(&self) -> String {
        format!("https://t.me/addstickers/{}", self.name)
    }
}

/// Reduces a configured prefix to the characters allowed in set names.
pub fn sanitize_prefix(prefix: &str) -> String {
    let cleaned = INVALID_NAME_CHARS.replace_all(prefix.trim(), "_");
    let collapsed = REPEATED_UNDERSCORES.replace_all(&cleaned, "_");
    collapsed.trim_matches('_').to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerFormat {
    Video,
}

impl StickerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem {
    pub payload: Vec<u8>,
    pub emoji: String,
    pub format: StickerFormat,
}

impl CollectionItem {
    pub fn video(payload: Vec<u8>, emoji: impl Into<String>) -> Self {
        Self {
            payload,
            emoji: emoji.into(),
            format: StickerFormat::Video,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derive_is_deterministic() {
        let config = StickerConfig::default();
        let first = CollectionTarget::derive(42, "clipbot", &config);
        let second = CollectionTarget::derive(42, "clipbot", &config);
        assert_eq!(first, second);
        assert_eq!(
            first,
            CollectionTarget {
                owner_id: 42,
                name: "video_42_by_clipbot".to_string(),
                title: "Video Stickers 42".to_string(),
            }
        );
    }

    #[test]
    fn test_distinct_owners_get_distinct_sets() {
        let config = StickerConfig::default();
        let a = CollectionTarget::derive(1, "clipbot", &config);
        let b = CollectionTarget::derive(2, "clipbot", &config);
        assert_ne!(a.name, b.name);
    }

    #[test]
    fn test_prefix_and_identity_are_normalised() {
        let config = StickerConfig {
            set_prefix: " my clips!! ".to_string(),
            ..StickerConfig::default()
        };
        let target = CollectionTarget::derive(7, "@clipbot", &config);
        assert_eq!(target.name, "my_clips_7_by_clipbot");
    }

    #[test]
    fn test_sanitize_prefix() {
        assert_eq!(sanitize_prefix("video"), "video");
        assert_eq!(sanitize_prefix("__a--b__"), "a_b");
        assert_eq!(sanitize_prefix("!!!"), "");
    }

    #[test]
    fn test_share_link() {
        let target = CollectionTarget::derive(7, "clipbot", &StickerConfig::default());
        assert_eq!(
            target.share_link(),
            "https://t.me/addstickers/video_7_by_clipbot"
        );
    }

    #[test]
    fn test_title_is_truncated() {
        let config = StickerConfig {
            title_label: "x".repeat(100),
            ..StickerConfig::default()
        };
        let target = CollectionTarget::derive(7, "clipbot", &config);
        assert_eq!(target.title.chars().count(), MAX_TITLE_LEN);
    }
}
