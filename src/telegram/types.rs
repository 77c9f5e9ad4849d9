//! The subset of Bot API objects the service reads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Animation {
    pub file_id: String,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    pub file_id: String,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub caption: Option<String>,
    pub animation: Option<Animation>,
    pub video: Option<Video>,
    pub document: Option<Document>,
}

impl Message {
    /// File id of the first usable attachment: animation, then video, then a
    /// document with a video mime type.
    pub fn video_file_id(&self) -> Option<&str> {
        if let Some(animation) = &self.animation {
            return Some(&animation.file_id);
        }
        if let Some(video) = &self.video {
            return Some(&video.file_id);
        }
        self.document
            .as_ref()
            .filter(|d| {
                d.mime_type
                    .as_deref()
                    .is_some_and(|mime| mime.contains("video"))
            })
            .map(|d| d.file_id.as_str())
    }

    /// Trimmed caption, when non-empty.
    pub fn caption_label(&self) -> Option<&str> {
        self.caption
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct File {
    pub file_id: String,
    pub file_size: Option<u64>,
    pub file_path: Option<String>,
}

/// One sticker in `createNewStickerSet`/`addStickerToSet`; the file itself
/// travels as a multipart attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSticker {
    pub sticker: String,
    pub format: String,
    pub emoji_list: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(json: &str) -> Message {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_animation_preferred() {
        let msg = message(
            r#"{"message_id":1,"chat":{"id":5},
                "animation":{"file_id":"anim"},
                "video":{"file_id":"vid"}}"#,
        );
        assert_eq!(msg.video_file_id(), Some("anim"));
    }

    #[test]
    fn test_video_document_accepted() {
        let msg = message(
            r#"{"message_id":1,"chat":{"id":5},
                "document":{"file_id":"doc","mime_type":"video/mp4"}}"#,
        );
        assert_eq!(msg.video_file_id(), Some("doc"));
    }

    #[test]
    fn test_non_video_document_rejected() {
        let msg = message(
            r#"{"message_id":1,"chat":{"id":5},
                "document":{"file_id":"doc","mime_type":"application/pdf"}}"#,
        );
        assert_eq!(msg.video_file_id(), None);

        let msg = message(r#"{"message_id":1,"chat":{"id":5},"document":{"file_id":"doc"}}"#);
        assert_eq!(msg.video_file_id(), None);
    }

    #[test]
    fn test_caption_label() {
        let msg = message(r#"{"message_id":1,"chat":{"id":5},"caption":"  🔥 "}"#);
        assert_eq!(msg.caption_label(), Some("🔥"));

        let msg = message(r#"{"message_id":1,"chat":{"id":5},"caption":"   "}"#);
        assert_eq!(msg.caption_label(), None);
    }

    #[test]
    fn test_error_response_decodes() {
        let response: ApiResponse<User> = serde_json::from_str(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: STICKERSET_INVALID"}"#,
        )
        .unwrap();
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.error_code, Some(400));
    }

    #[test]
    fn test_input_sticker_serializes() {
        let sticker = InputSticker {
            sticker: "attach://sticker".to_string(),
            format: "video".to_string(),
            emoji_list: vec!["🎬".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&sticker).unwrap(),
            r#"{"sticker":"attach://sticker","format":"video","emoji_list":["🎬"]}"#
        );
    }
}
