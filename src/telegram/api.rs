use super::types::{ApiResponse, File, InputSticker, Message, Update, User};
use crate::config::TelegramConfig;
use crate::stickers::{CollectionItem, CollectionTarget};
use crate::utils::{Error, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const STICKER_ATTACHMENT: &str = "sticker";

/// Minimal Bot API client. Request URLs embed the token, so transport errors
/// are stripped of their URL before they reach the log.
#[derive(Debug, Clone)]
pub struct BotApi {
    client: Client,
    api_base: String,
    token: String,
}

impl BotApi {
    pub fn new(token: &str, config: &TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("webm-sticker-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(strip_url)?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<T, B>(&self, method: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!("Bot API call: {}", method);
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(strip_url)?;
        decode(method, response).await
    }

    async fn call_multipart<T: DeserializeOwned>(&self, method: &str, form: Form) -> Result<T> {
        debug!("Bot API multipart call: {}", method);
        let response = self
            .client
            .post(self.method_url(method))
            .multipart(form)
            .send()
            .await
            .map_err(strip_url)?;
        decode(method, response).await
    }

    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &json!({})).await
    }

    pub async fn get_updates(&self, offset: i64, timeout_seconds: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_seconds,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<File> {
        self.call("getFile", &json!({ "file_id": file_id })).await
    }

    /// Streams a file reported by `getFile` to `destination`.
    pub async fn download_file(&self, file_path: &str, destination: &Path) -> Result<u64> {
        let url = format!("{}/file/bot{}/{}", self.api_base, self.token, file_path);
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(strip_url)?;

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(strip_url)? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!("Downloaded {} bytes to {}", written, destination.display());
        Ok(written)
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message> {
        let mut body = json!({ "chat_id": chat_id, "text": text });
        if let Some(message_id) = reply_to {
            body["reply_parameters"] = json!({
                "message_id": message_id,
                "allow_sending_without_reply": true,
            });
        }
        self.call("sendMessage", &body).await
    }

    pub async fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        let _: serde_json::Value = self
            .call(
                "editMessageText",
                &json!({ "chat_id": chat_id, "message_id": message_id, "text": text }),
            )
            .await?;
        Ok(())
    }

    pub async fn create_new_sticker_set(
        &self,
        target: &CollectionTarget,
        item: &CollectionItem,
    ) -> Result<()> {
        let stickers = serde_json::to_string(&[input_sticker(item)])?;
        let form = Form::new()
            .text("user_id", target.owner_id.to_string())
            .text("name", target.name.clone())
            .text("title", target.title.clone())
            .text("stickers", stickers)
            .part(STICKER_ATTACHMENT, sticker_part(item)?);

        let _: bool = self.call_multipart("createNewStickerSet", form).await?;
        Ok(())
    }

    pub async fn add_sticker_to_set(
        &self,
        target: &CollectionTarget,
        item: &CollectionItem,
    ) -> Result<()> {
        let sticker = serde_json::to_string(&input_sticker(item))?;
        let form = Form::new()
            .text("user_id", target.owner_id.to_string())
            .text("name", target.name.clone())
            .text("sticker", sticker)
            .part(STICKER_ATTACHMENT, sticker_part(item)?);

        let _: bool = self.call_multipart("addStickerToSet", form).await?;
        Ok(())
    }
}

fn input_sticker(item: &CollectionItem) -> InputSticker {
    InputSticker {
        sticker: format!("attach://{}", STICKER_ATTACHMENT),
        format: item.format.as_str().to_string(),
        emoji_list: vec![item.emoji.clone()],
    }
}

fn sticker_part(item: &CollectionItem) -> Result<Part> {
    Part::bytes(item.payload.clone())
        .file_name("sticker.webm")
        .mime_str("video/webm")
        .map_err(strip_url)
}

fn strip_url(error: reqwest::Error) -> Error {
    Error::Http(error.without_url())
}

async fn decode<T: DeserializeOwned>(method: &str, response: reqwest::Response) -> Result<T> {
    let body = response.bytes().await.map_err(strip_url)?;
    let parsed: ApiResponse<T> = serde_json::from_slice(&body)?;
    into_result(method, parsed)
}

fn into_result<T>(method: &str, response: ApiResponse<T>) -> Result<T> {
    match (response.ok, response.result) {
        (true, Some(result)) => Ok(result),
        (true, None) => Err(Error::telegram(format!("{}: response without result", method))),
        (false, _) => Err(Error::telegram(response.description.unwrap_or_else(|| {
            format!(
                "{} failed with code {}",
                method,
                response.error_code.unwrap_or_default()
            )
        }))),
    }
}
