use super::admission::AdmissionControl;
use super::pipeline::{StickerPipeline, StickerReport, StickerRequest};
use crate::encoding::MediaBackend;
use crate::stickers::{CollectionStore, UpsertOutcome};
use crate::telegram::{BotApi, Message};
use crate::utils::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

pub const MSG_SEND_VIDEO: &str = "Please send a GIF or Video.";
pub const MSG_PROCESSING: &str = "⬇️ Processing...";

/// The long-polling bot: one task per inbound message, bounded by admission control.
pub struct StickerBot<B, S> {
    api: BotApi,
    pipeline: StickerPipeline<B, S>,
    admission: AdmissionControl,
    poll_timeout_seconds: u64,
}

impl<B, S> StickerBot<B, S>
where
    B: MediaBackend + 'static,
    S: CollectionStore + 'static,
{
    pub fn new(
        api: BotApi,
        pipeline: StickerPipeline<B, S>,
        admission: AdmissionControl,
        poll_timeout_seconds: u64,
    ) -> Self {
        Self {
            api,
            pipeline,
            admission,
            poll_timeout_seconds,
        }
    }

    pub async fn run(self: Arc<Self>) -> Result<()> {
        let mut offset = 0i64;
        info!("Bot started, polling for updates");

        loop {
            let updates = match self.api.get_updates(offset, self.poll_timeout_seconds).await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!("Polling failed: {}; retrying in {}s", e, POLL_RETRY_DELAY.as_secs());
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                if let Some(message) = update.message {
                    let bot = Arc::clone(&self);
                    tokio::spawn(async move { bot.handle_message(message).await });
                }
            }
        }
    }

    async fn handle_message(&self, message: Message) {
        let chat_id = message.chat.id;
        let Some(owner_id) = message.from.as_ref().map(|u| u.id) else {
            debug!("Ignoring message {} without a sender", message.message_id);
            return;
        };

        let Some(file_id) = message.video_file_id().map(str::to_string) else {
            self.reply(chat_id, message.message_id, MSG_SEND_VIDEO).await;
            return;
        };

        let ticket = match self.admission.try_admit() {
            Ok(ticket) => ticket,
            Err(e) => {
                warn!(owner_id, "{}", e);
                let text = status_message_for(&Err(e));
                self.reply(chat_id, message.message_id, &text).await;
                return;
            }
        };

        let status = match self
            .api
            .send_message(chat_id, MSG_PROCESSING, Some(message.message_id))
            .await
        {
            Ok(status) => status,
            Err(e) => {
                error!(owner_id, "Could not send status message: {}", e);
                return;
            }
        };

        let request = StickerRequest {
            owner_id,
            emoji: message
                .caption_label()
                .unwrap_or(self.pipeline.default_emoji())
                .to_string(),
        };

        let result = match ticket.wait_for_worker().await {
            Ok(_permit) => {
                let api = &self.api;
                self.pipeline
                    .process(&request, move |path: PathBuf| async move {
                        let file = api.get_file(&file_id).await?;
                        let file_path = file
                            .file_path
                            .ok_or_else(|| Error::telegram("getFile returned no file_path"))?;
                        api.download_file(&file_path, &path).await?;
                        Ok(())
                    })
                    .await
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(report) => info!(
                request_id = %report.request_id,
                owner_id,
                size = report.encode.size_bytes,
                "Sticker request completed"
            ),
            Err(e) => error!(owner_id, "Sticker request failed: {}", e),
        }

        let text = status_message_for(&result);
        if let Err(e) = self
            .api
            .edit_message_text(chat_id, status.message_id, &text)
            .await
        {
            warn!("Could not update status message: {}", e);
        }
    }

    async fn reply(&self, chat_id: i64, reply_to: i64, text: &str) {
        if let Err(e) = self.api.send_message(chat_id, text, Some(reply_to)).await {
            warn!("Could not reply to chat {}: {}", chat_id, e);
        }
    }
}

/// The single place where a request result becomes user-facing text.
pub fn status_message_for(result: &Result<StickerReport>) -> String {
    match result {
        Ok(report) => {
            let action = match report.upsert {
                UpsertOutcome::Created => "✅ Created your sticker pack!",
                UpsertOutcome::Appended => "✅ Sticker added!",
            };
            format!("{}\n{}", action, report.target.share_link())
        }
        Err(Error::Probe { .. }) => "❌ Could not read that video.".to_string(),
        Err(Error::Encode { .. })
        | Err(Error::EncodeTimeout { .. })
        | Err(Error::SizeConstraintUnmet { .. }) => {
            "❌ Failed. Video might be too complex.".to_string()
        }
        Err(Error::CollectionFull { .. }) => {
            "❌ Your sticker pack is full. Remove some stickers with @Stickers and try again."
                .to_string()
        }
        Err(Error::CollectionNotFound { .. }) => {
            "❌ Could not create your sticker pack. Open a private chat with me and try again."
                .to_string()
        }
        Err(Error::CollectionOther { message }) => {
            format!("❌ Telegram rejected the sticker: {}", message)
        }
        Err(Error::Rejected { .. }) => {
            "⏳ I'm busy right now, please try again in a minute.".to_string()
        }
        Err(_) => "❌ Error occurred.".to_string(),
    }
}
