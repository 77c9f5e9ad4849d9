pub mod api;
pub mod store;
pub mod types;

pub use api::BotApi;
pub use store::TelegramStickerStore;
pub use types::{Message, Update, User};
