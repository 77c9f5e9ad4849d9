use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("FFmpeg error: {message}")]
    Ffmpeg { message: String },

    #[error("Probe failed: {message}")]
    Probe { message: String },

    #[error("Encode failed: {message}")]
    Encode { message: String },

    #[error("Encode timed out after {seconds} seconds")]
    EncodeTimeout { seconds: u64 },

    #[error("Encoded output is {size} bytes, above the {limit} byte limit")]
    SizeConstraintUnmet { size: u64, limit: u64 },

    #[error("Sticker set {name} does not exist and could not be created")]
    CollectionNotFound { name: String },

    #[error("Sticker set {name} is full")]
    CollectionFull { name: String },

    #[error("Sticker set error: {message}")]
    CollectionOther { message: String },

    #[error("Telegram API error: {message}")]
    Telegram { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Request rejected: {message}")]
    Rejected { message: String },
}

impl Error {
    pub fn ffmpeg<T: Into<String>>(message: T) -> Self {
        Self::Ffmpeg {
            message: message.into(),
        }
    }

    pub fn probe<T: Into<String>>(message: T) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }

    pub fn encode<T: Into<String>>(message: T) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    pub fn collection_other<T: Into<String>>(message: T) -> Self {
        Self::CollectionOther {
            message: message.into(),
        }
    }

    pub fn telegram<T: Into<String>>(message: T) -> Self {
        Self::Telegram {
            message: message.into(),
        }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn rejected<T: Into<String>>(message: T) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}
