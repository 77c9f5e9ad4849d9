use crate::utils::{Error, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(name = "sticker-bot")]
#[command(about = "Telegram bot that turns videos and GIFs into VP9 WebM stickers")]
#[command(long_about = "
Receives videos, GIFs and video documents over Telegram, re-encodes them to a
512px, 30fps, silent VP9 WebM no longer than 2.9s and under 256 KiB, then adds
the result to the sender's own sticker pack.

The bot token is read from BOT_TOKEN and the liveness port from PORT (default 8080).

EXAMPLES:
  # Run the bot
  BOT_TOKEN=123:abc sticker-bot

  # Convert a local file without Telegram
  sticker-bot --convert clip.mp4 -o clip_sticker.webm

  # Check a configuration file
  sticker-bot --config config.yaml --validate-config
")]
pub struct CliArgs {
    /// Configuration file path
    #[arg(long, default_value = "config.yaml", value_name = "FILE")]
    pub config: PathBuf,

    /// Convert a local file into a sticker and exit
    #[arg(long, value_name = "PATH")]
    pub convert: Option<PathBuf>,

    /// Output path for --convert (defaults to <input>_sticker.webm)
    #[arg(short, long, value_name = "PATH", requires = "convert")]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Validate configuration file and exit
    #[arg(long)]
    pub validate_config: bool,
}

impl CliArgs {
    pub fn get_log_level<'a>(&self, config_level: &'a str) -> &'a str {
        if self.debug {
            "debug"
        } else {
            config_level
        }
    }

    pub fn should_use_color(&self) -> bool {
        !self.no_color
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(input) = &self.convert {
            if !input.is_file() {
                return Err(Error::validation(format!(
                    "Input file does not exist: {}",
                    input.display()
                )));
            }
        }
        Ok(())
    }

    /// Output path for offline conversion.
    pub fn convert_output(&self, input: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(input))
    }
}

pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{}_sticker.webm", stem))
}
