use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use webm_sticker_bot::{
    cli::{handle_commands, CliArgs},
    config::Config,
    service::{health, purge_stale, AdmissionControl, StickerBot, StickerPipeline},
    telegram::{BotApi, TelegramStickerStore},
    utils::{setup_logging, FfmpegWrapper},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    args.validate()?;

    let config = Config::load_with_fallback(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    setup_logging(
        args.get_log_level(&config.logging.level),
        config.logging.show_timestamps,
        config.logging.colored_output && args.should_use_color(),
    )?;

    if handle_commands(&args, &config).await? {
        return Ok(());
    }

    run_service(config).await
}

async fn run_service(config: Config) -> anyhow::Result<()> {
    let token = config.require_token()?.to_string();

    let ffmpeg = FfmpegWrapper::new(
        config.tools.ffmpeg.clone(),
        config.tools.ffprobe.clone(),
        config.app.encode_timeout_seconds,
    )
    .with_fallback_duration(config.encoding.fallback_duration_seconds);
    ffmpeg
        .check_availability()
        .await
        .context("FFmpeg tools not available")?;

    if config.app.purge_stale_scratch {
        purge_stale(
            &config.app.temp_dir,
            Duration::from_secs(config.app.stale_scratch_minutes * 60),
        );
    }

    let api = BotApi::new(&token, &config.telegram)?;
    let service_identity = match &config.stickers.service_identity {
        Some(identity) => identity.clone(),
        None => api
            .get_me()
            .await
            .context("resolving bot identity")?
            .username
            .context("bot account has no username")?,
    };
    info!("Running as @{}", service_identity);

    let store = TelegramStickerStore::new(api.clone());
    let pipeline = StickerPipeline::new(ffmpeg, store, &config, service_identity);
    let admission =
        AdmissionControl::new(config.app.max_concurrent_jobs, config.app.max_queued_jobs);
    let bot = Arc::new(StickerBot::new(
        api,
        pipeline,
        admission,
        config.telegram.poll_timeout_seconds,
    ));

    tokio::select! {
        result = health::serve(&config.health) => result.context("liveness endpoint")?,
        result = bot.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }

    Ok(())
}
