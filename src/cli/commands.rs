use crate::{
    cli::CliArgs,
    config::{Config, EncodingConfig},
    encoding::{EncodeOutcome, MediaBackend},
    service::convert,
    utils::{
        filesystem::{format_file_size, remove_file_quietly, replace_file},
        FfmpegWrapper, Result,
    },
};
use std::path::Path;
use tracing::info;

/// Runs one-shot commands. Returns `true` when the process should exit
/// instead of starting the bot.
pub async fn handle_commands(args: &CliArgs, config: &Config) -> Result<bool> {
    if args.validate_config {
        validate_config(config);
        return Ok(true);
    }

    if let Some(input) = &args.convert {
        let output = args.convert_output(input);
        convert_file(config, input, &output).await?;
        return Ok(true);
    }

    Ok(false)
}

fn validate_config(config: &Config) {
    println!("✓ Configuration is valid");
    println!("  Scratch directory:    {}", config.app.temp_dir);
    println!("  Concurrent jobs:      {}", config.app.max_concurrent_jobs);
    println!("  Queued jobs:          {}", config.app.max_queued_jobs);
    println!(
        "  Size budget:          {} target, {} hard cap",
        format_file_size(config.encoding.target_bytes),
        format_file_size(config.encoding.hard_cap_bytes)
    );
    println!("  Sticker set prefix:   {}", config.stickers.set_prefix);
    println!(
        "  Bot token:            {}",
        if config.telegram.token.is_some() {
            "present"
        } else {
            "missing"
        }
    );
}

async fn convert_file(config: &Config, input: &Path, output: &Path) -> Result<()> {
    let ffmpeg = FfmpegWrapper::new(
        config.tools.ffmpeg.clone(),
        config.tools.ffprobe.clone(),
        config.app.encode_timeout_seconds,
    )
    .with_fallback_duration(config.encoding.fallback_duration_seconds);
    ffmpeg.check_availability().await?;

    let outcome = convert_to_path(&ffmpeg, &config.encoding, input, output).await?;

    info!(
        "Wrote {} ({}, {} pass(es))",
        output.display(),
        format_file_size(outcome.size_bytes),
        outcome.attempts.len()
    );
    Ok(())
}

/// Converts `input` and moves the result onto `output` only once it fits the
/// size budget. Encoder files live next to `output` while they are in flight
/// and are gone when this returns; on failure `output` is left untouched.
pub async fn convert_to_path<B: MediaBackend>(
    backend: &B,
    encoding: &EncodingConfig,
    input: &Path,
    output: &Path,
) -> Result<EncodeOutcome> {
    let temp = output.with_extension("temp.webm");
    let staged = output.with_extension("part.webm");

    let result = convert(backend, encoding, input, &temp, &staged).await;
    remove_file_quietly(&temp);

    let mut outcome = match result {
        Ok((_, outcome)) => outcome,
        Err(e) => {
            remove_file_quietly(&staged);
            return Err(e);
        }
    };

    if let Err(e) = replace_file(&staged, output).await {
        remove_file_quietly(&staged);
        return Err(e);
    }
    outcome.output_path = output.to_path_buf();
    Ok(outcome)
}
