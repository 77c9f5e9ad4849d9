use crate::utils::{Error, Result};

/// Duration assumed when the probe cannot report one.
pub const FALLBACK_DURATION_SECONDS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceProbe {
    pub width: u32,
    pub height: u32,
    pub duration_seconds: f64,
    /// False when `duration_seconds` is the fallback value
    pub duration_known: bool,
}

/// Parses `ffprobe -of csv=s=x:p=0` output for `stream=width,height,duration`,
/// e.g. `1920x1080x10.000000`. Width and height are mandatory; a missing or
/// unusable duration falls back to `fallback_duration`.
pub fn parse_probe_output(output: &str, fallback_duration: f64) -> Result<SourceProbe> {
    let line = output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| Error::probe("probe output is empty"))?;

    let mut parts = line.split('x').map(str::trim);
    let width = parse_dimension(parts.next(), "width")?;
    let height = parse_dimension(parts.next(), "height")?;

    let duration = parts
        .next()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0);

    Ok(SourceProbe {
        width,
        height,
        duration_seconds: duration.unwrap_or(fallback_duration),
        duration_known: duration.is_some(),
    })
}

fn parse_dimension(field: Option<&str>, name: &str) -> Result<u32> {
    let raw = match field {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(Error::probe(format!("probe output missing {}", name))),
    };

    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(Error::probe(format!("invalid {} '{}'", name, raw))),
    }
}
