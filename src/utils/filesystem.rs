use crate::utils::Result;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

pub async fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    tokio::fs::create_dir_all(path.as_ref()).await?;
    Ok(())
}

pub async fn get_file_size<P: AsRef<Path>>(path: P) -> Result<u64> {
    let metadata = tokio::fs::metadata(path).await?;
    Ok(metadata.len())
}

/// Moves `source` over `destination`, removing whatever was there first.
pub async fn replace_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let destination = destination.as_ref();
    match tokio::fs::remove_file(destination).await {
        Ok(()) => debug!("Removed previous output {}", destination.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    tokio::fs::rename(source.as_ref(), destination).await?;
    Ok(())
}

/// Best-effort delete. Failures are logged at debug level and otherwise ignored.
pub fn remove_file_quietly<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            debug!("Could not remove {}: {}", path.display(), e);
            false
        }
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let size = bytes as f64;
    let unit_index = (size.log(THRESHOLD) as usize).min(UNITS.len() - 1);
    let size_in_unit = size / THRESHOLD.powi(unit_index as i32);

    format!("{:.2} {}", size_in_unit, UNITS[unit_index])
}
