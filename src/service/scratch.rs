use crate::utils::filesystem::{ensure_dir, remove_file_quietly};
use crate::utils::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info};
use uuid::Uuid;
use walkdir::WalkDir;

/// Matches every file name `ScratchSpace` hands out.
static SCRATCH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}_(in|sticker\.webm|sticker\.webm\.temp\.webm)$")
        .unwrap()
});

/// Per-request scratch files, named after a fresh v4 uuid. Every path is
/// removed when the value is dropped, whichever way the request ended.
#[derive(Debug)]
pub struct ScratchSpace {
    id: Uuid,
    input_path: PathBuf,
    output_path: PathBuf,
    quality_temp_path: PathBuf,
}

impl ScratchSpace {
    pub async fn allocate<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        ensure_dir(root).await?;
        Ok(Self::with_id(root, Uuid::new_v4()))
    }

    fn with_id(root: &Path, id: Uuid) -> Self {
        let output_path = root.join(format!("{}_sticker.webm", id));
        let quality_temp_path = root.join(format!("{}_sticker.webm.temp.webm", id));
        Self {
            id,
            input_path: root.join(format!("{}_in", id)),
            output_path,
            quality_temp_path,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Where the downloaded source lands.
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Committed encoder output.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Quality pass output before it is known to fit.
    pub fn quality_temp_path(&self) -> &Path {
        &self.quality_temp_path
    }

    pub fn paths(&self) -> [&Path; 3] {
        [
            &self.input_path,
            &self.output_path,
            &self.quality_temp_path,
        ]
    }

    pub fn release(self) {}
}

impl Drop for ScratchSpace {
    fn drop(&mut self) {
        let removed = self
            .paths()
            .iter()
            .filter(|path| remove_file_quietly(path))
            .count();
        debug!("Released scratch {} ({} file(s) removed)", self.id, removed);
    }
}

/// Removes scratch files left behind by a previous process. Only files last
/// modified at least `older_than` ago are touched, so another live instance
/// sharing `root` keeps its in-flight files. Returns the number deleted.
pub fn purge_stale<P: AsRef<Path>>(root: P, older_than: Duration) -> usize {
    let root = root.as_ref();
    if !root.is_dir() {
        return 0;
    }

    let removed = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| SCRATCH_NAME.is_match(name))
        })
        .filter(|e| is_older_than(e, older_than))
        .filter(|e| remove_file_quietly(e.path()))
        .count();

    if removed > 0 {
        info!("Purged {} stale scratch file(s) from {}", removed, root.display());
    }
    removed
}

fn is_older_than(entry: &walkdir::DirEntry, age: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|elapsed| elapsed >= age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_paths_are_distinct_and_named_after_id() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchSpace::allocate(dir.path()).await.unwrap();
        let id = scratch.id().to_string();

        let paths = scratch.paths();
        assert_ne!(paths[0], paths[1]);
        assert_ne!(paths[1], paths[2]);
        for path in paths {
            assert!(path.starts_with(dir.path()));
            assert!(path.file_name().unwrap().to_str().unwrap().starts_with(&id));
        }
    }

    #[tokio::test]
    async fn test_concurrent_allocations_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let a = ScratchSpace::allocate(dir.path()).await.unwrap();
        let b = ScratchSpace::allocate(dir.path()).await.unwrap();
        assert_ne!(a.id(), b.id());
        for path in a.paths() {
            assert!(!b.paths().contains(&path));
        }
    }

    #[tokio::test]
    async fn test_drop_removes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchSpace::allocate(dir.path()).await.unwrap();
        let paths: Vec<PathBuf> = scratch.paths().iter().map(|p| p.to_path_buf()).collect();
        for path in &paths {
            std::fs::write(path, b"x").unwrap();
        }

        drop(scratch);

        for path in &paths {
            assert!(!path.exists(), "{} left behind", path.display());
        }
    }

    #[tokio::test]
    async fn test_release_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchSpace::allocate(dir.path().join("nested")).await.unwrap();
        std::fs::write(scratch.input_path(), b"x").unwrap();
        let input = scratch.input_path().to_path_buf();
        scratch.release();
        assert!(!input.exists());
    }

    #[test]
    fn test_purge_only_touches_scratch_names() {
        let dir = tempfile::tempdir().unwrap();
        let stale = ScratchSpace::with_id(dir.path(), Uuid::new_v4());
        for path in stale.paths() {
            std::fs::write(path, b"x").unwrap();
        }
        let unrelated = dir.path().join("config.yaml");
        std::fs::write(&unrelated, b"x").unwrap();
        let paths: Vec<PathBuf> = stale.paths().iter().map(|p| p.to_path_buf()).collect();
        std::mem::forget(stale);

        assert_eq!(purge_stale(dir.path(), Duration::ZERO), 3);
        assert!(unrelated.exists());
        assert!(paths.iter().all(|p| !p.exists()));
    }

    #[test]
    fn test_purge_spares_recent_files() {
        let dir = tempfile::tempdir().unwrap();
        let live = ScratchSpace::with_id(dir.path(), Uuid::new_v4());
        std::fs::write(live.input_path(), b"x").unwrap();

        assert_eq!(purge_stale(dir.path(), Duration::from_secs(3600)), 0);
        assert!(live.input_path().exists());
    }

    #[test]
    fn test_purge_missing_root() {
        assert_eq!(
            purge_stale("/nonexistent/sticker_scratch", Duration::ZERO),
            0
        );
    }
}
