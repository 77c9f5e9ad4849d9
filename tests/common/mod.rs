#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use webm_sticker_bot::config::Config;
use webm_sticker_bot::encoding::{EncodeRequest, MediaBackend, SourceProbe};
use webm_sticker_bot::stickers::{
    CollectionItem, CollectionStore, CollectionTarget, StoreError, StoreResult,
};
use webm_sticker_bot::{Error, Result};

pub fn probe(width: u32, height: u32, duration_seconds: f64) -> SourceProbe {
    SourceProbe {
        width,
        height,
        duration_seconds,
        duration_known: true,
    }
}

/// Config whose scratch directory lives inside `tmp`.
pub fn config_in(tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.app.temp_dir = tmp.path().join("scratch").to_string_lossy().into_owned();
    config
}

pub fn scratch_dir(config: &Config) -> PathBuf {
    PathBuf::from(&config.app.temp_dir)
}

pub fn scratch_entries(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Writes a placeholder source where the pipeline expects the download.
pub async fn fake_download(path: PathBuf) -> Result<()> {
    tokio::fs::write(&path, b"source video").await?;
    Ok(())
}

/// Media backend that reports a fixed probe and writes outputs of scripted sizes.
pub struct FakeBackend {
    probe: Option<SourceProbe>,
    output_sizes: Mutex<VecDeque<u64>>,
    requests: Mutex<Vec<EncodeRequest>>,
    probed: Mutex<Vec<PathBuf>>,
}

impl FakeBackend {
    pub fn new(probe: SourceProbe, output_sizes: &[u64]) -> Self {
        Self {
            probe: Some(probe),
            output_sizes: Mutex::new(output_sizes.iter().copied().collect()),
            requests: Mutex::new(Vec::new()),
            probed: Mutex::new(Vec::new()),
        }
    }

    /// Every probe fails, as for a file that is not a video.
    pub fn unreadable() -> Self {
        Self {
            probe: None,
            output_sizes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<EncodeRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn probe_count(&self) -> usize {
        self.probed.lock().unwrap().len()
    }
}

impl MediaBackend for FakeBackend {
    async fn probe(&self, path: &Path) -> Result<SourceProbe> {
        self.probed.lock().unwrap().push(path.to_path_buf());
        self.probe
            .ok_or_else(|| Error::probe("probe output missing height"))
    }

    async fn encode(&self, request: &EncodeRequest) -> Result<()> {
        self.requests.lock().unwrap().push(request.clone());
        let size = self.output_sizes.lock().unwrap().pop_front();
        match size {
            Some(size) => {
                tokio::fs::write(&request.output_path, vec![0u8; size as usize]).await?;
                Ok(())
            }
            None => Err(Error::encode("ffmpeg exited with status 1")),
        }
    }
}

/// In-memory sticker set store.
#[derive(Default)]
pub struct FakeStore {
    sets: Mutex<HashMap<String, Vec<CollectionItem>>>,
    capacity: Option<usize>,
    failure: Option<String>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn seed(&self, name: &str, items: usize) {
        let item = CollectionItem::video(vec![0u8; 4], "🎬");
        self.sets
            .lock()
            .unwrap()
            .insert(name.to_string(), vec![item; items]);
    }

    pub fn set_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sets.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn items(&self, name: &str) -> Vec<CollectionItem> {
        self.sets
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

impl CollectionStore for FakeStore {
    async fn append_item(&self, target: &CollectionTarget, item: &CollectionItem) -> StoreResult<()> {
        if let Some(message) = &self.failure {
            return Err(StoreError::Other(message.clone()));
        }
        let mut sets = self.sets.lock().unwrap();
        let items = sets.get_mut(&target.name).ok_or(StoreError::NotFound)?;
        if self.capacity.is_some_and(|cap| items.len() >= cap) {
            return Err(StoreError::CapacityExceeded);
        }
        items.push(item.clone());
        Ok(())
    }

    async fn create_collection(
        &self,
        target: &CollectionTarget,
        item: &CollectionItem,
    ) -> StoreResult<()> {
        let mut sets = self.sets.lock().unwrap();
        if sets.contains_key(&target.name) {
            return Err(StoreError::Other("sticker set name is already occupied".into()));
        }
        sets.insert(target.name.clone(), vec![item.clone()]);
        Ok(())
    }
}
