use super::scratch::ScratchSpace;
use crate::config::{Config, EncodingConfig, StickerConfig};
use crate::encoding::{scale, AdaptiveEncoder, EncodeJob, EncodeOutcome, MediaBackend, SourceProbe};
use crate::stickers::{upsert_item, CollectionItem, CollectionStore, CollectionTarget, UpsertOutcome};
use crate::utils::logging::log_probe_result;
use crate::utils::Result;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerRequest {
    pub owner_id: u64,
    pub emoji: String,
}

#[derive(Debug, Clone)]
pub struct StickerReport {
    pub request_id: Uuid,
    pub probe: SourceProbe,
    pub encode: EncodeOutcome,
    pub target: CollectionTarget,
    pub upsert: UpsertOutcome,
}

/// Probe, plan and encode `source` into `output`, using `temp` for the quality pass.
pub async fn convert<B: MediaBackend>(
    backend: &B,
    encoding: &EncodingConfig,
    source: &Path,
    temp: &Path,
    output: &Path,
) -> Result<(SourceProbe, EncodeOutcome)> {
    let probe = backend.probe(source).await?;
    let plan = scale::ScalePlan::with_long_side(probe.width, probe.height, encoding.target_long_side);
    log_probe_result(&probe, &plan);

    let job = EncodeJob::new(source, plan, encoding);
    let outcome = AdaptiveEncoder::new(backend, encoding)
        .encode(&job, &probe, temp, output)
        .await?;
    Ok((probe, outcome))
}

/// Source file to registered sticker, for one request at a time.
pub struct StickerPipeline<B, S> {
    backend: B,
    store: S,
    encoding: EncodingConfig,
    stickers: StickerConfig,
    scratch_root: PathBuf,
    service_identity: String,
}

impl<B: MediaBackend, S: CollectionStore> StickerPipeline<B, S> {
    pub fn new(backend: B, store: S, config: &Config, service_identity: impl Into<String>) -> Self {
        Self {
            backend,
            store,
            encoding: config.encoding.clone(),
            stickers: config.stickers.clone(),
            scratch_root: PathBuf::from(&config.app.temp_dir),
            service_identity: service_identity.into(),
        }
    }

    pub fn target_for(&self, owner_id: u64) -> CollectionTarget {
        CollectionTarget::derive(owner_id, &self.service_identity, &self.stickers)
    }

    pub fn default_emoji(&self) -> &str {
        &self.stickers.default_emoji
    }

    /// Runs one request. `fetch` writes the source file to the path it is
    /// given. Scratch files are gone when this returns, on every outcome.
    pub async fn process<F, Fut>(&self, request: &StickerRequest, fetch: F) -> Result<StickerReport>
    where
        F: FnOnce(PathBuf) -> Fut + Send,
        Fut: Future<Output = Result<()>> + Send,
    {
        let scratch = ScratchSpace::allocate(&self.scratch_root).await?;
        info!(
            request_id = %scratch.id(),
            owner_id = request.owner_id,
            "Processing sticker request"
        );

        let result = self.run(request, &scratch, fetch).await;
        scratch.release();
        result
    }

    async fn run<F, Fut>(
        &self,
        request: &StickerRequest,
        scratch: &ScratchSpace,
        fetch: F,
    ) -> Result<StickerReport>
    where
        F: FnOnce(PathBuf) -> Fut + Send,
        Fut: Future<Output = Result<()>> + Send,
    {
        fetch(scratch.input_path().to_path_buf()).await?;

        let (probe, encode) = convert(
            &self.backend,
            &self.encoding,
            scratch.input_path(),
            scratch.quality_temp_path(),
            scratch.output_path(),
        )
        .await?;

        let payload = tokio::fs::read(&encode.output_path).await?;
        let target = self.target_for(request.owner_id);
        let item = CollectionItem::video(payload, request.emoji.clone());
        let upsert = upsert_item(&self.store, &target, &item).await?;

        Ok(StickerReport {
            request_id: scratch.id(),
            probe,
            encode,
            target,
            upsert,
        })
    }
}
