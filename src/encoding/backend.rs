use super::job::EncodeRequest;
use super::probe::SourceProbe;
use crate::utils::Result;
use std::future::Future;
use std::path::Path;

/// Media inspection and encoding, as consumed by the sticker pipeline.
///
/// `FfmpegWrapper` implements this by running ffprobe/ffmpeg subprocesses;
/// tests substitute in-process fakes.
pub trait MediaBackend: Send + Sync {
    /// Width, height and duration of the first video stream.
    fn probe(&self, path: &Path) -> impl Future<Output = Result<SourceProbe>> + Send;

    /// Writes `request.output_path`. Returns an error on abnormal exit or timeout.
    fn encode(&self, request: &EncodeRequest) -> impl Future<Output = Result<()>> + Send;
}
