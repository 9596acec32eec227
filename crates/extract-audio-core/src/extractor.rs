//! End-to-end extraction orchestration

use crate::codec::AudioCodec;
use crate::config::Config;
use crate::error::Result;
use crate::locator;
use crate::request::ExtractionRequest;
use crate::runner::{ExtractionResult, Runner};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::info;

/// Owns the resolved FFmpeg path and per-run defaults.
///
/// Construct one per process and pass it to the front-ends; the binary is
/// located exactly once.
#[derive(Debug)]
pub struct Extractor {
    runner: Runner,
    default_codec: AudioCodec,
}

impl Extractor {
    pub fn new(ffmpeg_path: PathBuf, default_codec: AudioCodec) -> Self {
        Self {
            runner: Runner::new(ffmpeg_path),
            default_codec,
        }
    }

    /// Locate FFmpeg and read defaults from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let ffmpeg_path = locator::locate(&config.paths)?;
        let default_codec = config.default_codec()?;
        Ok(Self::new(ffmpeg_path, default_codec))
    }

    /// Extract the audio stream for one request, forwarding FFmpeg log lines
    /// through `log_tx` as they arrive.
    pub async fn extract(
        &self,
        request: &ExtractionRequest,
        log_tx: mpsc::Sender<String>,
    ) -> Result<ExtractionResult> {
        let invocation = request.build(self.default_codec)?;
        info!(
            "Extracting {} -> {}",
            request.input.display(),
            invocation.output.display()
        );
        Ok(self.runner.run(&invocation, log_tx).await?)
    }
}

/// Sidecar log path for an output file: same stem, `txt` extension.
pub fn sidecar_log_path(output: &Path) -> PathBuf {
    output.with_extension("txt")
}

/// Write the captured FFmpeg log next to the output file.
pub async fn write_sidecar_log(output: &Path, log_text: &str) -> std::io::Result<PathBuf> {
    let path = sidecar_log_path(output);
    tokio::fs::write(&path, log_text).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_log_path() {
        assert_eq!(
            sidecar_log_path(Path::new("/music/track.ogg")),
            PathBuf::from("/music/track.txt")
        );
        assert_eq!(
            sidecar_log_path(Path::new("noext")),
            PathBuf::from("noext.txt")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_with_stub_tool() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::File::create(&input).unwrap();

        // /bin/true swallows the composed arguments and exits zero.
        let extractor = Extractor::new(PathBuf::from("/bin/true"), AudioCodec::Mp3);
        let (tx, _rx) = mpsc::channel(64);
        let result = extractor
            .extract(&ExtractionRequest::new(&input), tx)
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output_path, dir.path().join("clip.mp3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_invalid_request_reported_before_spawn() {
        // A runner pointed at a nonexistent binary never gets the chance to
        // fail: request validation comes first.
        let extractor = Extractor::new(PathBuf::from("/no/such/tool"), AudioCodec::Mp3);
        let (tx, _rx) = mpsc::channel(1);
        let err = extractor
            .extract(&ExtractionRequest::new("/no/such/input.mp4"), tx)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::ExtractAudioError::Request(crate::error::RequestError::InputMissing(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_sidecar_log() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("track.mp3");

        let path = write_sidecar_log(&output, "line one\nline two\n")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("track.txt"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("line one"));
    }
}
