//! FFmpeg executable discovery

use crate::config::PathsConfig;
use crate::error::LocateError;
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(windows)]
const FFMPEG_EXE: &str = "ffmpeg.exe";
#[cfg(not(windows))]
const FFMPEG_EXE: &str = "ffmpeg";

/// Where a resolved binary came from, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Config,
    Environment,
    Bundled,
    SystemPath,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Config => write!(f, "config"),
            Source::Environment => write!(f, "FFMPEG_PATH"),
            Source::Bundled => write!(f, "bundled"),
            Source::SystemPath => write!(f, "PATH"),
        }
    }
}

/// Resolve the FFmpeg binary.
///
/// Resolution order: explicit config path, the `FFMPEG_PATH` environment
/// variable, a copy bundled next to the running executable, then the system
/// PATH. The result is passed around explicitly; nothing is cached globally.
pub fn locate(paths: &PathsConfig) -> Result<PathBuf, LocateError> {
    locate_with_source(paths).map(|(path, _)| path)
}

/// Same resolution as [`locate`], also reporting where the binary came from.
pub fn locate_with_source(paths: &PathsConfig) -> Result<(PathBuf, Source), LocateError> {
    if let Some(ref path) = paths.ffmpeg {
        return Ok((path.clone(), Source::Config));
    }

    if let Some(path) = std::env::var_os("FFMPEG_PATH") {
        return Ok((PathBuf::from(path), Source::Environment));
    }

    locate_near(bundled_dir().as_deref())
}

/// Directory holding the running executable, if it can be determined.
fn bundled_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

fn locate_near(bundled_dir: Option<&Path>) -> Result<(PathBuf, Source), LocateError> {
    if let Some(dir) = bundled_dir {
        let candidate = dir.join(FFMPEG_EXE);
        if candidate.is_file() {
            debug!("Using bundled ffmpeg: {}", candidate.display());
            return Ok((candidate, Source::Bundled));
        }
    }

    which::which("ffmpeg")
        .map(|path| (path, Source::SystemPath))
        .map_err(|_| LocateError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_wins() {
        let paths = PathsConfig {
            ffmpeg: Some(PathBuf::from("/opt/tools/ffmpeg")),
        };
        let (path, source) = locate_with_source(&paths).unwrap();
        assert_eq!(path, PathBuf::from("/opt/tools/ffmpeg"));
        assert_eq!(source, Source::Config);
    }

    #[test]
    fn test_bundled_binary_preferred_over_path() {
        let dir = tempfile::tempdir().unwrap();
        let bundled = dir.path().join(FFMPEG_EXE);
        std::fs::File::create(&bundled).unwrap();

        let (path, source) = locate_near(Some(dir.path())).unwrap();
        assert_eq!(path, bundled);
        assert_eq!(source, Source::Bundled);
    }

    #[test]
    fn test_missing_bundled_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        // No file inside; resolution continues to the system PATH and either
        // finds a real ffmpeg there or reports NotFound.
        match locate_near(Some(dir.path())) {
            Ok((_, source)) => assert_eq!(source, Source::SystemPath),
            Err(LocateError::NotFound) => {}
        }
    }
}
