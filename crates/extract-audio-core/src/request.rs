//! Extraction requests and FFmpeg argument construction

use crate::codec::AudioCodec;
use crate::error::RequestError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A single extraction job as supplied by a front-end.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub input: PathBuf,
    /// Explicit output file; takes precedence over `output_dir`
    pub output: Option<PathBuf>,
    /// Directory to place an input-derived output file in
    pub output_dir: Option<PathBuf>,
    pub codec: Option<AudioCodec>,
}

/// Composed FFmpeg arguments plus the output path they will produce.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub args: Vec<OsString>,
    pub output: PathBuf,
}

impl ExtractionRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            output_dir: None,
            codec: None,
        }
    }

    /// Resolve the output path and compose the FFmpeg argument vector.
    ///
    /// An explicit output path is honored verbatim and its extension selects
    /// the container; otherwise the file is named after the input's stem with
    /// an extension derived from the codec (`default_codec` when the request
    /// names none). Validates both paths before any subprocess work.
    pub fn build(&self, default_codec: AudioCodec) -> Result<Invocation, RequestError> {
        if !self.input.exists() {
            return Err(RequestError::InputMissing(self.input.clone()));
        }

        let output = self.resolve_output(default_codec);
        let parent = match output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.is_dir() {
            return Err(RequestError::OutputDirMissing(parent));
        }

        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-i".into(),
            self.input.clone().into(),
            "-vn".into(),
        ];
        if let Some(codec) = self.effective_codec(default_codec) {
            args.extend(codec.encoder_args().into_iter().map(OsString::from));
        }
        args.push("-y".into());
        args.push(output.clone().into());

        Ok(Invocation { args, output })
    }

    /// Explicit outputs without a codec leave encoder choice to FFmpeg, which
    /// infers it from the extension.
    fn effective_codec(&self, default_codec: AudioCodec) -> Option<AudioCodec> {
        match (self.codec, &self.output) {
            (Some(codec), _) => Some(codec),
            (None, Some(_)) => None,
            (None, None) => Some(default_codec),
        }
    }

    fn resolve_output(&self, default_codec: AudioCodec) -> PathBuf {
        if let Some(ref output) = self.output {
            return output.clone();
        }

        let codec = self.codec.unwrap_or(default_codec);
        let stem = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let file_name = format!("{}.{}", stem, codec.extension());

        let dir = match self.output_dir {
            Some(ref dir) => dir.clone(),
            None => self
                .input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::File::create(path).unwrap();
    }

    fn arg_strings(invocation: &Invocation) -> Vec<String> {
        invocation
            .args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_default_output_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.mp4");
        touch(&input);

        let request = ExtractionRequest::new(&input);
        let invocation = request.build(AudioCodec::Mp3).unwrap();

        assert_eq!(invocation.output, dir.path().join("input.mp3"));
        let args = arg_strings(&invocation);
        assert!(args.contains(&"-vn".to_string()));
        assert!(args.contains(&"-y".to_string()));
        assert!(args.contains(&"libmp3lame".to_string()));
    }

    #[test]
    fn test_output_dir_with_codec() {
        let in_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let input = in_dir.path().join("input.mov");
        touch(&input);

        let mut request = ExtractionRequest::new(&input);
        request.output_dir = Some(out_dir.path().to_path_buf());
        request.codec = Some(AudioCodec::Vorbis);
        let invocation = request.build(AudioCodec::Mp3).unwrap();

        assert_eq!(invocation.output, out_dir.path().join("input.ogg"));
        assert!(arg_strings(&invocation).contains(&"libvorbis".to_string()));
    }

    #[test]
    fn test_explicit_output_extension_wins() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        touch(&input);

        let mut request = ExtractionRequest::new(&input);
        request.output = Some(dir.path().join("audio.ogg"));
        request.codec = Some(AudioCodec::Mp3);
        let invocation = request.build(AudioCodec::Mp3).unwrap();

        // Extension governs the container; the codec still selects the stream
        // encoder.
        assert_eq!(invocation.output, dir.path().join("audio.ogg"));
        assert!(arg_strings(&invocation).contains(&"libmp3lame".to_string()));
    }

    #[test]
    fn test_explicit_output_without_codec_omits_encoder() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        touch(&input);

        let mut request = ExtractionRequest::new(&input);
        request.output = Some(dir.path().join("audio.flac"));
        let invocation = request.build(AudioCodec::Mp3).unwrap();

        assert!(!arg_strings(&invocation).contains(&"-c:a".to_string()));
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let request = ExtractionRequest::new(dir.path().join("nope.mp4"));
        assert!(matches!(
            request.build(AudioCodec::Mp3),
            Err(RequestError::InputMissing(_))
        ));
    }

    #[test]
    fn test_missing_output_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.mp4");
        touch(&input);

        let mut request = ExtractionRequest::new(&input);
        request.output_dir = Some(dir.path().join("missing"));
        assert!(matches!(
            request.build(AudioCodec::Mp3),
            Err(RequestError::OutputDirMissing(_))
        ));
    }
}
