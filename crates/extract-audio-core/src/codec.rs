//! Audio codec selection and the FFmpeg encoder arguments behind it

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCodec {
    Mp3,
    Wav,
    Flac,
    Aac,
    Vorbis,
    Opus,
}

impl AudioCodec {
    /// Container extension used when the output name is derived from the input.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "mp3",
            AudioCodec::Wav => "wav",
            AudioCodec::Flac => "flac",
            AudioCodec::Aac => "m4a",
            AudioCodec::Vorbis => "ogg",
            AudioCodec::Opus => "opus",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mp3" => Some(AudioCodec::Mp3),
            "wav" => Some(AudioCodec::Wav),
            "flac" => Some(AudioCodec::Flac),
            "aac" | "m4a" => Some(AudioCodec::Aac),
            "vorbis" | "ogg" => Some(AudioCodec::Vorbis),
            "opus" => Some(AudioCodec::Opus),
            _ => None,
        }
    }

    /// Encoder selection for the output stream.
    pub fn encoder_args(&self) -> Vec<&'static str> {
        match self {
            AudioCodec::Mp3 => vec![
                "-c:a", "libmp3lame",
                "-q:a", "0",  // VBR highest quality (~245 kbps)
            ],
            AudioCodec::Wav => vec![
                "-c:a", "pcm_s16le",
            ],
            AudioCodec::Flac => vec![
                "-c:a", "flac",
            ],
            AudioCodec::Aac => vec![
                "-c:a", "aac",
                "-b:a", "256k",
            ],
            AudioCodec::Vorbis => vec![
                "-c:a", "libvorbis",
                "-q:a", "6",
            ],
            AudioCodec::Opus => vec![
                "-c:a", "libopus",
                "-b:a", "192k",
            ],
        }
    }
}

impl std::fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioCodec::Mp3 => write!(f, "MP3"),
            AudioCodec::Wav => write!(f, "WAV"),
            AudioCodec::Flac => write!(f, "FLAC"),
            AudioCodec::Aac => write!(f, "AAC"),
            AudioCodec::Vorbis => write!(f, "Vorbis"),
            AudioCodec::Opus => write!(f, "Opus"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(AudioCodec::from_str("mp3"), Some(AudioCodec::Mp3));
        assert_eq!(AudioCodec::from_str("VORBIS"), Some(AudioCodec::Vorbis));
        assert_eq!(AudioCodec::from_str("m4a"), Some(AudioCodec::Aac));
        assert_eq!(AudioCodec::from_str("wma"), None);
    }

    #[test]
    fn test_extension() {
        assert_eq!(AudioCodec::Vorbis.extension(), "ogg");
        assert_eq!(AudioCodec::Aac.extension(), "m4a");
        assert_eq!(AudioCodec::Mp3.extension(), "mp3");
    }

    #[test]
    fn test_encoder_args_select_a_codec() {
        for codec in [
            AudioCodec::Mp3,
            AudioCodec::Wav,
            AudioCodec::Flac,
            AudioCodec::Aac,
            AudioCodec::Vorbis,
            AudioCodec::Opus,
        ] {
            assert_eq!(codec.encoder_args()[0], "-c:a");
        }
    }
}
