use clap::{Parser, Subcommand, ValueEnum};
use extract_audio_core::AudioCodec;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "extract_audio")]
#[command(version, about = "Extract audio tracks from video files with FFmpeg")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input video file (shorthand for `extract <INPUT>`)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output audio file; its extension selects the container
    #[arg(value_name = "OUTPUT", conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Directory to place the output in, named after the input
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// Audio codec for the extracted stream
    #[arg(short, long, value_enum)]
    pub codec: Option<CodecArg>,

    /// Write the captured FFmpeg log to this file
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Verbose output (-v streams raw FFmpeg lines, -vv traces)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract audio from a single video file
    Extract {
        /// Input video file
        input: PathBuf,

        /// Output audio file; its extension selects the container
        #[arg(conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: ExtractOptions,
    },

    /// Check that FFmpeg can be found
    Doctor,

    /// Show configuration
    Config,
}

#[derive(clap::Args, Clone)]
pub struct ExtractOptions {
    /// Directory to place the output in, named after the input
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// Audio codec for the extracted stream
    #[arg(short, long, value_enum)]
    pub codec: Option<CodecArg>,

    /// Write the captured FFmpeg log to this file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodecArg {
    /// MP3 - lossy, widely compatible
    Mp3,
    /// WAV - uncompressed PCM
    Wav,
    /// FLAC - lossless compression
    Flac,
    /// AAC - lossy, good quality/size ratio
    Aac,
    /// Vorbis - lossy, ogg container
    Vorbis,
    /// Opus - lossy, best quality/size ratio
    Opus,
}

impl From<CodecArg> for AudioCodec {
    fn from(value: CodecArg) -> Self {
        match value {
            CodecArg::Mp3 => AudioCodec::Mp3,
            CodecArg::Wav => AudioCodec::Wav,
            CodecArg::Flac => AudioCodec::Flac,
            CodecArg::Aac => AudioCodec::Aac,
            CodecArg::Vorbis => AudioCodec::Vorbis,
            CodecArg::Opus => AudioCodec::Opus,
        }
    }
}
