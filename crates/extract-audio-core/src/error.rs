//! Error types for extract-audio-core

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractAudioError>;

#[derive(Error, Debug)]
pub enum ExtractAudioError {
    #[error("Executable lookup failed: {0}")]
    Locate(#[from] LocateError),

    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    #[error("Extraction failed: {0}")]
    Run(#[from] RunError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("ffmpeg not found. Place the binary next to the executable or install it on PATH")]
    NotFound,
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("input file {0} does not exist")]
    InputMissing(PathBuf),

    #[error("output directory {0} does not exist")]
    OutputDirMissing(PathBuf),
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to launch ffmpeg: {0}")]
    Launch(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
