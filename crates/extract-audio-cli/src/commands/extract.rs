use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio::sync::mpsc;

use crate::args::ExtractOptions;
use extract_audio_core::{
    config::Config,
    extractor::Extractor,
    request::ExtractionRequest,
};

pub async fn run(
    input: &Path,
    output: Option<&Path>,
    options: &ExtractOptions,
    config_path: Option<&Path>,
    stream_log: bool,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let extractor = Extractor::from_config(&config)?;

    let output_dir = options
        .output_dir
        .clone()
        .or_else(|| config.output.default_directory.clone());

    let request = ExtractionRequest {
        input: input.to_path_buf(),
        output: output.map(Path::to_path_buf),
        output_dir,
        codec: options.codec.map(Into::into),
    };

    // Create log line channel
    let (tx, mut rx) = mpsc::channel::<String>(64);

    // Spawn log handler: raw lines under -v, a spinner otherwise
    let log_handle = if stream_log {
        tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                println!("{line}");
            }
            None
        })
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?.tick_chars("=>-"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                pb.set_message(truncate(&line, 70));
            }
            Some(pb)
        })
    };

    let result = extractor.extract(&request, tx).await?;
    let pb = log_handle.await?;

    if let Some(ref log_path) = options.log {
        tokio::fs::write(log_path, &result.log_text).await?;
    }

    if result.success {
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        println!("{}", result.output_path.display());
        Ok(())
    } else {
        if let Some(pb) = pb {
            pb.abandon_with_message("extraction failed");
        }
        if !stream_log {
            eprint!("{}", result.log_text);
        }
        match result.exit_code {
            Some(code) => bail!("ffmpeg exited with status {code}"),
            None => bail!("ffmpeg terminated by signal"),
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
