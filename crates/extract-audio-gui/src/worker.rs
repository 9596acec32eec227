//! Background extraction worker

use eframe::egui;
use extract_audio_core::extractor::{self, Extractor};
use extract_audio_core::request::ExtractionRequest;
use extract_audio_core::AudioCodec;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use tokio::sync::mpsc;
use tracing::warn;

/// Messages from the worker thread to the UI.
#[derive(Debug)]
pub enum WorkerEvent {
    Line(String),
    FileFinished {
        input: PathBuf,
        output: Option<PathBuf>,
        success: bool,
    },
    BatchFinished,
}

/// One run of the extraction queue, shared settings across the batch.
pub struct Batch {
    pub files: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub codec: AudioCodec,
}

/// Process `batch` on a dedicated thread, reporting progress through
/// `events`. Files run strictly sequentially, one FFmpeg process at a time,
/// so log output stays ordered per file; a failed file does not stop the
/// ones after it.
pub fn spawn(ffmpeg_path: PathBuf, batch: Batch, events: Sender<WorkerEvent>, ctx: egui::Context) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                let _ = events.send(WorkerEvent::Line(format!(
                    "Failed to start worker runtime: {e}"
                )));
                let _ = events.send(WorkerEvent::BatchFinished);
                ctx.request_repaint();
                return;
            }
        };

        runtime.block_on(run_batch(ffmpeg_path, batch, &events, &ctx));

        let _ = events.send(WorkerEvent::BatchFinished);
        ctx.request_repaint();
    });
}

async fn run_batch(
    ffmpeg_path: PathBuf,
    batch: Batch,
    events: &Sender<WorkerEvent>,
    ctx: &egui::Context,
) {
    let extractor = Extractor::new(ffmpeg_path, batch.codec);

    for input in &batch.files {
        let request = ExtractionRequest {
            input: input.clone(),
            output: None,
            output_dir: batch.output_dir.clone(),
            codec: Some(batch.codec),
        };

        let (tx, mut rx) = mpsc::channel(64);
        let line_events = events.clone();
        let line_ctx = ctx.clone();
        let forward = tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                let _ = line_events.send(WorkerEvent::Line(line));
                line_ctx.request_repaint();
            }
        });

        let outcome = extractor.extract(&request, tx).await;
        let _ = forward.await;

        match outcome {
            Ok(result) => {
                if let Err(e) = extractor::write_sidecar_log(&result.output_path, &result.log_text).await
                {
                    warn!("Failed to write sidecar log: {e}");
                    let _ = events.send(WorkerEvent::Line(format!("Could not write log file: {e}")));
                }
                let _ = events.send(WorkerEvent::FileFinished {
                    input: input.clone(),
                    output: Some(result.output_path),
                    success: result.success,
                });
            }
            Err(e) => {
                let _ = events.send(WorkerEvent::Line(format!("Error: {e}")));
                let _ = events.send(WorkerEvent::FileFinished {
                    input: input.clone(),
                    output: None,
                    success: false,
                });
            }
        }
        ctx.request_repaint();
    }
}
