//! Main window state and layout

use eframe::egui::{self, Color32, RichText};
use extract_audio_core::{locator, AudioCodec, Config};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

use crate::worker::{self, Batch, WorkerEvent};

/// Extensions offered by the input picker and accepted on drop.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "webm", "m4v", "mpg", "mpeg", "wmv", "flv",
];

const CODECS: &[AudioCodec] = &[
    AudioCodec::Mp3,
    AudioCodec::Wav,
    AudioCodec::Flac,
    AudioCodec::Aac,
    AudioCodec::Vorbis,
    AudioCodec::Opus,
];

pub struct ExtractorApp {
    input_files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    codec: AudioCodec,
    log: String,
    running: bool,
    events: Option<Receiver<WorkerEvent>>,
    ffmpeg_path: Option<PathBuf>,
    ffmpeg_error: Option<String>,
    finished: usize,
    failed: usize,
}

impl ExtractorApp {
    pub fn new() -> Self {
        let (config, mut log) = match Config::load(None) {
            Ok(config) => (config, String::new()),
            Err(e) => (
                Config::default(),
                format!("Could not load configuration: {e}\n"),
            ),
        };
        let codec = config.default_codec().unwrap_or(AudioCodec::Mp3);

        let (ffmpeg_path, ffmpeg_error) = match locator::locate(&config.paths) {
            Ok(path) => {
                log.push_str(&format!("Using FFmpeg at {}\n", path.display()));
                (Some(path), None)
            }
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            input_files: Vec::new(),
            output_dir: config.output.default_directory.clone(),
            codec,
            log,
            running: false,
            events: None,
            ffmpeg_path,
            ffmpeg_error,
            finished: 0,
            failed: 0,
        }
    }

    /// Move pending worker events into the log buffer. Only this thread
    /// touches the buffer; the worker talks through the channel alone.
    fn drain_events(&mut self) {
        let Some(rx) = self.events.take() else {
            return;
        };

        let mut batch_done = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                WorkerEvent::Line(line) => {
                    self.log.push_str(&line);
                    self.log.push('\n');
                }
                WorkerEvent::FileFinished {
                    input,
                    output,
                    success,
                } => {
                    if success {
                        self.finished += 1;
                        if let Some(output) = output {
                            self.log
                                .push_str(&format!("Finished {}\n", output.display()));
                        }
                    } else {
                        self.failed += 1;
                        self.log
                            .push_str(&format!("Extraction failed for {}\n", input.display()));
                    }
                }
                WorkerEvent::BatchFinished => {
                    batch_done = true;
                }
            }
        }

        if batch_done {
            self.running = false;
            self.log.push_str("All files processed.\n");
        } else {
            self.events = Some(rx);
        }
    }

    fn start_extraction(&mut self, ctx: &egui::Context) {
        let Some(ffmpeg_path) = self.ffmpeg_path.clone() else {
            return;
        };

        let (tx, rx) = channel();
        self.events = Some(rx);
        self.running = true;
        self.finished = 0;
        self.failed = 0;

        let destination = match &self.output_dir {
            Some(dir) => dir.display().to_string(),
            None => "the input folders".to_string(),
        };
        self.log.push_str(&format!(
            "Extracting {} file(s) to {} as {}...\n",
            self.input_files.len(),
            destination,
            self.codec
        ));

        worker::spawn(
            ffmpeg_path,
            Batch {
                files: self.input_files.clone(),
                output_dir: self.output_dir.clone(),
                codec: self.codec,
            },
            tx,
            ctx.clone(),
        );
    }

    fn open_file_dialog(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Video Files", VIDEO_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_files()
        {
            self.log.push_str(&format!("Selected {} file(s).\n", paths.len()));
            self.input_files.extend(paths);
        }
    }

    fn open_folder_dialog(&mut self) {
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.log
                .push_str(&format!("Output directory set to: {}\n", dir.display()));
            self.output_dir = Some(dir);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.running {
            return;
        }

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .filter(|p| {
                    p.extension()
                        .and_then(|e| e.to_str())
                        .map(|e| VIDEO_EXTENSIONS.iter().any(|ext| ext.eq_ignore_ascii_case(e)))
                        .unwrap_or(false)
                })
                .collect()
        });

        if !dropped.is_empty() {
            self.log
                .push_str(&format!("Selected {} file(s).\n", dropped.len()));
            self.input_files.extend(dropped);
        }
    }

    fn show_controls(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        if let Some(ref error) = self.ffmpeg_error {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⚠").color(Color32::YELLOW));
                ui.label(RichText::new(error).color(Color32::YELLOW).small());
            });
            ui.separator();
        }

        ui.horizontal(|ui| {
            ui.add_enabled_ui(!self.running, |ui| {
                if ui.button("Add Files").clicked() {
                    self.open_file_dialog();
                }
                if ui.button("Set Output Folder").clicked() {
                    self.open_folder_dialog();
                }
                if ui.button("Clear Files").clicked() {
                    self.input_files.clear();
                }
            });
        });

        ui.horizontal(|ui| {
            ui.label("Output:");
            let destination = self
                .output_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "(same folder as each input)".to_string());
            ui.label(RichText::new(destination).monospace().small());
        });

        ui.horizontal(|ui| {
            ui.label("Format:");
            ui.add_enabled_ui(!self.running, |ui| {
                for codec in CODECS {
                    if ui
                        .selectable_label(self.codec == *codec, codec.to_string())
                        .clicked()
                    {
                        self.codec = *codec;
                    }
                }
            });
        });

        ui.horizontal(|ui| {
            let can_run =
                !self.running && !self.input_files.is_empty() && self.ffmpeg_path.is_some();
            ui.add_enabled_ui(can_run, |ui| {
                if ui.button("Run Extraction").clicked() {
                    self.start_extraction(ctx);
                }
            });
            if ui.button("Clear Log").clicked() {
                self.log.clear();
            }
            if self.running {
                ui.spinner();
                ui.label("Working...");
            } else if self.finished + self.failed > 0 {
                ui.label(format!("{} done, {} failed", self.finished, self.failed));
            }
        });
    }
}

impl eframe::App for ExtractorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.show_controls(ctx, ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.input_files.is_empty() {
                ui.label(
                    RichText::new("Drop video files here or click Add Files")
                        .italics()
                        .color(Color32::GRAY),
                );
            } else {
                egui::ScrollArea::vertical()
                    .id_salt("files")
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for file in &self.input_files {
                            ui.label(RichText::new(file.display().to_string()).small());
                        }
                    });
            }
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("log")
                .stick_to_bottom(true)
                .auto_shrink(false)
                .show(ui, |ui| {
                    ui.label(RichText::new(self.log.as_str()).monospace().small());
                });
        });

        // Keep draining while the worker runs, even without input events
        if self.running {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

impl Default for ExtractorApp {
    fn default() -> Self {
        Self::new()
    }
}
