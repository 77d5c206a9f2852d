use super::logging::{append_bounded, drain_log_buffer};
use super::models::{Completion, PixelEnhanceGui};
use super::textures::TextureSlot;
use crate::api;
use crate::core::comparator::ComparatorSlider;
use crate::core::datauri::DataUri;
use crate::core::intake::{UPLOAD_ERROR_MESSAGE, UploadedImage, mime_for};
use crate::core::state::Ticket;
use crate::error::{Error, Result};
use crate::io::{Enhancer, GeminiClient};
use crate::types::Resolution;
use eframe::egui;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

/// Extensions offered by the file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff", "ico", "avif",
];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read a dropped file, by path when the platform gives one, otherwise from
/// its in-memory bytes. Only files that pass the picker's filter are taken.
pub fn upload_from_drop(file: &egui::DroppedFile) -> Result<UploadedImage> {
    if let Some(path) = &file.path {
        if !is_image_path(path) {
            return Err(Error::NotAnImage {
                name: path.display().to_string(),
            });
        }
        return UploadedImage::from_path(path);
    }

    let Some(bytes) = &file.bytes else {
        return Err(Error::Io(std::io::Error::other(
            "dropped file carried neither a path nor bytes",
        )));
    };
    let declared_image = file.mime.starts_with("image/");
    if !declared_image && !is_image_path(Path::new(&file.name)) {
        return Err(Error::NotAnImage {
            name: file.name.clone(),
        });
    }
    let mime = if declared_image {
        file.mime.clone()
    } else {
        mime_for(Path::new(&file.name), bytes)
    };
    Ok(UploadedImage::from_bytes(file.name.clone(), mime, bytes))
}

impl PixelEnhanceGui {
    pub fn select_image_file(&mut self) {
        if self.workflow.is_enhancing() {
            debug!("Enhancement in progress, picker ignored");
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            info!("Selected input file: {:?}", path);
            self.load_upload_from_path(&path);
        }
    }

    pub fn load_upload_from_path(&mut self, path: &Path) {
        trace!("Reading upload from {:?}", path);
        self.apply_upload(UploadedImage::from_path(path));
    }

    /// Takes the first file dropped on the window this frame.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if self.workflow.is_enhancing() {
            debug!("Ignoring dropped file {:?} while enhancing", file.name);
            return;
        }

        self.apply_upload(upload_from_drop(&file));
    }

    pub fn apply_upload(&mut self, upload: Result<UploadedImage>) {
        match upload {
            Ok(image) => {
                let name = image.file_name.clone();
                match self.workflow.accept_upload(image) {
                    Ok(()) => {
                        self.textures.clear();
                        self.slider = ComparatorSlider::default();
                        self.last_processing_duration = None;
                        self.status_message = format!("Loaded {}", name);
                    }
                    Err(e) => warn!("Upload of {} refused: {}", name, e),
                }
            }
            Err(e) => {
                error!("Error reading image: {}", e);
                self.workflow.reject_upload(UPLOAD_ERROR_MESSAGE);
            }
        }
    }

    fn enhancer(&mut self) -> Result<Arc<dyn Enhancer>> {
        if let Some(enhancer) = &self.enhancer {
            return Ok(Arc::clone(enhancer));
        }
        let client: Arc<dyn Enhancer> = Arc::new(GeminiClient::new(self.config.clone())?);
        self.enhancer = Some(Arc::clone(&client));
        Ok(client)
    }

    pub fn start_enhancement(&mut self, ctx: &egui::Context, resolution: Resolution) {
        let request = match self.workflow.begin_enhancement(resolution) {
            Ok(request) => request,
            Err(e) => {
                debug!("Enhancement not started: {}", e);
                return;
            }
        };

        self.processing_start_time = Some(Instant::now());
        self.last_processing_duration = None;
        self.textures.enhanced = TextureSlot::Empty;
        self.slider = ComparatorSlider::default();
        self.status_message = format!("Enhancing to {}...", resolution);
        info!("Enhancement started at {}", resolution);

        let enhancer = match self.enhancer() {
            Ok(enhancer) => enhancer,
            Err(e) => {
                error!("Could not create enhancement client: {}", e);
                self.finish_enhancement(request.ticket, Err(e));
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            trace!("Background enhancement thread started");
            let outcome = enhancer.enhance(&request.image, request.resolution);
            let _ = tx.send(Completion {
                ticket: request.ticket,
                outcome,
            });
            ctx.request_repaint();
        });

        self.completion_receiver = Some(rx);
    }

    /// Checks the worker channel once; called every frame.
    pub fn poll_completion(&mut self) {
        let Some(receiver) = &self.completion_receiver else {
            return;
        };
        let completion = match receiver.try_recv() {
            Ok(completion) => completion,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.completion_receiver = None;
                let Some(ticket) = self.workflow.in_flight() else {
                    return;
                };
                Completion {
                    ticket,
                    outcome: Err(Error::Io(std::io::Error::other(
                        "enhancement worker stopped unexpectedly",
                    ))),
                }
            }
        };
        self.completion_receiver = None;
        self.finish_enhancement(completion.ticket, completion.outcome);
    }

    fn finish_enhancement(&mut self, ticket: Ticket, outcome: Result<DataUri>) {
        let succeeded = outcome.is_ok();
        if !self.workflow.complete_enhancement(ticket, outcome) {
            return;
        }
        if let Some(start_time) = self.processing_start_time.take() {
            let duration = start_time.elapsed();
            self.last_processing_duration = Some(duration);
            info!("Enhancement completed in {:.2?}", duration);
        }
        self.status_message = if succeeded {
            match self.workflow.result() {
                Some(result) => format!("Ready to download {}", result.download_name),
                None => "Enhanced".to_string(),
            }
        } else {
            "Enhancement failed".to_string()
        };
    }

    /// Upload textures for whatever images the workflow holds that are not
    /// on the GPU yet.
    pub fn ensure_textures(&mut self, ctx: &egui::Context) {
        if self.textures.original.is_empty() {
            if let Some(original) = self.workflow.original() {
                self.textures.original = TextureSlot::load(ctx, "original", &original.data_uri);
            }
        }
        if self.textures.enhanced.is_empty() {
            if let Some(result) = self.workflow.result() {
                self.textures.enhanced = TextureSlot::load(ctx, "enhanced", &result.image);
            }
        }
    }

    pub fn download_enhanced(&mut self) {
        let Some(result) = self.workflow.result() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&result.download_name)
            .save_file()
        else {
            debug!("Download cancelled");
            return;
        };
        self.save_result_to(&path);
    }

    /// Write the current result to `path` and report the outcome in the status bar.
    pub fn save_result_to(&mut self, path: &Path) {
        let Some(result) = self.workflow.result() else {
            return;
        };
        self.status_message = match api::save_enhanced(result, path) {
            Ok(written) => {
                info!("Saved enhanced image to {:?}", written);
                format!("Saved {}", written.display())
            }
            Err(e) => {
                error!("Failed to save enhanced image: {}", e);
                format!("Save failed: {}", e)
            }
        };
    }

    pub fn reset(&mut self) {
        info!("Starting over");
        self.workflow.reset();
        self.slider = ComparatorSlider::default();
        self.textures.clear();
        self.processing_start_time = None;
        self.last_processing_duration = None;
        self.status_message = "Ready".to_string();
    }

    /// Move captured log events into the panel history. Returns true if any
    /// arrived.
    pub fn collect_logs(&mut self) -> bool {
        let new_messages = drain_log_buffer();
        if new_messages.is_empty() {
            return false;
        }
        if let Ok(mut logs) = self.log_messages.lock() {
            append_bounded(&mut logs, new_messages);
        }
        true
    }
}
