use crate::core::comparator::ComparatorSlider;
use crate::core::datauri::DataUri;
use crate::core::params::EnhanceConfig;
use crate::core::state::{Ticket, Workflow};
use crate::gui::logging::{GuiLogLayer, LogEntry};
use crate::gui::textures::TextureCache;
use crate::io::Enhancer;
use once_cell::sync::OnceCell;
use std::fs;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

static LOGGING_INIT: OnceCell<()> = OnceCell::new();

pub fn init_gui_logging() {
    LOGGING_INIT.get_or_init(|| {
        let gui_layer = GuiLogLayer::new();

        // Keep the toolkit and HTTP stack quiet; our own events pass at every level.
        let mut filter = EnvFilter::new("trace");
        for directive in ["eframe=info", "egui=info", "winit=info", "wgpu=warn", "reqwest=info", "hyper=info", "hyper_util=info"] {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }

        let subscriber = Registry::default().with(gui_layer).with(filter);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// What the enhancement worker sends back.
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: crate::Result<DataUri>,
}

pub struct PixelEnhanceGui {
    // Workflow and the data it owns
    pub workflow: Workflow,
    pub slider: ComparatorSlider,
    pub textures: TextureCache,

    // Service
    pub config: EnhanceConfig,
    pub enhancer: Option<Arc<dyn Enhancer>>,

    // Status
    pub status_message: String,
    pub processing_start_time: Option<Instant>,
    pub last_processing_duration: Option<Duration>,

    // Log panel
    pub show_logs: bool,
    pub min_log_level: Level,
    pub log_messages: Arc<Mutex<Vec<LogEntry>>>,

    // Receiver for the single in-flight enhancement
    pub completion_receiver: Option<Receiver<Completion>>,
}

impl Default for PixelEnhanceGui {
    fn default() -> Self {
        Self::with_config(EnhanceConfig::from_env())
    }
}

impl PixelEnhanceGui {
    pub fn with_config(config: EnhanceConfig) -> Self {
        Self {
            workflow: Workflow::new(),
            slider: ComparatorSlider::default(),
            textures: TextureCache::default(),
            config,
            enhancer: None,
            status_message: "Ready".to_string(),
            processing_start_time: None,
            last_processing_duration: None,
            show_logs: false,
            min_log_level: Level::TRACE,
            log_messages: Arc::new(Mutex::new(Vec::new())),
            completion_receiver: None,
        }
    }

    /// Use a specific enhancer instead of building the Gemini client lazily.
    pub fn with_enhancer(mut self, enhancer: Arc<dyn Enhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// TRACE acts as "show everything"; any other level shows only that level.
    pub fn log_visible(&self, entry: &LogEntry) -> bool {
        self.min_log_level == Level::TRACE || entry.level == self.min_log_level
    }

    pub fn save_logs_to_file(&self) -> Result<(), Box<dyn std::error::Error>> {
        let logs = self
            .log_messages
            .lock()
            .map_err(|e| format!("Failed to lock logs: {}", e))?;

        let filtered_logs: Vec<&LogEntry> = logs.iter().filter(|e| self.log_visible(e)).collect();
        if filtered_logs.is_empty() {
            return Err("No logs match the current filter level".into());
        }

        let Some(save_path) = rfd::FileDialog::new()
            .add_filter("Log files", &["log", "txt"])
            .set_file_name("pixelenhance.log")
            .save_file()
        else {
            return Err("No save location selected".into());
        };

        let mut log_content = String::new();
        log_content.push_str("=== PIXELENHANCE Log File ===\n");
        log_content.push_str(&format!("Generated: {}\n", chrono::Local::now().to_rfc3339()));
        log_content.push_str(&format!("Total Logs: {}\n", filtered_logs.len()));
        log_content.push_str("=============================\n\n");
        for entry in &filtered_logs {
            log_content.push_str(&entry.to_line());
            log_content.push('\n');
        }

        fs::write(&save_path, log_content)?;
        tracing::info!(
            "Logs saved to: {:?} ({} entries)",
            save_path,
            filtered_logs.len()
        );
        Ok(())
    }

    /// Preset text: a comment header followed by the JSON config (no API key).
    pub fn preset_content(&self) -> Result<String, serde_json::Error> {
        let mut content = String::new();
        content.push_str("// ==========================================\n");
        content.push_str("// PIXELENHANCE Service Preset\n");
        content.push_str(&format!("// Version: {}\n", env!("CARGO_PKG_VERSION")));
        content.push_str(&format!("// Generated: {}\n", chrono::Local::now().to_rfc3339()));
        content.push_str("// Note: the API key is read from API_KEY and never stored here\n");
        content.push_str("// ==========================================\n\n");
        content.push_str(&serde_json::to_string_pretty(&self.config)?);
        Ok(content)
    }

    pub fn save_preset(&self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(save_path) = rfd::FileDialog::new()
            .add_filter("PIXELENHANCE presets", &["json"])
            .set_file_name("pixelenhance_preset.json")
            .save_file()
        else {
            return Err("No save location selected".into());
        };
        fs::write(&save_path, self.preset_content()?)?;
        tracing::info!("Preset saved to: {:?}", save_path);
        Ok(())
    }

    pub fn load_preset(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(load_path) = rfd::FileDialog::new()
            .add_filter("PIXELENHANCE presets", &["json"])
            .pick_file()
        else {
            return Err("No preset file selected".into());
        };
        self.config = self.config.clone().merge_file(&load_path)?;
        // Rebuild the client with the new settings on the next enhancement.
        self.enhancer = None;
        tracing::info!(
            "Preset loaded from: {:?} (model={}, endpoint={})",
            load_path,
            self.config.model,
            self.config.endpoint
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_round_trips_through_config_loader() {
        let mut gui = PixelEnhanceGui::with_config(EnhanceConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        });
        gui.config.model = "preset-model".to_string();
        gui.config.timeout_secs = Some(45);

        let content = gui.preset_content().unwrap();
        assert!(content.starts_with("// ===="));
        assert!(!content.contains("secret"));

        let loaded = EnhanceConfig::default().merge_json(&content).unwrap();
        assert_eq!(loaded.model, "preset-model");
        assert_eq!(loaded.timeout_secs, Some(45));
    }

    #[test]
    fn trace_level_shows_everything_other_levels_are_exact() {
        let mut gui = PixelEnhanceGui::with_config(EnhanceConfig::default());
        let warn = LogEntry::new(Level::WARN, "w".into(), "t".into());
        let info = LogEntry::new(Level::INFO, "i".into(), "t".into());
        assert!(gui.log_visible(&warn) && gui.log_visible(&info));

        gui.min_log_level = Level::WARN;
        assert!(gui.log_visible(&warn));
        assert!(!gui.log_visible(&info));
    }
}
