use super::components::*;
use super::models::{PixelEnhanceGui, init_gui_logging};
use crate::core::state::UiState;
use eframe::egui;

/// Which screen the central panel shows, derived from the workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Upload,
    Choose,
    Enhancing,
    Compare,
}

impl Phase {
    pub fn of(state: &UiState) -> Self {
        match state {
            UiState::Empty => Phase::Upload,
            UiState::ImageLoaded { .. } | UiState::Errored { .. } => Phase::Choose,
            UiState::Enhancing { .. } => Phase::Enhancing,
            UiState::Enhanced { .. } => Phase::Compare,
        }
    }
}

fn apply_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.override_text_color = Some(egui::Color32::from_gray(220));
    style.visuals.widgets.noninteractive.bg_fill = egui::Color32::from_rgb(40, 40, 40);
    style.visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(50, 50, 50);
    style.visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(60, 60, 60);
    style.visuals.widgets.active.bg_fill = egui::Color32::from_rgb(70, 70, 70);
    style.visuals.panel_fill = egui::Color32::from_rgb(17, 24, 39);
    style.visuals.window_fill = egui::Color32::from_rgb(25, 25, 25);
    style.visuals.faint_bg_color = egui::Color32::from_rgb(45, 45, 45);
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(20, 20, 20);
    ctx.set_style(style);
}

impl PixelEnhanceGui {
    fn render_main(&mut self, ui: &mut egui::Ui) {
        let phase = Phase::of(self.workflow.state());

        if let Some(message) = self.workflow.error().map(str::to_owned) {
            ErrorBannerComponent::render(ui, &message);
        }

        match phase {
            Phase::Upload => UploaderComponent::render(ui, self),
            Phase::Choose => {
                section_heading(ui, "Choose Enhancement Level");
                PreviewComponent::render(ui, &self.textures.original);
                ui.add_space(16.0);
                if let Some(resolution) =
                    ResolutionSelectorComponent::render(ui, self.workflow.can_enhance())
                {
                    self.start_enhancement(ui.ctx(), resolution);
                }
            }
            Phase::Enhancing => SpinnerComponent::render(ui, self),
            Phase::Compare => {
                section_heading(ui, "Compare Your Enhanced Image");
                match (self.textures.original.ready(), self.textures.enhanced.ready()) {
                    (Some(original), Some(enhanced)) => {
                        ComparatorComponent::render(ui, &mut self.slider, original, enhanced);
                    }
                    _ => {
                        let reason = self
                            .textures
                            .enhanced
                            .failure()
                            .or(self.textures.original.failure())
                            .unwrap_or("Loading images...")
                            .to_string();
                        ui.vertical_centered(|ui| ui.label(reason));
                    }
                }

                ui.add_space(16.0);
                if download_button(ui) {
                    self.download_enhanced();
                }

                ui.add_space(24.0);
                ui.separator();
                section_subtitle(
                    ui,
                    "Enhance Again",
                    "Select a different resolution to re-enhance your original photo.",
                );
                if let Some(resolution) =
                    ResolutionSelectorComponent::render(ui, self.workflow.can_enhance())
                {
                    self.start_enhancement(ui.ctx(), resolution);
                }
            }
        }

        // The comparator is gone; do not keep following the pointer.
        if phase != Phase::Compare {
            self.slider.disarm();
        }
    }
}

impl eframe::App for PixelEnhanceGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        init_gui_logging();
        apply_style(ctx);

        let has_new_logs = self.collect_logs();
        self.poll_completion();
        self.handle_dropped_files(ctx);
        self.ensure_textures(ctx);

        if has_new_logs || self.workflow.is_enhancing() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            HeaderComponent::render(ui);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            FooterComponent::render(ui, self);
        });

        if self.show_logs {
            egui::TopBottomPanel::bottom("log_panel")
                .resizable(true)
                .default_height(180.0)
                .show(ctx, |ui| {
                    LogPanelComponent::render(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(12.0);
                    self.render_main(ui);
                    ui.add_space(12.0);
                });
        });
    }
}
