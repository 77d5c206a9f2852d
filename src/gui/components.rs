use super::models::PixelEnhanceGui;
use super::textures::{ImageTexture, TextureSlot, fit_contain, preview_size};
use crate::core::comparator::{ComparatorSlider, Span};
use crate::gui::logging::LogEntry;
use crate::types::Resolution;
use eframe::egui::{
    self, Align, Align2, Color32, CursorIcon, FontId, Frame, Layout, Pos2, Rect, RichText, Sense,
    Stroke, Ui, pos2, vec2,
};
use tracing::Level;

const ACCENT: Color32 = Color32::from_rgb(34, 211, 238);
const ACCENT_DIM: Color32 = Color32::from_rgb(8, 145, 178);
const SUBTLE: Color32 = Color32::from_gray(150);
const PANEL_FILL: Color32 = Color32::from_rgb(31, 41, 55);

const PREVIEW_MAX_HEIGHT: f32 = 256.0;
const UPLOADER_HEIGHT: f32 = 220.0;
const HANDLE_RADIUS: f32 = 18.0;

const FULL_UV: Rect = Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0));

pub struct HeaderComponent;

impl HeaderComponent {
    pub fn render(ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new("Photo Pixel Enhance")
                    .size(40.0)
                    .color(ACCENT)
                    .strong(),
            );
            ui.label(
                RichText::new(
                    "Transform your low-quality photos into high-resolution masterpieces.",
                )
                .size(15.0)
                .color(SUBTLE),
            );
            ui.label(
                RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                    .size(10.0)
                    .color(Color32::from_gray(110)),
            );
            ui.add_space(8.0);
        });
    }
}

pub struct ErrorBannerComponent;

impl ErrorBannerComponent {
    pub fn render(ui: &mut Ui, message: &str) {
        Frame::NONE
            .fill(Color32::from_rgba_unmultiplied(239, 68, 68, 230))
            .corner_radius(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Error").color(Color32::WHITE).strong());
                    ui.label(RichText::new(message).color(Color32::WHITE));
                });
            });
        ui.add_space(10.0);
    }
}

pub struct UploaderComponent;

impl UploaderComponent {
    pub fn render(ui: &mut Ui, app: &mut PixelEnhanceGui) {
        let dragging_over = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let size = vec2(ui.available_width().min(560.0), UPLOADER_HEIGHT);

        ui.vertical_centered(|ui| {
            let (rect, response) = ui.allocate_exact_size(size, Sense::click());
            let highlighted = dragging_over || response.hovered();
            let (fill, stroke) = if highlighted {
                (Color32::from_rgb(38, 52, 70), Stroke::new(2.0, ACCENT))
            } else {
                (PANEL_FILL, Stroke::new(2.0, Color32::from_gray(85)))
            };

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 12.0, fill);
            painter.rect_stroke(rect, 12.0, stroke, egui::StrokeKind::Inside);

            let center = rect.center();
            painter.text(
                center - vec2(0.0, 36.0),
                Align2::CENTER_CENTER,
                "⬆",
                FontId::proportional(36.0),
                if highlighted { ACCENT } else { SUBTLE },
            );
            painter.text(
                center + vec2(0.0, 10.0),
                Align2::CENTER_CENTER,
                "Click to upload or drag and drop",
                FontId::proportional(18.0),
                Color32::from_gray(220),
            );
            painter.text(
                center + vec2(0.0, 38.0),
                Align2::CENTER_CENTER,
                "Supports PNG, JPG, WEBP, etc.",
                FontId::proportional(13.0),
                Color32::from_gray(120),
            );

            if response.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            }
            if response.clicked() {
                app.select_image_file();
            }
        });
    }
}

pub struct PreviewComponent;

impl PreviewComponent {
    pub fn render(ui: &mut Ui, slot: &TextureSlot) {
        ui.vertical_centered(|ui| {
            Frame::NONE
                .stroke(Stroke::new(2.0, Color32::from_gray(85)))
                .corner_radius(8.0)
                .inner_margin(8.0)
                .show(ui, |ui| match slot {
                    TextureSlot::Ready(texture) => {
                        let size =
                            preview_size(texture.size, ui.available_width(), PREVIEW_MAX_HEIGHT);
                        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                        ui.painter()
                            .image(texture.id(), rect, FULL_UV, Color32::WHITE);
                    }
                    TextureSlot::Failed(reason) => {
                        ui.label(
                            RichText::new(format!("Preview unavailable: {}", reason))
                                .color(SUBTLE),
                        );
                    }
                    TextureSlot::Empty => {
                        ui.spinner();
                    }
                });
        });
    }
}

pub struct ResolutionSelectorComponent;

impl ResolutionSelectorComponent {
    /// One button per tier; returns the tier clicked this frame.
    pub fn render(ui: &mut Ui, enabled: bool) -> Option<Resolution> {
        let mut selected = None;
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = vec2(8.0, 8.0);
                    for resolution in Resolution::ALL {
                        let button = egui::Button::new(
                            RichText::new(resolution.label())
                                .size(15.0)
                                .color(Color32::WHITE)
                                .strong(),
                        )
                        .fill(ACCENT_DIM)
                        .min_size(vec2(72.0, 34.0));
                        if ui.add(button).clicked() {
                            selected = Some(resolution);
                        }
                    }
                });
            });
        });
        selected
    }
}

pub struct SpinnerComponent;

impl SpinnerComponent {
    pub fn render(ui: &mut Ui, app: &PixelEnhanceGui) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.add(egui::Spinner::new().size(56.0).color(ACCENT));
            ui.add_space(16.0);
            ui.label(
                RichText::new("Enhancing your image...")
                    .size(18.0)
                    .color(Color32::from_gray(220))
                    .strong(),
            );
            if let Some(start) = app.processing_start_time {
                ui.label(
                    RichText::new(format!("{:.0?} elapsed", start.elapsed()))
                        .size(12.0)
                        .color(SUBTLE),
                );
            }
            ui.add_space(60.0);
        });
    }
}

pub struct ComparatorComponent;

impl ComparatorComponent {
    /// Before/after view: the enhanced image fills the container, the
    /// original is drawn over it clipped to the left of the divider.
    pub fn render(
        ui: &mut Ui,
        slider: &mut ComparatorSlider,
        original: &ImageTexture,
        enhanced: &ImageTexture,
    ) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Drag the slider to compare").color(SUBTLE));
            ui.add_space(4.0);

            let width = ui.available_width().min(960.0);
            let size = vec2(width, width * 9.0 / 16.0);
            let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
            let span = Span::new(rect.left(), rect.width());

            if response.is_pointer_button_down_on() {
                slider.arm();
            }
            // Once armed, follow the pointer anywhere in the window.
            let (pointer, primary_down) =
                ui.ctx().input(|i| (i.pointer.latest_pos(), i.pointer.primary_down()));
            if slider.is_dragging() {
                if let Some(pos) = pointer {
                    slider.track(pos.x, span);
                }
                if !primary_down {
                    slider.disarm();
                }
            }
            if response.hovered() || slider.is_dragging() {
                ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
            }

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 8.0, Color32::BLACK);
            painter.image(
                enhanced.id(),
                fit_contain(rect, enhanced.size),
                FULL_UV,
                Color32::WHITE,
            );

            let divider_x = span.x_at(slider.position());
            let left = Rect::from_min_max(rect.min, pos2(divider_x, rect.max.y));
            painter.with_clip_rect(left).image(
                original.id(),
                fit_contain(rect, original.size),
                FULL_UV,
                Color32::WHITE,
            );

            painter.line_segment(
                [pos2(divider_x, rect.top()), pos2(divider_x, rect.bottom())],
                Stroke::new(3.0, Color32::WHITE),
            );
            Self::paint_handle(&painter, pos2(divider_x, rect.center().y));

            Self::paint_caption(&painter, rect.left_top() + vec2(8.0, 8.0), Align::Min, "Original");
            Self::paint_caption(&painter, rect.right_top() + vec2(-8.0, 8.0), Align::Max, "Enhanced");
        });
    }

    fn paint_handle(painter: &egui::Painter, center: Pos2) {
        painter.circle(center, HANDLE_RADIUS, Color32::WHITE, Stroke::new(1.0, Color32::from_gray(60)));
        let arrow = Stroke::new(2.0, Color32::from_gray(40));
        for dir in [-1.0_f32, 1.0] {
            let tip = center + vec2(dir * 9.0, 0.0);
            let back = center + vec2(dir * 3.0, 0.0);
            painter.line_segment([tip, back + vec2(0.0, -5.0)], arrow);
            painter.line_segment([tip, back + vec2(0.0, 5.0)], arrow);
        }
    }

    fn paint_caption(painter: &egui::Painter, anchor: Pos2, align: Align, text: &str) {
        let galley = painter.layout_no_wrap(
            text.to_string(),
            FontId::proportional(13.0),
            Color32::WHITE,
        );
        let padding = vec2(8.0, 4.0);
        let size = galley.size() + padding * 2.0;
        let min = match align {
            Align::Max => anchor - vec2(size.x, 0.0),
            _ => anchor,
        };
        let bg = Rect::from_min_size(min, size);
        painter.rect_filled(bg, 4.0, Color32::from_black_alpha(128));
        painter.galley(bg.min + padding, galley, Color32::WHITE);
    }
}

fn format_log_entry(entry: &LogEntry) -> RichText {
    let (color, icon) = match entry.level {
        Level::ERROR => (Color32::from_rgb(255, 100, 100), "❌"),
        Level::WARN => (Color32::from_rgb(255, 200, 100), "⚠️"),
        Level::INFO => (Color32::from_rgb(100, 200, 255), "ℹ️"),
        Level::DEBUG => (Color32::from_rgb(150, 150, 150), "🔍"),
        Level::TRACE => (Color32::from_rgb(100, 100, 100), "🔎"),
    };
    RichText::new(format!(
        "[{}] {} {}: {}",
        entry.timestamp, icon, entry.level, entry.message
    ))
    .color(color)
    .monospace()
}

pub struct LogPanelComponent;

impl LogPanelComponent {
    pub fn render(ui: &mut Ui, app: &mut PixelEnhanceGui) {
        ui.horizontal(|ui| {
            ui.label("Log Output");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.selectable_value(&mut app.min_log_level, Level::ERROR, "ERROR");
                ui.selectable_value(&mut app.min_log_level, Level::WARN, "WARN");
                ui.selectable_value(&mut app.min_log_level, Level::INFO, "INFO");
                ui.selectable_value(&mut app.min_log_level, Level::DEBUG, "DEBUG");
                ui.selectable_value(&mut app.min_log_level, Level::TRACE, "ALL");

                if let Ok(logs) = app.log_messages.lock() {
                    let visible = logs.iter().filter(|e| app.log_visible(e)).count();
                    if !logs.is_empty() {
                        ui.label(format!("({} visible / {} total)", visible, logs.len()));
                    }
                }
            });
        });

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                let Ok(logs) = app.log_messages.lock() else {
                    return;
                };
                if logs.is_empty() {
                    ui.label(RichText::new("No log messages").color(Color32::from_gray(120)));
                    return;
                }
                for entry in logs.iter().filter(|e| app.log_visible(e)) {
                    ui.label(format_log_entry(entry));
                }
            });
    }
}

pub struct FooterComponent;

impl FooterComponent {
    pub fn render(ui: &mut Ui, app: &mut PixelEnhanceGui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&app.status_message).size(12.0));
            if let Some(duration) = app.last_processing_duration {
                ui.separator();
                ui.label(
                    RichText::new(format!("Last enhancement: {:.2?}", duration))
                        .size(12.0)
                        .color(SUBTLE),
                );
            }
            ui.separator();
            ui.label(RichText::new("Powered by Gemini API").size(12.0).color(SUBTLE));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let has_session = app.workflow.original().is_some() || app.workflow.error().is_some();
                if ui
                    .add_enabled(has_session, egui::Button::new("Start Over"))
                    .clicked()
                {
                    app.reset();
                }

                ui.toggle_value(&mut app.show_logs, "Logs");

                if ui.button("Load Preset").clicked() {
                    if let Err(e) = app.load_preset() {
                        tracing::error!("Failed to load preset: {}", e);
                    }
                }

                if ui.button("Save Preset").clicked() {
                    if let Err(e) = app.save_preset() {
                        tracing::error!("Failed to save preset: {}", e);
                    }
                }

                if ui.button("Save Logs").clicked() {
                    if let Err(e) = app.save_logs_to_file() {
                        tracing::error!("Failed to save logs: {}", e);
                    }
                }

                if ui.button("Clear").clicked() {
                    if let Ok(mut logs) = app.log_messages.lock() {
                        logs.clear();
                    }
                }
            });
        });
    }
}

/// Headings used by the central panel for each phase.
pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(text).size(24.0).color(ACCENT).strong());
    });
    ui.add_space(10.0);
}

pub fn section_subtitle(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(title).size(19.0).color(Color32::from_gray(210)).strong());
        ui.label(RichText::new(subtitle).size(13.0).color(SUBTLE));
    });
    ui.add_space(8.0);
}

pub fn download_button(ui: &mut Ui) -> bool {
    let mut clicked = false;
    ui.vertical_centered(|ui| {
        let button = egui::Button::new(
            RichText::new("⬇ Download Enhanced Image")
                .size(16.0)
                .color(Color32::WHITE)
                .strong(),
        )
        .fill(ACCENT_DIM)
        .min_size(vec2(240.0, 40.0));
        clicked = ui.add(button).clicked();
    });
    clicked
}
