//! Reusable UI components
//!
//! Standalone widgets for the profile screens.

use crate::catalog::Category;
use crate::theme;
use eframe::egui;

/// Grey "| Heading" line above each card
pub fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(format!("| {}", text))
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_HEADING),
        )
        .selectable(false),
    );
}

/// Pill showing one category, filled orange when active
pub fn category_chip(ui: &mut egui::Ui, category: &Category, active: bool) -> egui::Response {
    let font = egui::FontId::proportional(theme::FONT_CHIP);
    let (fill, text_color) = theme::chip_colors(active);
    let galley = ui.fonts(|f| f.layout_no_wrap(category.label.to_string(), font.clone(), text_color));
    let width = (galley.rect.width() + 16.0).max(theme::CHIP_MIN_WIDTH);

    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, theme::CHIP_HEIGHT), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, theme::RADIUS_CHIP, fill);
        painter.rect_stroke(
            rect,
            theme::RADIUS_CHIP,
            egui::Stroke::new(theme::STROKE_HAIRLINE, theme::BORDER_DEFAULT),
            egui::StrokeKind::Inside,
        );
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            category.label,
            font,
            text_color,
        );
    }

    response.on_hover_text(if active { "Avoiding" } else { "Not selected" })
}

/// Round avatar placeholder with a user glyph
pub fn avatar(ui: &mut egui::Ui, size: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.circle_filled(rect.center(), size / 2.0, theme::ACCENT);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            egui_phosphor::regular::USER,
            egui::FontId::proportional(size * 0.6),
            theme::TEXT_ON_ACCENT,
        );
    }
}

/// Nickname on a grey plate, fixed width
pub fn nickname_plate(ui: &mut egui::Ui, nickname: &str) {
    egui::Frame::new()
        .fill(theme::BG_NICKNAME)
        .inner_margin(egui::Margin::same(5))
        .show(ui, |ui| {
            ui.set_width(theme::NICKNAME_WIDTH);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(nickname)
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_PRIMARY),
                );
            });
        });
}
