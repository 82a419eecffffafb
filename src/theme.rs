//! Centralized theme constants for Rabbit Profile
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::WHITE;
pub const BG_NICKNAME: Color32 = Color32::from_rgb(0xd9, 0xd9, 0xd9); // nickname plate
pub const BG_MODAL: Color32 = Color32::from_rgb(0xfa, 0xfa, 0xfa);

// =============================================================================
// COLORS - Accent (Orange)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0xf4, 0x51, 0x1e); // active chip
pub const ACCENT_BUTTON: Color32 = Color32::from_rgba_premultiplied(0xf2, 0x7a, 0x36, 0xf2); // rgba(255,129,57,0.95)

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::BLACK;
pub const TEXT_ON_ACCENT: Color32 = Color32::WHITE;
pub const TEXT_HEADING: Color32 = Color32::GRAY;
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(0xb9, 0x1c, 0x1c);

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_DEFAULT: Color32 = Color32::GRAY;
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0xd4, 0xd4, 0xd8);

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_HEADING: f32 = 17.0;
pub const FONT_BODY: f32 = 15.0;
pub const FONT_CHIP: f32 = 13.0;
pub const FONT_CAPTION: f32 = 11.0;

// =============================================================================
// SIZES
// =============================================================================
pub const CONTENT_WIDTH: f32 = 420.0;
pub const AVATAR_SIZE: f32 = 60.0;
pub const NICKNAME_WIDTH: f32 = 130.0;
pub const CHIP_MIN_WIDTH: f32 = 90.0;
pub const CHIP_HEIGHT: f32 = 26.0;
pub const EDIT_BUTTON_WIDTH: f32 = 150.0;

// =============================================================================
// SIZES - Radii, strokes, spacing
// =============================================================================
pub const RADIUS_SMALL: f32 = 5.0;
pub const RADIUS_CARD: f32 = 10.0;
pub const RADIUS_CHIP: f32 = 15.0;

pub const STROKE_HAIRLINE: f32 = 0.5;
pub const STROKE_DEFAULT: f32 = 1.0;

pub const SPACING_SM: f32 = 6.0;
pub const SPACING_MD: f32 = 10.0;
pub const SPACING_LG: f32 = 20.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: false,
        panel_fill: BG_BASE,
        window_fill: BG_MODAL,
        extreme_bg_color: BG_BASE,
        hyperlink_color: ACCENT,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
        window_corner_radius: egui::CornerRadius::same(RADIUS_CARD as u8),
        ..egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

// =============================================================================
// HELPER - Card frame
// =============================================================================
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_BASE)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
        .corner_radius(RADIUS_CARD)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
        .shadow(egui::epaint::Shadow {
            offset: [2, 7],
            blur: 8,
            spread: 0,
            color: Color32::from_black_alpha(60),
        })
}

// =============================================================================
// HELPER - Modal frame
// =============================================================================
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_MODAL)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_CARD)
        .inner_margin(SPACING_LG)
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Orange action button (Edit, OK)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(text.into())
            .size(FONT_BODY)
            .strong()
            .color(TEXT_ON_ACCENT),
    )
    .fill(ACCENT_BUTTON)
    .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
    .corner_radius(RADIUS_SMALL)
}

/// Plain outlined button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_PRIMARY))
        .fill(BG_BASE)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_SMALL)
}

/// (fill, text) colors for a category chip
pub fn chip_colors(active: bool) -> (Color32, Color32) {
    if active {
        (ACCENT, TEXT_ON_ACCENT)
    } else {
        (BG_BASE, TEXT_PRIMARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_chip_is_orange_with_white_text() {
        assert_eq!(chip_colors(true), (ACCENT, Color32::WHITE));
        assert_eq!(chip_colors(false), (Color32::WHITE, Color32::BLACK));
    }
}
