//! Application theme, colors and text helpers.

use eframe::egui::{self, Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Shared accent colors.
pub mod accent {
    use eframe::egui::Color32;

    pub const BLUE: Color32 = Color32::from_rgb(0x4a, 0x9e, 0xff);
    pub const GREEN: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
    pub const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
}

/// Background, border and text colors of one theme.
#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_panel: Color32,
    pub bg_faint: Color32,
    pub bg_input: Color32,
    pub border: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub button_hover: Color32,
}

impl Palette {
    pub const DARK: Self = Self {
        bg_panel: Color32::from_rgb(0x1f, 0x1f, 0x1f),
        bg_faint: Color32::from_rgb(0x1a, 0x1a, 0x1a),
        bg_input: Color32::from_rgb(0x2a, 0x2a, 0x2a),
        border: Color32::from_rgb(0x44, 0x44, 0x44),
        text_primary: Color32::from_rgb(0xe0, 0xe0, 0xe0),
        text_muted: Color32::from_rgb(0x88, 0x88, 0x88),
        button_hover: Color32::from_rgb(0x3a, 0x3a, 0x3a),
    };

    pub const LIGHT: Self = Self {
        bg_panel: Color32::from_rgb(0xff, 0xff, 0xff),
        bg_faint: Color32::from_rgb(0xf5, 0xf5, 0xf5),
        bg_input: Color32::from_rgb(0xf0, 0xf0, 0xf0),
        border: Color32::from_rgb(0xc0, 0xc0, 0xc0),
        text_primary: Color32::from_rgb(0x1a, 0x1a, 0x1a),
        text_muted: Color32::from_rgb(0x66, 0x66, 0x66),
        button_hover: Color32::from_rgb(0xdd, 0xdd, 0xdd),
    };

    /// Palette matching the current visuals of `ui`.
    pub fn from_ui(ui: &egui::Ui) -> Self {
        if ui.visuals().dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    fn visuals(self, dark: bool) -> Visuals {
        let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };

        visuals.window_fill = self.bg_panel;
        visuals.panel_fill = self.bg_panel;
        visuals.faint_bg_color = self.bg_faint;
        visuals.extreme_bg_color = self.bg_input;

        let widgets = &mut visuals.widgets;
        for (state, fill, stroke, fg) in [
            (&mut widgets.noninteractive, self.bg_input, self.border, self.text_muted),
            (&mut widgets.inactive, self.bg_input, self.border, self.text_primary),
            (&mut widgets.hovered, self.button_hover, accent::BLUE, self.text_primary),
            (&mut widgets.active, accent::BLUE, accent::BLUE, Color32::WHITE),
            (&mut widgets.open, self.bg_input, self.border, self.text_primary),
        ] {
            state.bg_fill = fill;
            state.bg_stroke = Stroke::new(1.0, stroke);
            state.fg_stroke = Stroke::new(1.0, fg);
            state.rounding = Rounding::same(4.0);
        }

        visuals.selection.bg_fill = accent::BLUE.gamma_multiply(if dark { 0.3 } else { 0.2 });
        visuals.selection.stroke = Stroke::new(1.0, accent::BLUE);
        visuals
    }
}

/// Configure style based on current visuals (dark/light mode).
pub fn configure_style(ctx: &egui::Context) {
    let dark = ctx.style().visuals.dark_mode;
    let palette = if dark { Palette::DARK } else { Palette::LIGHT };
    ctx.set_visuals(palette.visuals(dark));

    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Small, FontId::new(10.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(17.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
    ]
    .into();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    ctx.set_style(style);
}

/// Style a button as the primary action button.
pub fn primary_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(Color32::WHITE))
        .fill(accent::GREEN)
        .rounding(Rounding::same(4.0))
}

/// Create a form label.
pub fn form_label(text: &str) -> egui::RichText {
    egui::RichText::new(text.to_uppercase()).size(10.0)
}

/// Create a stat label (left column).
pub fn stat_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0).weak()
}

/// Create a stat value (right column).
pub fn stat_value(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0)
}

/// Create a highlighted stat value (e.g., object count).
pub fn stat_value_highlight(text: &str) -> egui::RichText {
    egui::RichText::new(text)
        .size(11.0)
        .color(accent::GREEN)
        .strong()
}
