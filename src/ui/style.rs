use eframe::egui::{self, Color32, Context, FontFamily, FontId, Stroke, Visuals};

pub fn set_custom_style(ctx: &Context) {
    // Slate background with cyan accents
    let mut visuals = Visuals::dark();

    visuals.panel_fill = Color32::from_rgb(17, 24, 39);
    visuals.window_fill = Color32::from_rgb(31, 41, 55);
    visuals.extreme_bg_color = Color32::from_rgb(55, 65, 81); // text inputs
    visuals.faint_bg_color = Color32::from_rgb(31, 41, 55);

    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(55, 65, 81);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(75, 85, 99));

    visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(75, 85, 99);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Color32::from_rgb(6, 182, 212));

    visuals.widgets.active.weak_bg_fill = Color32::from_rgb(14, 116, 144);
    visuals.widgets.active.bg_stroke = Stroke::new(2.0, Color32::from_rgb(6, 182, 212));

    visuals.selection.bg_fill = Color32::from_rgb(8, 145, 178);
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);

    style.text_styles.insert(
        egui::TextStyle::Body,
        FontId::new(15.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        FontId::new(34.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        FontId::new(15.0, FontFamily::Proportional),
    );

    ctx.set_style(style);
}
