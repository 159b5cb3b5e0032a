use eframe::egui::{self, Color32, RichText};

use crate::app::AppState;
use crate::controller::Panel;
use crate::data::models::Horizon;
use crate::ui::{chart, forecast_panel};

const CONTENT_WIDTH: f32 = 640.0;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(
            RichText::new("AI Stock Predictor")
                .heading()
                .strong()
                .color(Color32::from_rgb(34, 211, 238)),
        );
        ui.label(
            RichText::new("Forecast future stock prices using an LSTM Neural Network")
                .size(17.0)
                .color(Color32::from_rgb(156, 163, 175)),
        );
        ui.add_space(24.0);
    });

    render_form(ui, state);
    ui.add_space(16.0);
    render_results(ui, state);
}

fn render_form(ui: &mut egui::Ui, state: &mut AppState) {
    let controller = &mut state.controller;
    let loading = controller.state().loading;

    ui.vertical_centered(|ui| {
        ui.set_max_width(CONTENT_WIDTH);
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(20.0))
            .rounding(egui::Rounding::same(12.0))
            .show(ui, |ui| {
                let mut submitted = false;

                ui.horizontal(|ui| {
                    let mut ticker = controller.state().ticker.clone();
                    let input = ui.add(
                        egui::TextEdit::singleline(&mut ticker)
                            .hint_text("e.g., AAPL, TSLA, GOOG")
                            .desired_width(CONTENT_WIDTH - 180.0),
                    );
                    if input.changed() {
                        controller.set_ticker(ticker);
                    }
                    if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) && !loading {
                        submitted = true;
                    }

                    let label = if loading { "Analyzing..." } else { "Predict" };
                    let button = egui::Button::new(RichText::new(label).strong())
                        .fill(Color32::from_rgb(8, 145, 178));
                    if ui.add_enabled(!loading, button).clicked() {
                        submitted = true;
                    }
                });

                if submitted {
                    controller.submit();
                }

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Forecast:").color(Color32::from_rgb(156, 163, 175)));
                    for horizon in Horizon::ALL {
                        let selected = controller.state().horizon == horizon;
                        if ui.selectable_label(selected, horizon.label()).clicked() {
                            controller.set_horizon(horizon);
                        }
                    }
                });
            });
    });
}

fn render_results(ui: &mut egui::Ui, state: &mut AppState) {
    let view = state.controller.state();

    match view.panel() {
        Panel::Idle => {}
        Panel::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.add(egui::Spinner::new().size(48.0));
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Fetching Data...")
                        .size(17.0)
                        .color(Color32::from_rgb(156, 163, 175)),
                );
            });
        }
        Panel::Error => {
            ui.vertical_centered(|ui| {
                ui.set_max_width(CONTENT_WIDTH);
                egui::Frame::none()
                    .fill(Color32::from_rgba_unmultiplied(127, 29, 29, 128))
                    .inner_margin(egui::Margin::symmetric(16.0, 12.0))
                    .rounding(egui::Rounding::same(8.0))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&view.error_message)
                                .size(17.0)
                                .color(Color32::from_rgb(248, 113, 113)),
                        );
                    });
            });
        }
        Panel::Results => {
            if let Some(predictions) = &view.predictions {
                let ticker = view.result_ticker.as_deref().unwrap_or_default();
                let horizon = view.result_horizon.unwrap_or(view.horizon);
                ui.add_space(16.0);
                forecast_panel::render(ui, ticker, horizon, predictions);
            }
        }
    }

    if let Some(chart_config) = state.controller.chart_config() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.set_max_width(900.0);
            chart::render(ui, &chart_config);
        });
    }
}
