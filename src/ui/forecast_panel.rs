use eframe::egui::{self, Color32, RichText};

use crate::data::models::Horizon;

const ACCENT: Color32 = Color32::from_rgb(34, 211, 238);
const MUTED: Color32 = Color32::from_rgb(156, 163, 175);

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day_label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastDisplay {
    /// One large value
    Single(String),
    /// One card per forecast day, in order
    Cards(Vec<ForecastCard>),
}

pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn heading(ticker: &str, horizon: Horizon) -> String {
    match horizon {
        Horizon::NextDay => format!("Predicted Next Close for {}:", ticker),
        other => format!("Forecast for Next {} Days for {}:", other.days(), ticker),
    }
}

pub fn forecast_display(predictions: &[f64]) -> Option<ForecastDisplay> {
    match predictions {
        [] => None,
        [only] => Some(ForecastDisplay::Single(format_price(*only))),
        many => Some(ForecastDisplay::Cards(
            many.iter()
                .enumerate()
                .map(|(i, p)| ForecastCard {
                    day_label: format!("Day {}", i + 1),
                    value: format_price(*p),
                })
                .collect(),
        )),
    }
}

pub fn render(ui: &mut egui::Ui, ticker: &str, horizon: Horizon, predictions: &[f64]) {
    let Some(display) = forecast_display(predictions) else { return };

    ui.vertical_centered(|ui| {
        ui.label(RichText::new(heading(ticker, horizon)).size(22.0).color(MUTED));
        ui.add_space(12.0);

        match display {
            ForecastDisplay::Single(value) => {
                ui.label(RichText::new(value).size(56.0).strong().color(ACCENT));
            }
            ForecastDisplay::Cards(cards) => {
                ui.horizontal_wrapped(|ui| {
                    for card in &cards {
                        forecast_card(ui, card);
                    }
                });
            }
        }
    });
}

fn forecast_card(ui: &mut egui::Ui, card: &ForecastCard) {
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(31, 41, 55))
        .inner_margin(egui::Margin::same(10.0))
        .rounding(egui::Rounding::same(8.0))
        .show(ui, |ui| {
            ui.set_min_width(80.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(&card.day_label).small().color(MUTED));
                ui.label(RichText::new(&card.value).size(20.0).strong().color(ACCENT));
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_prediction_shows_one_value() {
        assert_eq!(
            forecast_display(&[187.42]),
            Some(ForecastDisplay::Single("$187.42".into()))
        );
    }

    #[test]
    fn test_seven_predictions_show_ordered_day_cards() {
        let preds = [101.0, 102.5, 103.25, 99.999, 100.0, 98.1, 97.0];
        let Some(ForecastDisplay::Cards(cards)) = forecast_display(&preds) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 7);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.day_label, format!("Day {}", i + 1));
        }
        assert_eq!(cards[0].value, "$101.00");
        assert_eq!(cards[2].value, "$103.25");
        assert_eq!(cards[3].value, "$100.00");
    }

    #[test]
    fn test_empty_predictions_show_nothing() {
        assert_eq!(forecast_display(&[]), None);
    }

    #[test]
    fn test_heading_per_horizon() {
        assert_eq!(heading("AAPL", Horizon::NextDay), "Predicted Next Close for AAPL:");
        assert_eq!(heading("AAPL", Horizon::SevenDays), "Forecast for Next 7 Days for AAPL:");
    }
}
