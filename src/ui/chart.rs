//! Historical price chart: a pure configuration derived from the series, and
//! the `egui_plot` rendering of that configuration.

use eframe::egui::{self, Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::config;
use crate::data::models::HistoricalSeries;
use crate::ui::chart_utils::{self, HoverSeries};

/// Visual style of a single line series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub line_color: Color32,
    pub line_width: f32,
    /// Shade the area under the line
    pub fill: bool,
    /// Curve smoothing; 0 draws straight segments
    pub tension: f64,
    /// Marker radius; 0 draws no point markers
    pub point_radius: f32,
}

impl SeriesStyle {
    pub const HISTORICAL: SeriesStyle = SeriesStyle {
        line_color: config::CHART_LINE_COLOR,
        line_width: 2.0,
        fill: true,
        tension: config::CHART_LINE_TENSION,
        point_radius: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<[f64; 2]>,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: &'static str,
    pub show_legend: bool,
    pub x_labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartConfig {
    /// One close-price series over the historical dates. The title does not
    /// depend on the ticker or forecast horizon.
    pub fn for_history(ticker: &str, historical: &HistoricalSeries) -> Self {
        Self {
            title: config::CHART_TITLE,
            show_legend: false,
            x_labels: historical.dates().to_vec(),
            series: vec![ChartSeries {
                label: format!("{} Close Price", ticker),
                points: historical.points(),
                style: SeriesStyle::HISTORICAL,
            }],
        }
    }
}

/// Sample a smooth curve through `points` using cubic Bezier segments whose
/// control points follow the neighbouring points, scaled by `tension`.
/// Every input point appears in the output at index `i * samples_per_segment`.
pub fn smooth_line(points: &[[f64; 2]], tension: f64, samples_per_segment: usize) -> Vec<[f64; 2]> {
    if points.len() < 3 || tension <= 0.0 || samples_per_segment < 2 {
        return points.to_vec();
    }

    let n = points.len();
    let k = tension / 2.0;
    let mut out = Vec::with_capacity((n - 1) * samples_per_segment + 1);

    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        let c1 = [p1[0] + (p2[0] - p0[0]) * k, p1[1] + (p2[1] - p0[1]) * k];
        let c2 = [p2[0] - (p3[0] - p1[0]) * k, p2[1] - (p3[1] - p1[1]) * k];

        for s in 0..samples_per_segment {
            let t = s as f64 / samples_per_segment as f64;
            out.push(cubic_bezier(p1, c1, c2, p2, t));
        }
    }
    out.push(points[n - 1]);
    out
}

/// Fill reference for a drawn curve: its lowest point, so the shaded area
/// never crosses the line.
pub fn fill_floor(curve: &[[f64; 2]]) -> Option<f32> {
    let floor = curve.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
    floor.is_finite().then_some(floor as f32)
}

fn cubic_bezier(p0: [f64; 2], c1: [f64; 2], c2: [f64; 2], p1: [f64; 2], t: f64) -> [f64; 2] {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    [
        a * p0[0] + b * c1[0] + c * c2[0] + d * p1[0],
        a * p0[1] + b * c1[1] + c * c2[1] + d * p1[1],
    ]
}

pub fn render(ui: &mut egui::Ui, chart: &ChartConfig) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(16.0))
        .rounding(egui::Rounding::same(12.0))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(chart.title)
                        .size(config::CHART_TITLE_SIZE)
                        .strong()
                        .color(config::CHART_TITLE_COLOR),
                );
            });
            ui.add_space(8.0);

            ui.visuals_mut().override_text_color = Some(config::CHART_TICK_COLOR);

            let x_labels = &chart.x_labels;
            let hover: Vec<HoverSeries> = chart
                .series
                .iter()
                .map(|s| HoverSeries {
                    name: &s.label,
                    data: &s.points,
                    decimals: 2,
                    prefix: "$",
                })
                .collect();

            let mut plot = Plot::new("historical_price_plot")
                .height(config::CHART_HEIGHT)
                .allow_drag(false)
                .allow_scroll(false)
                .allow_zoom(false)
                .x_axis_formatter(move |mark, _range| chart_utils::axis_date_label(x_labels, mark.value))
                .y_axis_formatter(|mark, _range| format!("${:.0}", mark.value))
                .coordinates_formatter(
                    chart_utils::HOVER_CORNER,
                    chart_utils::hover_formatter_labeled_x(&hover, x_labels),
                )
                .label_formatter(chart_utils::no_hover_label);
            if chart.show_legend {
                plot = plot.legend(Legend::default());
            }

            plot.show(ui, |plot_ui| {
                for series in &chart.series {
                    let style = series.style;
                    let curve = smooth_line(&series.points, style.tension, config::CHART_SAMPLES_PER_SEGMENT);
                    let floor = fill_floor(&curve);
                    let mut line = Line::new(PlotPoints::new(curve))
                        .name(&series.label)
                        .color(style.line_color)
                        .width(style.line_width);
                    if let (true, Some(floor)) = (style.fill, floor) {
                        line = line.fill(floor);
                    }
                    plot_ui.line(line);

                    if style.point_radius > 0.0 {
                        plot_ui.points(
                            egui_plot::Points::new(PlotPoints::new(series.points.clone()))
                                .radius(style.point_radius)
                                .color(style.line_color),
                        );
                    }
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> HistoricalSeries {
        HistoricalSeries::new(
            vec!["2024-01-01".into(), "2024-01-02".into(), "2024-01-03".into(), "2024-01-04".into()],
            vec![180.1, 182.0, 179.5, 183.2],
        )
        .unwrap()
    }

    #[test]
    fn test_chart_config_single_labeled_series() {
        let chart = ChartConfig::for_history("AAPL", &history());
        assert_eq!(chart.title, "1-Year Historical Price");
        assert!(!chart.show_legend);
        assert_eq!(chart.series.len(), 1);

        let series = &chart.series[0];
        assert_eq!(series.label, "AAPL Close Price");
        assert_eq!(series.points.len(), 4);
        assert_eq!(series.points[3], [3.0, 183.2]);
        assert!(series.style.fill);
        assert_eq!(series.style.point_radius, 0.0);
        assert!((series.style.tension - 0.3).abs() < 1e-12);
        assert_eq!(chart.x_labels[0], "2024-01-01");
    }

    #[test]
    fn test_chart_title_static_across_tickers() {
        let a = ChartConfig::for_history("AAPL", &history());
        let b = ChartConfig::for_history("TSLA", &history());
        assert_eq!(a.title, b.title);
        assert_ne!(a.series[0].label, b.series[0].label);
    }

    #[test]
    fn test_smooth_line_passes_through_points() {
        let pts = history().points();
        let samples = 6;
        let curve = smooth_line(&pts, 0.3, samples);
        assert_eq!(curve.len(), (pts.len() - 1) * samples + 1);
        for (i, p) in pts.iter().enumerate() {
            let c = curve[i * samples];
            assert!((c[0] - p[0]).abs() < 1e-10);
            assert!((c[1] - p[1]).abs() < 1e-10);
        }
    }

    #[test]
    fn test_smooth_line_x_monotonic() {
        let curve = smooth_line(&history().points(), 0.3, 8);
        for w in curve.windows(2) {
            assert!(w[1][0] > w[0][0], "x should increase: {:?}", w);
        }
    }

    #[test]
    fn test_fill_floor_follows_smoothed_dip() {
        let pts = vec![[0.0, 10.0], [1.0, 1.0], [2.0, 0.0], [3.0, 10.0]];
        let curve = smooth_line(&pts, 0.3, 6);
        let lowest = curve.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
        assert!(lowest < 0.0, "curve should undershoot the lowest price, got {}", lowest);

        let floor = fill_floor(&curve).unwrap();
        assert_eq!(floor, lowest as f32);
        assert!(curve.iter().all(|p| p[1] as f32 >= floor));
        assert_eq!(fill_floor(&[]), None);
    }

    #[test]
    fn test_smooth_line_passthrough_cases() {
        let two = vec![[0.0, 1.0], [1.0, 2.0]];
        assert_eq!(smooth_line(&two, 0.3, 6), two);

        let pts = history().points();
        assert_eq!(smooth_line(&pts, 0.0, 6), pts);
        assert!(smooth_line(&[], 0.3, 6).is_empty());
    }
}
