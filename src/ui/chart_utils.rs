//! Hover and axis helpers for plots with category (date label) X positions.

use egui_plot::{CoordinatesFormatter, Corner, PlotBounds, PlotPoint};

/// A named data series for hover display. Borrows the underlying data so no
/// heap allocation is needed beyond what the view already holds.
pub struct HoverSeries<'a> {
    pub name: &'a str,
    pub data: &'a [[f64; 2]],
    pub decimals: usize,
    pub prefix: &'a str,
}

/// Build a `CoordinatesFormatter` for charts whose X positions are indices
/// into `x_labels`. Shows the label nearest the cursor followed by the
/// nearest Y value of each series.
pub fn hover_formatter_labeled_x<'a>(
    series: &'a [HoverSeries<'a>],
    x_labels: &'a [String],
) -> CoordinatesFormatter<'a> {
    CoordinatesFormatter::new(move |cursor: &PlotPoint, _bounds: &PlotBounds| {
        let x = cursor.x;
        let x_idx = x.round().max(0.0) as usize;
        let x_display = x_labels
            .get(x_idx)
            .map(|s| s.as_str())
            .unwrap_or("?");
        let mut text = x_display.to_string();
        for s in series {
            if let Some(idx) = nearest_x_index(s.data, x) {
                use std::fmt::Write;
                let _ = write!(
                    text,
                    "\n{}: {}{:.prec$}",
                    s.name,
                    s.prefix,
                    s.data[idx][1],
                    prec = s.decimals
                );
            }
        }
        text
    })
}

/// Pass to `Plot::label_formatter` to suppress the default per-line hover
/// tooltip (data is shown in the corner instead).
pub fn no_hover_label(_name: &str, _point: &PlotPoint) -> String {
    String::new()
}

/// The fixed corner where hover labels are displayed.
pub const HOVER_CORNER: Corner = Corner::RightBottom;

/// Axis tick text for category position `x`. Only whole positions get a
/// label; ISO dates are shortened to "Mon DD".
pub fn axis_date_label(x_labels: &[String], x: f64) -> String {
    if x < 0.0 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    let Some(label) = x_labels.get(x.round() as usize) else {
        return String::new();
    };
    match chrono::NaiveDate::parse_from_str(label, "%Y-%m-%d") {
        Ok(date) => date.format("%b %d").to_string(),
        Err(_) => label.clone(),
    }
}

/// Binary-search for the index of the data point whose X is closest to
/// `target_x`.  Assumes `data` is sorted ascending by `[0]` (X).
fn nearest_x_index(data: &[[f64; 2]], target_x: f64) -> Option<usize> {
    if data.is_empty() {
        return None;
    }
    let idx = data.partition_point(|p| p[0] < target_x);
    if idx == 0 {
        return Some(0);
    }
    if idx >= data.len() {
        return Some(data.len() - 1);
    }
    let left_dist = (data[idx - 1][0] - target_x).abs();
    let right_dist = (data[idx][0] - target_x).abs();
    if left_dist <= right_dist {
        Some(idx - 1)
    } else {
        Some(idx)
    }
}
