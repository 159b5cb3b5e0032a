pub mod chart;
pub mod chart_utils;
pub mod forecast_panel;
pub mod predictor_view;
pub mod style;
