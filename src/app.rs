use std::sync::mpsc::Receiver;

use anyhow::Result;
use eframe::egui::{self, Color32, RichText};
use tokio::runtime::Handle;

use crate::config::{AppConfig, StaleResponsePolicy};
use crate::controller::PredictionController;
use crate::data::client::{HttpPredictionService, PredictionService};
use crate::ui;
use crate::worker::{Completion, ServiceDispatcher};

pub type Controller<S = HttpPredictionService> = PredictionController<ServiceDispatcher<S>>;

pub struct AppState<S: PredictionService = HttpPredictionService> {
    pub controller: Controller<S>,
    completions: Receiver<Completion>,
}

impl AppState {
    pub fn new(config: &AppConfig, runtime: Handle, ctx: egui::Context) -> Result<Self> {
        let service = HttpPredictionService::new(config)?;
        tracing::info!("Prediction service endpoint: {}", service.predict_url());
        Ok(Self::with_service(service, config.stale_policy, runtime, Some(ctx)))
    }
}

impl<S: PredictionService> AppState<S> {
    pub fn with_service(
        service: S,
        stale_policy: StaleResponsePolicy,
        runtime: Handle,
        repaint: Option<egui::Context>,
    ) -> Self {
        let (mut dispatcher, completions) = ServiceDispatcher::new(runtime, service);
        if let Some(ctx) = repaint {
            dispatcher = dispatcher.with_repaint(ctx);
        }
        Self {
            controller: PredictionController::new(dispatcher, stale_policy),
            completions,
        }
    }

    /// Apply every completion that arrived since the last frame, in arrival
    /// order. Returns how many were taken from the inbox.
    pub fn drain_completions(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(Completion { seq, outcome }) = self.completions.try_recv() {
            self.controller.complete(seq, outcome);
            drained += 1;
        }
        drained
    }
}

pub struct StockPredictorApp {
    state: AppState,
}

impl StockPredictorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig, runtime: Handle) -> Result<Self> {
        ui::style::set_custom_style(&cc.egui_ctx);
        let state = AppState::new(config, runtime, cc.egui_ctx.clone())?;
        Ok(Self { state })
    }
}

impl eframe::App for StockPredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.drain_completions();

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(6.0);
                ui.label(
                    RichText::new("Disclaimer: This is an educational project and not financial advice.")
                        .small()
                        .color(Color32::from_rgb(107, 114, 128)),
                );
                ui.add_space(6.0);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui::predictor_view::render(ui, &mut self.state);
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Panel;
    use crate::data::error::FetchError;
    use crate::data::models::{ForecastRequest, ForecastResponse, HistoricalSeries, Horizon};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};
    use tokio::sync::oneshot;

    /// Holds each request until the test opens its gate, keyed by horizon in days.
    struct GatedService {
        gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    }

    impl PredictionService for GatedService {
        async fn predict(&self, request: &ForecastRequest) -> Result<ForecastResponse, FetchError> {
            let gate = self.gates.lock().unwrap().remove(&request.prediction_days);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(ForecastResponse {
                predictions: (0..request.prediction_days).map(|d| 200.0 + d as f64).collect(),
                historical_data: HistoricalSeries::new(vec!["2024-01-01".into()], vec![198.5]).unwrap(),
            })
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    /// Two overlapping requests (next day, then 7 days) whose gates the test controls.
    fn overlapping(
        policy: StaleResponsePolicy,
        rt: &tokio::runtime::Runtime,
    ) -> (AppState<GatedService>, oneshot::Sender<()>, oneshot::Sender<()>) {
        let (next_day_tx, next_day_rx) = oneshot::channel();
        let (week_tx, week_rx) = oneshot::channel();
        let service = GatedService {
            gates: Mutex::new(HashMap::from([(1, next_day_rx), (7, week_rx)])),
        };
        let mut state = AppState::with_service(service, policy, rt.handle().clone(), None);

        state.controller.set_ticker("nvda");
        state.controller.submit();
        state.controller.set_horizon(Horizon::SevenDays);
        (state, next_day_tx, week_tx)
    }

    fn drain_until(state: &mut AppState<GatedService>, expected: usize) -> usize {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut drained = 0;
        while drained < expected && Instant::now() < deadline {
            drained += state.drain_completions();
            std::thread::sleep(Duration::from_millis(10));
        }
        drained
    }

    #[test]
    fn test_drain_with_nothing_pending() {
        let rt = runtime();
        let mut state = AppState::with_service(
            GatedService { gates: Mutex::new(HashMap::new()) },
            StaleResponsePolicy::LastDispatched,
            rt.handle().clone(),
            None,
        );
        assert_eq!(state.drain_completions(), 0);
        assert_eq!(state.controller.state().panel(), Panel::Idle);
    }

    #[test]
    fn test_drain_applies_in_arrival_order_when_last_arrived_wins() {
        let rt = runtime();
        let (mut state, next_day, week) = overlapping(StaleResponsePolicy::LastArrived, &rt);
        assert_eq!(state.controller.state().panel(), Panel::Loading);

        week.send(()).unwrap();
        assert_eq!(drain_until(&mut state, 1), 1);
        assert_eq!(state.controller.state().predictions.as_ref().map(|p| p.len()), Some(7));

        next_day.send(()).unwrap();
        assert_eq!(drain_until(&mut state, 1), 1);
        let view = state.controller.state();
        assert_eq!(view.panel(), Panel::Results);
        assert_eq!(view.predictions, Some(vec![200.0]));
        assert_eq!(view.result_horizon, Some(Horizon::NextDay));
        assert_eq!(view.result_ticker.as_deref(), Some("NVDA"));
    }

    #[test]
    fn test_drain_discards_late_older_response_when_last_dispatched_wins() {
        let rt = runtime();
        let (mut state, next_day, week) = overlapping(StaleResponsePolicy::LastDispatched, &rt);

        week.send(()).unwrap();
        assert_eq!(drain_until(&mut state, 1), 1);

        next_day.send(()).unwrap();
        assert_eq!(drain_until(&mut state, 1), 1);
        let view = state.controller.state();
        assert_eq!(view.panel(), Panel::Results);
        assert_eq!(view.predictions.as_ref().map(|p| p.len()), Some(7));
        assert_eq!(view.result_horizon, Some(Horizon::SevenDays));
    }

    #[test]
    fn test_drain_settles_loading_for_latest_response() {
        let rt = runtime();
        let (mut state, next_day, week) = overlapping(StaleResponsePolicy::LastDispatched, &rt);

        next_day.send(()).unwrap();
        assert_eq!(drain_until(&mut state, 1), 1);
        assert_eq!(state.controller.state().panel(), Panel::Loading);

        week.send(()).unwrap();
        assert_eq!(drain_until(&mut state, 1), 1);
        assert_eq!(state.controller.state().panel(), Panel::Results);
    }
}
