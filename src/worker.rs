use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;

use crate::controller::Dispatcher;
use crate::data::client::PredictionService;
use crate::data::error::FetchError;
use crate::data::models::{ForecastRequest, ForecastResponse};

/// Outcome of one dispatched request
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub outcome: Result<ForecastResponse, FetchError>,
}

/// Runs each request as a task on the tokio runtime and posts the outcome
/// back to the UI thread.
pub struct ServiceDispatcher<S> {
    runtime: Handle,
    service: Arc<S>,
    completions: Sender<Completion>,
    repaint: Option<egui::Context>,
}

impl<S: PredictionService> ServiceDispatcher<S> {
    pub fn new(runtime: Handle, service: S) -> (Self, Receiver<Completion>) {
        let (tx, rx) = mpsc::channel();
        let dispatcher = Self {
            runtime,
            service: Arc::new(service),
            completions: tx,
            repaint: None,
        };
        (dispatcher, rx)
    }

    /// Wake the UI when a completion is posted.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }
}

impl<S: PredictionService> Dispatcher for ServiceDispatcher<S> {
    fn dispatch(&self, seq: u64, request: ForecastRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.completions.clone();
        let repaint = self.repaint.clone();

        self.runtime.spawn(async move {
            let outcome = service.predict(&request).await;
            if tx.send(Completion { seq, outcome }).is_err() {
                tracing::debug!("UI closed before request #{} completed", seq);
                return;
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}
