//! Prediction view state and the transitions driven by user actions and
//! service completions.

use crate::config::StaleResponsePolicy;
use crate::data::error::FetchError;
use crate::data::models::{ForecastRequest, ForecastResponse, HistoricalSeries, Horizon, PredictionSeries};
use crate::ui::chart::ChartConfig;

/// Sends a request to the prediction service. The outcome comes back later
/// through `PredictionController::complete` tagged with the same `seq`.
pub trait Dispatcher {
    fn dispatch(&self, seq: u64, request: ForecastRequest);
}

/// Everything the prediction view shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub ticker: String,
    pub horizon: Horizon,
    pub loading: bool,
    pub error_message: String,
    pub historical: Option<HistoricalSeries>,
    pub predictions: Option<PredictionSeries>,
    /// Uppercased ticker the shown results were requested for
    pub result_ticker: Option<String>,
    /// Horizon the shown results were requested for
    pub result_horizon: Option<Horizon>,
}

/// Which area of the result region is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Idle,
    Loading,
    Error,
    Results,
}

impl ViewState {
    pub fn panel(&self) -> Panel {
        if self.loading {
            Panel::Loading
        } else if !self.error_message.is_empty() {
            Panel::Error
        } else if self.historical.is_some() && self.predictions.is_some() {
            Panel::Results
        } else {
            Panel::Idle
        }
    }

    fn clear_results(&mut self) {
        self.historical = None;
        self.predictions = None;
        self.result_ticker = None;
        self.result_horizon = None;
    }
}

struct InFlight {
    ticker: String,
    horizon: Horizon,
}

pub struct PredictionController<D: Dispatcher> {
    state: ViewState,
    dispatcher: D,
    stale_policy: StaleResponsePolicy,
    has_submitted: bool,
    next_seq: u64,
    latest_seq: Option<u64>,
    in_flight: Vec<(u64, InFlight)>,
}

impl<D: Dispatcher> PredictionController<D> {
    pub fn new(dispatcher: D, stale_policy: StaleResponsePolicy) -> Self {
        Self {
            state: ViewState::default(),
            dispatcher,
            stale_policy,
            has_submitted: false,
            next_seq: 0,
            latest_seq: None,
            in_flight: Vec::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Store the ticker text exactly as typed.
    pub fn set_ticker(&mut self, text: impl Into<String>) {
        self.state.ticker = text.into();
    }

    /// Select a horizon. Once a prediction has been requested, changing the
    /// horizon re-fetches for the current ticker.
    pub fn set_horizon(&mut self, horizon: Horizon) {
        if self.state.horizon == horizon {
            return;
        }
        self.state.horizon = horizon;

        if self.has_submitted && !self.state.ticker.trim().is_empty() {
            tracing::info!("Horizon changed to {} day(s), refreshing", horizon.days());
            self.begin_request();
        }
    }

    /// Request a forecast for the current ticker and horizon. Blank tickers
    /// are ignored.
    pub fn submit(&mut self) {
        if self.state.ticker.trim().is_empty() {
            return;
        }
        self.has_submitted = true;
        self.begin_request();
    }

    fn begin_request(&mut self) {
        self.state.clear_results();
        self.state.loading = true;
        self.state.error_message.clear();
        self.fetch();
    }

    fn fetch(&mut self) {
        let request = ForecastRequest::new(&self.state.ticker, self.state.horizon);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_seq = Some(seq);
        self.in_flight.push((
            seq,
            InFlight {
                ticker: request.ticker.clone(),
                horizon: self.state.horizon,
            },
        ));
        self.dispatcher.dispatch(seq, request);
    }

    /// Apply the outcome of request `seq`.
    pub fn complete(&mut self, seq: u64, outcome: Result<ForecastResponse, FetchError>) {
        let Some(pos) = self.in_flight.iter().position(|(s, _)| *s == seq) else {
            tracing::warn!("Ignoring completion for unknown request #{}", seq);
            return;
        };
        let (_, request) = self.in_flight.remove(pos);

        if self.stale_policy == StaleResponsePolicy::LastDispatched && self.latest_seq != Some(seq) {
            tracing::debug!(
                "Discarding stale response #{} for {} (latest is #{:?})",
                seq,
                request.ticker,
                self.latest_seq
            );
            return;
        }

        self.state.loading = false;
        match outcome {
            Ok(response) => {
                tracing::info!(
                    "Received {} prediction(s) and {} historical prices for {}",
                    response.predictions.len(),
                    response.historical_data.len(),
                    request.ticker
                );
                self.state.error_message.clear();
                self.state.historical = Some(response.historical_data);
                self.state.predictions = Some(response.predictions);
                self.state.result_ticker = Some(request.ticker);
                self.state.result_horizon = Some(request.horizon);
            }
            Err(e) => {
                tracing::warn!("Forecast for {} failed: {}", request.ticker, e);
                self.state.clear_results();
                self.state.error_message = e.user_message();
            }
        }
    }

    /// Chart for the current historical series, if any.
    pub fn chart_config(&self) -> Option<ChartConfig> {
        let historical = self.state.historical.as_ref().filter(|h| !h.is_empty())?;
        let ticker = self.state.result_ticker.as_deref().unwrap_or_default();
        Some(ChartConfig::for_history(ticker, historical))
    }
}
