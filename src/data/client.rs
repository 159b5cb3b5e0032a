use std::future::Future;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::data::error::FetchError;
use crate::data::models::{ErrorBody, ForecastRequest, ForecastResponse};

/// The remote service that turns a ticker and horizon into a forecast.
pub trait PredictionService: Send + Sync + 'static {
    fn predict(
        &self,
        request: &ForecastRequest,
    ) -> impl Future<Output = Result<ForecastResponse, FetchError>> + Send;
}

/// `PredictionService` over HTTP: `POST {base_url}/predict` with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    client: reqwest::Client,
    predict_url: String,
}

impl HttpPredictionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            predict_url: config.predict_url(),
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

impl PredictionService for HttpPredictionService {
    async fn predict(&self, request: &ForecastRequest) -> Result<ForecastResponse, FetchError> {
        tracing::info!(
            "Requesting {}-day forecast for {} from {}",
            request.prediction_days,
            request.ticker,
            self.predict_url
        );

        let resp = self
            .client
            .post(&self.predict_url)
            .json(request)
            .send()
            .await
            .map_err(|e| FetchError::Connectivity(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(ErrorBody { error: Some(message) }) if !message.trim().is_empty() => FetchError::Service {
                    status: status.as_u16(),
                    message,
                },
                _ => {
                    tracing::warn!(
                        "Prediction service returned {} without an error body: {}",
                        status,
                        text.chars().take(200).collect::<String>()
                    );
                    FetchError::UnexpectedStatus {
                        status: status.as_u16(),
                    }
                }
            });
        }

        let response: ForecastResponse = serde_json::from_str(&text)
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        if response.predictions.len() != request.prediction_days as usize {
            tracing::warn!(
                "Asked for {} predictions for {}, got {}",
                request.prediction_days,
                request.ticker,
                response.predictions.len()
            );
        }

        Ok(response)
    }
}
