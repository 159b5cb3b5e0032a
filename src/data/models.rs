use serde::{Deserialize, Deserializer, Serialize};

/// Forecast horizons offered by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizon {
    #[default]
    NextDay,
    SevenDays,
}

impl Horizon {
    pub const ALL: [Horizon; 2] = [Horizon::NextDay, Horizon::SevenDays];

    pub fn days(self) -> u32 {
        match self {
            Horizon::NextDay => 1,
            Horizon::SevenDays => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Horizon::NextDay => "Next Day",
            Horizon::SevenDays => "7 Days",
        }
    }
}

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub ticker: String,
    pub prediction_days: u32,
}

impl ForecastRequest {
    pub fn new(ticker: &str, horizon: Horizon) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            prediction_days: horizon.days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("historical series has {dates} dates but {prices} prices")]
pub struct SeriesLengthMismatch {
    pub dates: usize,
    pub prices: usize,
}

#[derive(Deserialize)]
struct RawHistoricalSeries {
    dates: Vec<String>,
    prices: Vec<f64>,
}

/// Past closing prices with one date label per price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawHistoricalSeries")]
pub struct HistoricalSeries {
    dates: Vec<String>,
    prices: Vec<f64>,
}

impl HistoricalSeries {
    pub fn new(dates: Vec<String>, prices: Vec<f64>) -> Result<Self, SeriesLengthMismatch> {
        if dates.len() != prices.len() {
            return Err(SeriesLengthMismatch {
                dates: dates.len(),
                prices: prices.len(),
            });
        }
        Ok(Self { dates, prices })
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `[index, price]` pairs for plotting against a category axis
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.prices
            .iter()
            .enumerate()
            .map(|(i, p)| [i as f64, *p])
            .collect()
    }
}

impl TryFrom<RawHistoricalSeries> for HistoricalSeries {
    type Error = SeriesLengthMismatch;

    fn try_from(raw: RawHistoricalSeries) -> Result<Self, Self::Error> {
        HistoricalSeries::new(raw.dates, raw.prices)
    }
}

/// Forecast values, one per requested day
pub type PredictionSeries = Vec<f64>;

/// Success body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastResponse {
    #[serde(deserialize_with = "deserialize_prices")]
    pub predictions: PredictionSeries,
    #[serde(rename = "historicalData")]
    pub historical_data: HistoricalSeries,
}

/// Failure body of `POST /predict`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

// The service rounds forecasts server-side and may send them as strings ("187.42").
fn deserialize_prices<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<NumberOrString>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|v| match v {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| serde::de::Error::custom(format!("invalid price '{}': {}", s, e))),
        })
        .collect()
}
