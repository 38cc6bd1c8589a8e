//! The main entry point: turns a location and a calendar day into historical
//! weather odds.

use crate::aggregation::GridAggregator;
use crate::config::EngineConfig;
use crate::error::WeatherOddsError;
use crate::prediction::assemble_prediction;
use crate::source::power::PowerClient;
use crate::source::ClimateSource;
use crate::types::grid::{Grid, LatLon};
use crate::types::parameter::Variable;
use crate::types::prediction::PredictionResult;
use crate::types::query::{PredictionRequest, Query};
use crate::types::window::HistoricalWindow;
use bon::bon;
use chrono::{Datelike, NaiveDate, Utc};
use log::info;

/// The prediction engine.
///
/// Every prediction fans out to the grid points around the query location,
/// pools the cleaned daily history of the same calendar day over the
/// configured number of years, and reports descriptive statistics and the odds
/// of rainy, hot, cold and windy days. The engine keeps no state between
/// predictions.
///
/// Create an instance with [`WeatherOdds::new()`] to query NASA POWER with the
/// default settings, [`WeatherOdds::with_config()`] to tune them, or
/// [`WeatherOdds::with_source()`] to plug in another [`ClimateSource`].
///
/// # Examples
///
/// ```rust,no_run
/// # use weather_odds::{WeatherOdds, WeatherOddsError, LatLon};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherOddsError> {
/// let engine = WeatherOdds::new()?;
/// let result = engine
///     .predict()
///     .location(LatLon(52.52, 13.40))
///     .date(NaiveDate::from_ymd_opt(2026, 7, 4).unwrap())
///     .call()
///     .await?;
/// println!("{}% chance of rain", result.rain_probability);
/// # Ok(())
/// # }
/// ```
pub struct WeatherOdds {
    source: Box<dyn ClimateSource>,
    config: EngineConfig,
}

#[bon]
impl WeatherOdds {
    /// Creates an engine backed by NASA POWER with the default [`EngineConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`WeatherOddsError::Source`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, WeatherOddsError> {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine backed by NASA POWER with custom settings.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherOddsError::InvalidConfig`] if `config` fails
    /// [`EngineConfig::validate`], or [`WeatherOddsError::Source`] if the HTTP
    /// client cannot be built.
    pub fn with_config(config: EngineConfig) -> Result<Self, WeatherOddsError> {
        config.validate()?;
        let client = PowerClient::new(config.source.clone())?;
        Ok(Self {
            source: Box::new(client),
            config,
        })
    }

    /// Creates an engine that reads history from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherOddsError::InvalidConfig`] if `config` fails validation.
    pub fn with_source(
        source: impl ClimateSource + 'static,
        config: EngineConfig,
    ) -> Result<Self, WeatherOddsError> {
        config.validate()?;
        Ok(Self {
            source: Box::new(source),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Predicts the odds for one location and calendar day.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** Center of the grid.
    /// * `.date(NaiveDate)`: **Required.** Only its month and day are used.
    /// * `.variables(Vec<Variable>)`: Optional. Variables the caller is
    ///   interested in. Defaults to all of them. Every variable is fetched and
    ///   reported regardless.
    /// * `.reference_year(i32)`: Optional. History covers the configured number
    ///   of years up to the year before this one. Defaults to the current UTC year.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherOddsError::InvalidCoordinate`] before any fetch when the
    /// location is off the globe, [`WeatherOddsError::InvalidWindow`] when the
    /// years cannot be represented, and [`WeatherOddsError::Aggregation`] when
    /// the grid fetches fail under the configured [`crate::FetchPolicy`].
    #[builder]
    pub async fn predict(
        &self,
        location: LatLon,
        date: NaiveDate,
        variables: Option<Vec<Variable>>,
        reference_year: Option<i32>,
    ) -> Result<PredictionResult, WeatherOddsError> {
        let variables = variables.unwrap_or_else(|| Variable::ALL.to_vec());
        let query = Query::new(location, date, variables)?;
        self.predict_for_year(&query, reference_year.unwrap_or_else(current_year))
            .await
    }

    /// Predicts for an already validated query, relative to the current year.
    pub async fn predict_query(&self, query: &Query) -> Result<PredictionResult, WeatherOddsError> {
        self.predict_for_year(query, current_year()).await
    }

    /// Validates a raw inbound request and predicts for it.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use weather_odds::{WeatherOdds, WeatherOddsError, PredictionRequest, ErrorResponse};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), WeatherOddsError> {
    /// let engine = WeatherOdds::new()?;
    /// let request = PredictionRequest::from_json(
    ///     r#"{"lat": -1.29, "lon": 36.82, "date": "2026-04-15T00:00:00Z", "variables": ["rainfall"]}"#,
    /// )?;
    /// match engine.predict_request(&request).await {
    ///     Ok(result) => println!("{}", serde_json::to_string(&result).unwrap()),
    ///     Err(err) => println!("{} {:?}", err.status(), ErrorResponse::from(&err)),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn predict_request(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, WeatherOddsError> {
        let query = Query::from_request(request)?;
        self.predict_query(&query).await
    }

    async fn predict_for_year(
        &self,
        query: &Query,
        reference_year: i32,
    ) -> Result<PredictionResult, WeatherOddsError> {
        let years = self.config.history_years;
        let window = HistoricalWindow::for_date(query.target_date(), reference_year, years)
            .ok_or(WeatherOddsError::InvalidWindow {
                date: query.target_date(),
                reference_year,
                years,
            })?;
        let grid = Grid::with_shape(
            self.config.grid_shape,
            query.location(),
            self.config.grid_step_degrees,
        );
        let requested = query
            .requested_variables()
            .iter()
            .map(|variable| variable.parameter().to_string())
            .collect::<Vec<_>>()
            .join(",");
        info!(
            "Predicting {} at ({}, {}) over {} for [{}]",
            query.target_date(),
            query.location().latitude(),
            query.location().longitude(),
            window,
            requested
        );

        let samples = GridAggregator::new(self.source.as_ref())
            .with_policy(self.config.fetch_policy)
            .with_selection(self.config.sample_selection)
            .aggregate(&grid, &window)
            .await?;
        let result = assemble_prediction(&samples, &grid, &self.config);

        info!(
            "Prediction ready: {} points over {} years, {} trend, {} dropped grid points",
            result.data_points,
            result.data_years,
            result.temp_trend,
            samples.dropped_points.len()
        );
        Ok(result)
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}
