//! Client for the NASA POWER daily point API.

use crate::config::SourceConfig;
use crate::source::error::SourceError;
use crate::source::{ClimateSource, PointSeries, RawSeries};
use crate::types::grid::{GridPoint, LatLon};
use crate::types::parameter::ClimateParameter;
use crate::types::window::HistoricalWindow;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const MAX_ERROR_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Default, Deserialize)]
struct PowerResponse {
    #[serde(default)]
    properties: PowerProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PowerProperties {
    #[serde(default)]
    parameter: HashMap<String, RawSeries>,
}

pub struct PowerClient {
    client: Client,
    config: SourceConfig,
}

impl PowerClient {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(SourceError::ClientBuild)?;
        Ok(Self { client, config })
    }

    pub(crate) fn point_url(&self, location: LatLon, window: &HistoricalWindow) -> String {
        format!(
            "{}/temporal/daily/point?parameters={}&community={}&longitude={}&latitude={}&start={}&end={}&format=JSON",
            self.config.base_url.trim_end_matches('/'),
            ClimateParameter::query_list(),
            self.config.community,
            location.longitude(),
            location.latitude(),
            window.start_key(),
            window.end_key(),
        )
    }
}

#[async_trait]
impl ClimateSource for PowerClient {
    async fn fetch_point(
        &self,
        point: &GridPoint,
        window: &HistoricalWindow,
    ) -> Result<PointSeries, SourceError> {
        let url = self.point_url(point.location, window);
        info!("Fetching {} from {}", point, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::BodyRead(url.clone(), e))?;

        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
            return Err(SourceError::HttpStatus {
                url,
                status,
                message: summarize(&body),
            });
        }

        let series = parse_payload(&url, &body)?;
        debug!("Received {} bytes for {}", body.len(), point);
        Ok(series)
    }
}

/// Extracts the per-parameter series from a POWER JSON body.
///
/// A body without `properties.parameter` or without one of the parameters
/// yields empty series rather than an error.
pub(crate) fn parse_payload(url: &str, body: &str) -> Result<PointSeries, SourceError> {
    let mut response: PowerResponse =
        serde_json::from_str(body).map_err(|e| SourceError::MalformedPayload {
            url: url.to_string(),
            source: e,
        })?;

    let mut series = PointSeries::new();
    for parameter in ClimateParameter::ALL {
        if let Some(values) = response.properties.parameter.remove(parameter.code()) {
            series.insert(parameter, values);
        }
    }
    Ok(series)
}

fn summarize(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_MESSAGE_CHARS {
        return trimmed.to_string();
    }
    let mut message: String = trimmed.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
    message.push('…');
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::grid::GridPosition;
    use chrono::NaiveDate;

    const URL: &str = "https://power.example/api";

    fn window() -> HistoricalWindow {
        let target = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        HistoricalWindow::for_date(target, 2025, 15).unwrap()
    }

    #[test]
    fn test_point_url_carries_parameters_and_range() {
        let client = PowerClient::new(SourceConfig::default()).unwrap();
        let url = client.point_url(LatLon(52.5, 13.25), &window());
        assert!(url.starts_with(
            "https://power.larc.nasa.gov/api/temporal/daily/point?parameters=T2M,PRECTOTCORR,WS10M"
        ));
        assert!(url.contains("&community=AG"));
        assert!(url.contains("&longitude=13.25&latitude=52.5"));
        assert!(url.contains("&start=20100704&end=20240704"));
        assert!(url.ends_with("&format=JSON"));
    }

    #[test]
    fn test_parse_payload_reads_each_parameter() {
        let body = r#"{
            "type": "Feature",
            "properties": {
                "parameter": {
                    "T2M": {"20230704": 21.4, "20240704": -999},
                    "PRECTOTCORR": {"20230704": 0.0, "20240704": 3.2},
                    "WS10M": {"20230704": 4.1, "20240704": 5.0}
                }
            }
        }"#;
        let series = parse_payload(URL, body).unwrap();
        let temperature = series.get(ClimateParameter::Temperature).unwrap();
        assert_eq!(temperature.get("20230704"), Some(&21.4));
        assert_eq!(temperature.get("20240704"), Some(&-999.0));
        assert_eq!(
            series
                .get(ClimateParameter::Precipitation)
                .unwrap()
                .len(),
            2
        );
        assert!(series.get(ClimateParameter::WindSpeed).is_some());
    }

    #[test]
    fn test_parse_payload_tolerates_missing_blocks() {
        let series = parse_payload(URL, r#"{"properties": {"parameter": {"T2M": {}}}}"#).unwrap();
        assert_eq!(series.get(ClimateParameter::Temperature), Some(&RawSeries::new()));
        assert!(series.get(ClimateParameter::WindSpeed).is_none());

        let series = parse_payload(URL, r#"{"messages": []}"#).unwrap();
        assert!(series.get(ClimateParameter::Temperature).is_none());
    }

    #[test]
    fn test_parse_payload_rejects_garbage() {
        let err = parse_payload(URL, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SourceError::MalformedPayload { .. }));
        let err = parse_payload(URL, r#"{"properties": {"parameter": {"T2M": {"20230704": "warm"}}}}"#)
            .unwrap_err();
        assert!(matches!(err, SourceError::MalformedPayload { .. }));
    }

    #[test]
    fn test_summarize_truncates_long_bodies() {
        let long = "x".repeat(500);
        let message = summarize(&long);
        assert_eq!(message.chars().count(), MAX_ERROR_MESSAGE_CHARS + 1);
        assert_eq!(summarize("  quota exceeded \n"), "quota exceeded");
    }

    #[tokio::test]
    async fn test_unreachable_archive_is_a_network_error() {
        let config = SourceConfig::builder()
            .base_url("http://127.0.0.1:9".to_string())
            .timeout_secs(2)
            .build();
        let client = PowerClient::new(config).unwrap();
        let point = GridPoint {
            position: GridPosition::Center,
            location: LatLon(0.0, 0.0),
        };
        let err = client.fetch_point(&point, &window()).await.unwrap_err();
        assert!(matches!(err, SourceError::NetworkRequest(..)), "{err:?}");
    }
}
