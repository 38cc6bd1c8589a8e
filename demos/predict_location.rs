//! Predicts the odds for a summer day in Berlin and prints the JSON response.
//!
//! Run with `RUST_LOG=info` to see the grid fetches.

use chrono::NaiveDate;
use weather_odds::{ErrorResponse, LatLon, Variable, WeatherOdds, WeatherOddsError};

#[tokio::main]
async fn main() -> Result<(), WeatherOddsError> {
    env_logger::init();
    let engine = WeatherOdds::new()?;
    let date = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();

    let outcome = engine
        .predict()
        .location(LatLon(52.52, 13.405))
        .date(date)
        .variables(vec![Variable::Temperature, Variable::Rainfall])
        .call()
        .await;

    match outcome {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Err(err) => {
            let body = ErrorResponse::from(&err);
            eprintln!("{} {}", err.status(), serde_json::to_string(&body).unwrap());
        }
    }

    Ok(())
}
