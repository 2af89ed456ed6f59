use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::Value;
use stock_forecast::data::TimeSeriesData;
use stock_forecast::error::Result;
use stock_forecast::models::{ForecastModel, ForecastResult, ModelConfig, TrainedForecastModel};
use stock_forecast::utils::future_dates;
use stock_forecast::{ForecastError, ForecastRunner, RunnerConfig};

/// Predicts the last observed value with a fixed band
#[derive(Debug, Clone)]
struct LastValue;

#[derive(Debug)]
struct TrainedLastValue {
    dates: Vec<NaiveDate>,
    last: f64,
}

impl ForecastModel for LastValue {
    type Trained = TrainedLastValue;

    fn train(&self, data: &TimeSeriesData) -> Result<Self::Trained> {
        Ok(TrainedLastValue {
            dates: data.dates().to_vec(),
            last: data.values()[data.len() - 1],
        })
    }

    fn name(&self) -> &str {
        "Last value"
    }
}

impl TrainedForecastModel for TrainedLastValue {
    fn future_dates(&self, periods: usize, include_history: bool) -> Vec<NaiveDate> {
        let last = self.dates[self.dates.len() - 1];
        let mut dates = if include_history {
            self.dates.clone()
        } else {
            Vec::new()
        };
        dates.extend(future_dates(last, periods));
        dates
    }

    fn predict(&self, dates: &[NaiveDate]) -> Result<ForecastResult> {
        let values = vec![self.last; dates.len()];
        let intervals = vec![(self.last - 1.0, self.last + 1.0); dates.len()];
        ForecastResult::new(dates.to_vec(), values, intervals)
    }

    fn name(&self) -> &str {
        "Last value"
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

const TWO_DAYS: &str = "symbol,timestamp,open,high,low,close,volume\n\
                        AAPL,2020-07-01,1,1,1,10,1\n\
                        AAPL,2020-07-02,1,1,1,12,1\n";

fn parse_output(bytes: &[u8]) -> Vec<Value> {
    match serde_json::from_slice(bytes).unwrap() {
        Value::Array(records) => records,
        other => panic!("expected an array, got {}", other),
    }
}

#[test]
fn test_one_week_gives_seven_records_after_history() {
    let runner = ForecastRunner::new(RunnerConfig::default()).unwrap();
    let mut output = Vec::new();

    let written = runner.run("1 week", TWO_DAYS.as_bytes(), &mut output).unwrap();
    assert_eq!(written, 7);

    let records = parse_output(&output);
    assert_eq!(records.len(), 7);

    let dates: Vec<NaiveDate> = records
        .iter()
        .map(|record| record["ds"].as_str().unwrap().parse().unwrap())
        .collect();
    assert_eq!(dates[0], date(2020, 7, 3));
    assert_eq!(dates[6], date(2020, 7, 9));
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));

    for record in &records {
        let object = record.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["ds", "yhat", "yhat_lower", "yhat_upper"]);
        assert!(record["yhat"].is_f64());
    }
}

#[test]
fn test_horizon_controls_record_count() {
    let runner = ForecastRunner::with_model(LastValue, None, None);
    let data = TimeSeriesData::new(vec![date(2020, 7, 1), date(2020, 7, 2)], vec![10.0, 12.0]).unwrap();

    assert_eq!(runner.forecast(&data, "1 month").unwrap().len(), 30);
    assert_eq!(runner.forecast(&data, "3 months").unwrap().len(), 90);
    assert_eq!(runner.forecast(&data, "5 years").unwrap().len(), 1825);
    assert_eq!(runner.forecast(&data, "bogus").unwrap().len(), 30);
}

#[test]
fn test_smoothing_windows() {
    let data = TimeSeriesData::new(
        vec![date(2020, 7, 1), date(2020, 7, 2), date(2020, 7, 3)],
        vec![10.0, 10.0, 40.0],
    )
    .unwrap();

    let plain = ForecastRunner::with_model(LastValue, None, None)
        .forecast(&data, "1 week")
        .unwrap();
    assert_eq!(plain.values(), &[40.0; 7]);

    // History smoothing changes what the model sees
    let smoothed_history = ForecastRunner::with_model(LastValue, None, Some(3))
        .forecast(&data, "1 week")
        .unwrap();
    assert_eq!(smoothed_history.values(), &[25.0; 7]);

    // A flat forecast stays flat under smoothing
    let smoothed = ForecastRunner::with_model(LastValue, Some(5), None)
        .forecast(&data, "1 week")
        .unwrap();
    assert_eq!(smoothed.len(), 7);
    assert_eq!(smoothed.values()[6], 40.0);
    assert_eq!(smoothed.values()[0], 40.0);
    assert_eq!(smoothed.intervals()[6], (39.0, 41.0));
}

#[test]
fn test_zero_smoothing_window_is_a_math_error() {
    let data = TimeSeriesData::new(vec![date(2020, 7, 1), date(2020, 7, 2)], vec![10.0, 12.0]).unwrap();

    let history = ForecastRunner::with_model(LastValue, None, Some(0)).forecast(&data, "1 week");
    assert!(matches!(history, Err(ForecastError::Math(_))));

    let output = ForecastRunner::with_model(LastValue, Some(0), None).forecast(&data, "1 week");
    assert!(matches!(output, Err(ForecastError::Math(_))));
}

#[test]
fn test_missing_close_writes_nothing() {
    let runner = ForecastRunner::new(RunnerConfig::default()).unwrap();
    let mut output = Vec::new();

    let err = runner
        .run(
            "1 week",
            "symbol,timestamp,open\nAAPL,2020-07-01,1\n".as_bytes(),
            &mut output,
        )
        .unwrap_err();
    assert!(err.is_data_error());
    assert!(output.is_empty());
}

#[test]
fn test_single_row_is_a_model_error() {
    let runner = ForecastRunner::new(RunnerConfig {
        model: ModelConfig {
            uncertainty_samples: 0,
            ..ModelConfig::default()
        },
        ..RunnerConfig::default()
    })
    .unwrap();
    let mut output = Vec::new();

    let err = runner
        .run("1 week", "timestamp,close\n2020-07-01,1\n".as_bytes(), &mut output)
        .unwrap_err();
    assert!(!err.is_data_error());
    assert!(output.is_empty());
}

#[test]
fn test_runs_are_deterministic() {
    let runner = ForecastRunner::new(RunnerConfig {
        output_smoothing: Some(5),
        ..RunnerConfig::default()
    })
    .unwrap();

    let mut first = Vec::new();
    let mut second = Vec::new();
    runner.run("1 month", TWO_DAYS.as_bytes(), &mut first).unwrap();
    runner.run("1 month", TWO_DAYS.as_bytes(), &mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(parse_output(&first).len(), 30);
}
