use chrono::NaiveDate;
use market_data::calendar::UsFederalCalendar;
use market_data::fixture::{self, FixtureSpec};
use stock_forecast::models::ModelConfig;
use stock_forecast::{DataLoader, ForecastRunner, RunnerConfig};

fn fixture_bytes(spec: &FixtureSpec) -> Vec<u8> {
    let bars = fixture::sentinel_bars(spec, &UsFederalCalendar).unwrap();
    let mut bytes = Vec::new();
    fixture::write_csv(&bars, &mut bytes).unwrap();
    bytes
}

#[test]
fn test_default_fixture_loads() {
    let data = DataLoader::from_csv_bytes(fixture_bytes(&FixtureSpec::default())).unwrap();

    assert_eq!(data.len(), 2008);
    assert!(data.values().iter().all(|value| *value == 1.0));
    assert_eq!(data.last_date(), NaiveDate::from_ymd_opt(2020, 12, 31));
}

#[test]
fn test_forecast_over_fixture() {
    let spec = FixtureSpec {
        start: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2020, 7, 31).unwrap(),
        ..FixtureSpec::default()
    };
    let runner = ForecastRunner::new(RunnerConfig {
        model: ModelConfig {
            uncertainty_samples: 100,
            ..ModelConfig::default()
        },
        output_smoothing: Some(5),
        ..RunnerConfig::default()
    })
    .unwrap();

    let mut output = Vec::new();
    let written = runner
        .run("1 week", fixture_bytes(&spec).as_slice(), &mut output)
        .unwrap();
    assert_eq!(written, 7);

    let points: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
    assert_eq!(points[0]["ds"], "2020-08-01");
    for point in &points {
        let yhat = point["yhat"].as_f64().unwrap();
        assert!((yhat - 1.0).abs() < 1e-3, "{}", yhat);
    }
}
