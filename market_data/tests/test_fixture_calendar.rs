use chrono::{Datelike, NaiveDate, Weekday};
use market_data::calendar::{HolidayCalendar, UsFederalCalendar};
use market_data::fixture::{self, FixtureSpec};
use market_data::{Bar, FederalHoliday};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashSet;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn default_bars() -> Vec<Bar> {
    fixture::sentinel_bars(&FixtureSpec::default(), &UsFederalCalendar).unwrap()
}

#[test]
fn test_fixture_dates_are_strictly_increasing_business_days() {
    let bars = default_bars();

    assert_eq!(bars.first().unwrap().timestamp, date(2013, 1, 2));
    assert_eq!(bars.last().unwrap().timestamp, date(2020, 12, 31));
    assert!(bars.windows(2).all(|pair| pair[0].timestamp < pair[1].timestamp));

    for bar in &bars {
        assert!(!matches!(bar.timestamp.weekday(), Weekday::Sat | Weekday::Sun));
        assert!(!UsFederalCalendar.is_holiday(bar.timestamp));
    }
}

#[test]
fn test_fixture_excludes_every_observed_holiday() {
    let dates: HashSet<NaiveDate> = default_bars().into_iter().map(|bar| bar.timestamp).collect();

    for year in 2013..=2020 {
        for (holiday_date, holiday) in UsFederalCalendar.holidays(year) {
            assert!(
                !dates.contains(&holiday_date),
                "{} {} should not be a business day",
                holiday.name(),
                holiday_date
            );
        }
    }
}

#[test]
fn test_fixture_row_count() {
    // 2088 weekdays between 2013-01-01 and 2020-12-31, minus 80 observed
    // holidays that fall on weekdays (ten per year, Juneteenth not yet federal)
    assert_eq!(default_bars().len(), 2008);
}

#[test]
fn test_fixture_values_are_sentinels() {
    for bar in default_bars() {
        assert_eq!(bar.symbol, "AAPL");
        assert_eq!(bar.open, 1.0);
        assert_eq!(bar.high, 1.0);
        assert_eq!(bar.low, 1.0);
        assert_eq!(bar.close, 1.0);
        assert_eq!(bar.volume, 1);
    }
}

#[rstest]
#[case(date(2020, 1, 1), false)] // New Year's Day
#[case(date(2020, 1, 2), true)]
#[case(date(2020, 7, 3), false)] // Independence Day observed
#[case(date(2020, 7, 4), false)] // Saturday
#[case(date(2020, 7, 6), true)]
#[case(date(2015, 7, 3), false)] // July 4, 2015 was a Saturday
#[case(date(2013, 11, 28), false)] // Thanksgiving
#[case(date(2013, 11, 29), true)] // Day after Thanksgiving is not federal
#[case(date(2017, 1, 2), false)] // New Year's Day observed
#[case(date(2018, 12, 24), true)] // Christmas Eve is not federal
fn test_spot_checks(#[case] day: NaiveDate, #[case] expected: bool) {
    let dates: HashSet<NaiveDate> = default_bars().into_iter().map(|bar| bar.timestamp).collect();
    assert_eq!(dates.contains(&day), expected, "{}", day);
}

#[test]
fn test_holiday_lookup_names_the_rule() {
    assert_eq!(
        UsFederalCalendar.holiday_on(date(2020, 7, 3)),
        Some(FederalHoliday::IndependenceDay)
    );
    assert_eq!(UsFederalCalendar.holiday_on(date(2020, 7, 6)), None);
}

#[test]
fn test_write_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.csv");
    let spec = FixtureSpec {
        start: date(2020, 12, 23),
        end: date(2020, 12, 31),
        output: path.clone(),
        ..FixtureSpec::default()
    };

    let bars = fixture::sentinel_bars(&spec, &UsFederalCalendar).unwrap();
    fixture::write_csv_file(&spec.output, &bars).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "symbol,timestamp,open,high,low,close,volume\n\
         AAPL,2020-12-23,1,1,1,1,1\n\
         AAPL,2020-12-24,1,1,1,1,1\n\
         AAPL,2020-12-28,1,1,1,1,1\n\
         AAPL,2020-12-29,1,1,1,1,1\n\
         AAPL,2020-12-30,1,1,1,1,1\n\
         AAPL,2020-12-31,1,1,1,1,1\n"
    );
}
