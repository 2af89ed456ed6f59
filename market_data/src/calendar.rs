//! US federal holiday calendar and business-day generation
//!
//! Holidays are derived from their rules for every year, never looked up
//! from a fixed list. Fixed-date holidays that land on a weekend are observed
//! on the nearest workday (Saturday -> Friday, Sunday -> Monday), which can
//! move New Year's Day into the last day of the previous year.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Holidays in the US federal calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FederalHoliday {
    NewYearsDay,
    MartinLutherKingJrDay,
    PresidentsDay,
    MemorialDay,
    Juneteenth,
    IndependenceDay,
    LaborDay,
    ColumbusDay,
    VeteransDay,
    Thanksgiving,
    Christmas,
}

/// When a holiday falls within its year
#[derive(Debug, Clone, Copy)]
enum HolidayRule {
    /// Fixed month/day, shifted to the nearest workday when on a weekend
    Fixed { month: u32, day: u32 },
    /// The n-th given weekday of a month
    NthWeekday { month: u32, weekday: Weekday, n: u8 },
    /// The last given weekday of a month
    LastWeekday { month: u32, weekday: Weekday },
}

impl FederalHoliday {
    /// Every holiday in calendar order
    pub const ALL: [FederalHoliday; 11] = [
        FederalHoliday::NewYearsDay,
        FederalHoliday::MartinLutherKingJrDay,
        FederalHoliday::PresidentsDay,
        FederalHoliday::MemorialDay,
        FederalHoliday::Juneteenth,
        FederalHoliday::IndependenceDay,
        FederalHoliday::LaborDay,
        FederalHoliday::ColumbusDay,
        FederalHoliday::VeteransDay,
        FederalHoliday::Thanksgiving,
        FederalHoliday::Christmas,
    ];

    /// Human readable holiday name
    pub fn name(&self) -> &'static str {
        match self {
            FederalHoliday::NewYearsDay => "New Year's Day",
            FederalHoliday::MartinLutherKingJrDay => "Birthday of Martin Luther King, Jr.",
            FederalHoliday::PresidentsDay => "Washington's Birthday",
            FederalHoliday::MemorialDay => "Memorial Day",
            FederalHoliday::Juneteenth => "Juneteenth National Independence Day",
            FederalHoliday::IndependenceDay => "Independence Day",
            FederalHoliday::LaborDay => "Labor Day",
            FederalHoliday::ColumbusDay => "Columbus Day",
            FederalHoliday::VeteransDay => "Veterans Day",
            FederalHoliday::Thanksgiving => "Thanksgiving Day",
            FederalHoliday::Christmas => "Christmas Day",
        }
    }

    fn rule(&self) -> HolidayRule {
        use HolidayRule::*;
        match self {
            FederalHoliday::NewYearsDay => Fixed { month: 1, day: 1 },
            FederalHoliday::MartinLutherKingJrDay => NthWeekday {
                month: 1,
                weekday: Weekday::Mon,
                n: 3,
            },
            FederalHoliday::PresidentsDay => NthWeekday {
                month: 2,
                weekday: Weekday::Mon,
                n: 3,
            },
            FederalHoliday::MemorialDay => LastWeekday {
                month: 5,
                weekday: Weekday::Mon,
            },
            FederalHoliday::Juneteenth => Fixed { month: 6, day: 19 },
            FederalHoliday::IndependenceDay => Fixed { month: 7, day: 4 },
            FederalHoliday::LaborDay => NthWeekday {
                month: 9,
                weekday: Weekday::Mon,
                n: 1,
            },
            FederalHoliday::ColumbusDay => NthWeekday {
                month: 10,
                weekday: Weekday::Mon,
                n: 2,
            },
            FederalHoliday::VeteransDay => Fixed { month: 11, day: 11 },
            FederalHoliday::Thanksgiving => NthWeekday {
                month: 11,
                weekday: Weekday::Thu,
                n: 4,
            },
            FederalHoliday::Christmas => Fixed { month: 12, day: 25 },
        }
    }

    /// First year the holiday was observed federally
    fn first_year(&self) -> i32 {
        match self {
            FederalHoliday::MartinLutherKingJrDay => 1986,
            FederalHoliday::Juneteenth => 2021,
            _ => i32::MIN,
        }
    }

    /// The date the holiday of `year` is observed, if it exists that year
    ///
    /// The result can fall outside `year`: New Year's Day on a Saturday is
    /// observed on December 31 of the previous year.
    pub fn observed_date(&self, year: i32) -> Option<NaiveDate> {
        if year < self.first_year() {
            return None;
        }

        match self.rule() {
            HolidayRule::Fixed { month, day } => {
                NaiveDate::from_ymd_opt(year, month, day).and_then(nearest_workday)
            }
            HolidayRule::NthWeekday { month, weekday, n } => {
                NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
            }
            HolidayRule::LastWeekday { month, weekday } => last_weekday_of_month(year, month, weekday),
        }
    }
}

/// Shift a weekend date to the closest weekday
fn nearest_workday(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_sub_days(Days::new(1)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let mut date = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    while date.weekday() != weekday {
        date = date.pred_opt()?;
    }
    Some(date)
}

/// Whether a date falls on Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Holiday calendar used to decide which dates are business days
pub trait HolidayCalendar {
    /// The holiday observed on `date`, if any
    fn holiday_on(&self, date: NaiveDate) -> Option<FederalHoliday>;

    /// Whether `date` is an observed holiday
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_on(date).is_some()
    }

    /// Whether `date` is a weekday that is not a holiday
    fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.is_holiday(date)
    }

    /// Business days in `start..=end`, in increasing order
    fn business_days(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter(|date| self.is_business_day(*date))
            .collect()
    }
}

/// The US federal holiday calendar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsFederalCalendar;

impl UsFederalCalendar {
    /// Observed holidays whose rule belongs to `year`, sorted by date
    pub fn holidays(&self, year: i32) -> Vec<(NaiveDate, FederalHoliday)> {
        let mut holidays: Vec<(NaiveDate, FederalHoliday)> = FederalHoliday::ALL
            .iter()
            .filter_map(|holiday| holiday.observed_date(year).map(|date| (date, *holiday)))
            .collect();
        holidays.sort_by_key(|(date, _)| *date);
        holidays
    }
}

impl HolidayCalendar for UsFederalCalendar {
    fn holiday_on(&self, date: NaiveDate) -> Option<FederalHoliday> {
        // Next year's New Year's Day may be observed on December 31
        [date.year(), date.year() + 1].into_iter().find_map(|year| {
            FederalHoliday::ALL
                .iter()
                .copied()
                .find(|holiday| holiday.observed_date(year) == Some(date))
        })
    }
}
