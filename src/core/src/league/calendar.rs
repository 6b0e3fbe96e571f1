use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Maps the offseason day counter onto calendar dates. Day 0 is March 1 of the league year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueCalendar {
    pub year: i32,
}

pub const LEGAL_TAMPERING_DAY: u32 = 10;
pub const MARKET_OPEN_DAY: u32 = 12;

impl LeagueCalendar {
    pub fn new(year: i32) -> Self {
        LeagueCalendar { year }
    }

    pub fn offseason_start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 3, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn june_first(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 6, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn date_for_day(&self, day: u32) -> NaiveDate {
        self.offseason_start()
            .checked_add_signed(Duration::days(day as i64))
            .unwrap_or_else(|| self.offseason_start())
    }

    pub fn day_for_date(&self, date: NaiveDate) -> u32 {
        (date - self.offseason_start()).num_days().max(0) as u32
    }

    /// Whether a release on `date` already falls on the post-June-1 side of the league year.
    pub fn is_post_june_1(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date >= self.june_first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_zero_is_march_first() {
        let calendar = LeagueCalendar::new(2024);
        assert_eq!(calendar.date_for_day(0), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(
            calendar.date_for_day(MARKET_OPEN_DAY),
            NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
        );
    }

    #[test]
    fn june_first_boundary() {
        let calendar = LeagueCalendar::new(2024);
        let june_first = calendar.day_for_date(calendar.june_first());
        assert_eq!(june_first, 92);
        assert!(!calendar.is_post_june_1(calendar.date_for_day(june_first - 1)));
        assert!(calendar.is_post_june_1(calendar.date_for_day(june_first)));
    }
}
