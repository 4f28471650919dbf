use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Next occurrence of `weekday` strictly after `from`. Shared by the
/// extraction instructions and deadline inference so both resolve "Friday"
/// to the same day.
pub fn next_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = i64::from(from.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());
    match (target - current).rem_euclid(7) {
        0 => from + Duration::days(7),
        ahead => from + Duration::days(ahead),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    #[test]
    fn next_weekday_is_strictly_later() {
        // 2025-08-04 is a Monday.
        assert_eq!(next_weekday(day(4), Weekday::Fri), day(8));
        assert_eq!(next_weekday(day(4), Weekday::Mon), day(11));
        assert_eq!(next_weekday(day(4), Weekday::Sun), day(10));
        assert_eq!(next_weekday(day(9), Weekday::Mon), day(11));
        assert_eq!(next_weekday(day(10), Weekday::Sun), day(17));
    }
}
