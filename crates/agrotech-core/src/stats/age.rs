//! Age from birth date.

use chrono::{Datelike, NaiveDate};

use crate::dates::parse_date;

/// Whole years between `birth_date` and `today`.
///
/// One year is subtracted when today's month/day comes before the birth
/// month/day. Negative spans clamp to zero. `None` when the date is absent or
/// unparseable.
pub fn age_in_years(birth_date: &str, today: NaiveDate) -> Option<u32> {
    let birth = parse_date(birth_date)?;

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    Some(years.max(0) as u32)
}

/// Display label for an animal's age.
///
/// `""` for absent or unparseable dates, `"< 1 ano"` inside the first year,
/// otherwise `"N anos"`. Birth dates in the future read `"0 anos"`.
pub fn age_label(birth_date: &str, today: NaiveDate) -> String {
    let Some(birth) = parse_date(birth_date) else {
        return String::new();
    };
    if birth > today {
        return "0 anos".to_string();
    }

    match age_in_years(birth_date, today) {
        Some(0) => "< 1 ano".to_string(),
        Some(years) => format!("{years} anos"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_under_one_year() {
        assert_eq!(age_label("2024-03-15", ymd(2024, 11, 1)), "< 1 ano");
    }

    #[test]
    fn test_whole_years() {
        assert_eq!(age_label("2020-01-10", ymd(2024, 5, 14)), "4 anos");
        assert_eq!(age_in_years("2020-01-10", ymd(2024, 5, 14)), Some(4));
    }

    #[test]
    fn test_birthday_boundary() {
        assert_eq!(age_in_years("2021-03-15", ymd(2024, 3, 14)), Some(2));
        assert_eq!(age_in_years("2021-03-15", ymd(2024, 3, 15)), Some(3));
        assert_eq!(age_label("2023-05-14", ymd(2024, 5, 13)), "< 1 ano");
        assert_eq!(age_label("2023-05-14", ymd(2024, 5, 14)), "1 anos");
    }

    #[test]
    fn test_absent_or_invalid() {
        assert_eq!(age_label("", ymd(2024, 5, 14)), "");
        assert_eq!(age_label("amanhã", ymd(2024, 5, 14)), "");
        assert_eq!(age_in_years("2024-13-01", ymd(2024, 5, 14)), None);
    }

    #[test]
    fn test_future_birth_clamps() {
        assert_eq!(age_label("2026-01-01", ymd(2024, 5, 14)), "0 anos");
        assert_eq!(age_in_years("2026-01-01", ymd(2024, 5, 14)), Some(0));
    }

    #[test]
    fn test_brazilian_format() {
        assert_eq!(age_label("15/03/2021", ymd(2024, 5, 14)), "3 anos");
    }

    proptest! {
        #[test]
        fn prop_past_dates_have_consistent_age(days_ago in 0i64..20_000) {
            let today = ymd(2024, 6, 30);
            let birth = today - chrono::Duration::days(days_ago);
            let iso = birth.format("%Y-%m-%d").to_string();

            let years = age_in_years(&iso, today).unwrap();
            let label = age_label(&iso, today);

            // Less than a full year has passed exactly when the first
            // anniversary is still ahead.
            let first_anniversary = birth
                .with_year(birth.year() + 1)
                .unwrap_or_else(|| ymd(birth.year() + 1, 3, 1));
            prop_assert_eq!(years == 0, today < first_anniversary);
            prop_assert_eq!(label == "< 1 ano", years == 0);
        }
    }
}
