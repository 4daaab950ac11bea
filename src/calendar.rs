use chrono::{Datelike, Local, NaiveDate};

use crate::model::DateKey;

/// Number of days in `(year, zero-based month)`, or 0 if the pair does not
/// name a real month. Out-of-range input is treated as "no such month"
/// rather than rejected.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let Some(month1) = month0.checked_add(1) else {
        return 0;
    };
    let Some(first) = NaiveDate::from_ymd_opt(year, month1, 1) else {
        return 0;
    };
    let next_first = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };
    match next_first {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        None => 0,
    }
}

/// Ordered date keys for every day of `(year, zero-based month)`.
pub fn month_date_keys(year: i32, month0: u32) -> Vec<DateKey> {
    let Some(month1) = month0.checked_add(1) else {
        return Vec::new();
    };
    (1..=days_in_month(year, month0))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month1, day))
        .map(date_key)
        .collect()
}

/// `YYYY-MM-DD`, built from local calendar fields only — no timezone math.
pub fn date_key(date: NaiveDate) -> DateKey {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Today's `(year, zero-based month)` in local time.
pub fn current_year_month() -> (i32, u32) {
    let today = Local::now().date_naive();
    (today.year(), today.month0())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn march_has_31_days() {
        assert_eq!(days_in_month(2024, 2), 31);
    }

    #[test]
    fn february_leap_year() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28); // century, not leap
        assert_eq!(days_in_month(2000, 1), 29);
    }

    #[test]
    fn december_wraps_year() {
        assert_eq!(days_in_month(2024, 11), 31);
    }

    #[test]
    fn month_keys_ordered_and_padded() {
        let keys = month_date_keys(2024, 3);
        assert_eq!(keys.len(), 30);
        assert_eq!(keys[0], "2024-04-01");
        assert_eq!(keys[8], "2024-04-09");
        assert_eq!(keys[29], "2024-04-30");
    }

    #[test]
    fn invalid_month_yields_no_keys() {
        assert_eq!(days_in_month(2024, 12), 0);
        assert!(month_date_keys(2024, 99).is_empty());
        assert_eq!(days_in_month(2024, u32::MAX), 0);
        assert!(month_date_keys(2024, u32::MAX).is_empty());
    }
}
