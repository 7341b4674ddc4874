//! Calendar arithmetic on civil dates.
//!
//! Every function is pure and takes "today" explicitly; nothing here reads
//! the system clock. Arithmetic is checked: a result outside the supported
//! range comes back as `None` and is treated like missing data.

use jiff::{civil::Date, Span};

use crate::models::{GrowingZoneData, Season};

/// Earliest year a computed date may land in before it is rejected.
pub const MIN_YEAR: i16 = 1900;

/// Latest year a computed date may land in before it is rejected.
pub const MAX_YEAR: i16 = 2999;

/// Adds `days` (possibly negative) to `date`.
pub fn add_days(date: Date, days: i64) -> Option<Date> {
    let span = Span::new().try_days(days).ok()?;
    date.checked_add(span).ok().filter(|d| is_valid_date(*d))
}

/// Subtracts `days` (possibly negative) from `date`.
pub fn sub_days(date: Date, days: i64) -> Option<Date> {
    add_days(date, days.checked_neg()?)
}

/// Whether a date is plausible enough to persist.
pub fn is_valid_date(date: Date) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Frost-derived reference date for a season.
///
/// Spring uses the last frost in the current year, or next year once
/// `today` is past June. Fall uses the first frost in the current year, or
/// next year once that date has passed. Returns `None` when the grower has
/// no frost date for the season.
pub fn season_anchor_date(season: Season, zone: &GrowingZoneData, today: Date) -> Option<Date> {
    match season {
        Season::Spring => {
            let frost = zone.last_frost?;
            let year = if today.month() > 6 {
                today.year().checked_add(1)?
            } else {
                today.year()
            };
            month_day_in_year(frost, year)
        }
        Season::Fall => {
            let frost = zone.first_frost?;
            let this_year = month_day_in_year(frost, today.year())?;
            if today > this_year {
                month_day_in_year(frost, today.year().checked_add(1)?)
            } else {
                Some(this_year)
            }
        }
    }
}

/// Places the month and day of `date` in `year`; Feb 29 falls back to
/// Feb 28 outside leap years.
fn month_day_in_year(date: Date, year: i16) -> Option<Date> {
    Date::new(year, date.month(), date.day())
        .or_else(|_| Date::new(year, date.month(), 28))
        .ok()
        .filter(|d| is_valid_date(*d))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn zone(last: Option<Date>, first: Option<Date>) -> GrowingZoneData {
        GrowingZoneData {
            last_frost: last,
            first_frost: first,
        }
    }

    #[test]
    fn test_add_and_sub_days() {
        assert_eq!(add_days(date(2024, 2, 27), 3), Some(date(2024, 3, 1)));
        assert_eq!(add_days(date(2024, 3, 1), -1), Some(date(2024, 2, 29)));
        assert_eq!(sub_days(date(2024, 5, 1), 14), Some(date(2024, 4, 17)));
        assert_eq!(sub_days(date(2024, 5, 1), -7), Some(date(2024, 5, 8)));
    }

    #[test]
    fn test_out_of_range_arithmetic_is_rejected() {
        assert_eq!(add_days(date(2999, 12, 31), 1), None);
        assert_eq!(sub_days(date(1900, 1, 1), 1), None);
        assert_eq!(add_days(date(2024, 1, 1), i64::MAX), None);
        assert_eq!(sub_days(date(2024, 1, 1), i64::MIN), None);
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date(date(2024, 6, 1)));
        assert!(!is_valid_date(date(1899, 12, 31)));
        assert!(!is_valid_date(date(3000, 1, 1)));
    }

    #[test]
    fn test_spring_anchor_uses_current_year_in_first_half() {
        let zone = zone(Some(date(2020, 5, 1)), None);
        assert_eq!(
            season_anchor_date(Season::Spring, &zone, date(2024, 2, 10)),
            Some(date(2024, 5, 1))
        );
        assert_eq!(
            season_anchor_date(Season::Spring, &zone, date(2024, 6, 30)),
            Some(date(2024, 5, 1))
        );
    }

    #[test]
    fn test_spring_anchor_rolls_after_midyear() {
        let zone = zone(Some(date(2020, 5, 1)), None);
        assert_eq!(
            season_anchor_date(Season::Spring, &zone, date(2024, 7, 1)),
            Some(date(2025, 5, 1))
        );
    }

    #[test]
    fn test_fall_anchor_rolls_once_frost_has_passed() {
        let zone = zone(None, Some(date(2020, 10, 15)));
        assert_eq!(
            season_anchor_date(Season::Fall, &zone, date(2024, 10, 15)),
            Some(date(2024, 10, 15))
        );
        assert_eq!(
            season_anchor_date(Season::Fall, &zone, date(2024, 10, 16)),
            Some(date(2025, 10, 15))
        );
    }

    #[test]
    fn test_missing_frost_date_has_no_anchor() {
        let spring_only = zone(Some(date(2020, 5, 1)), None);
        assert_eq!(
            season_anchor_date(Season::Fall, &spring_only, date(2024, 1, 1)),
            None
        );
        let fall_only = zone(None, Some(date(2020, 10, 15)));
        assert_eq!(
            season_anchor_date(Season::Spring, &fall_only, date(2024, 1, 1)),
            None
        );
    }

    #[test]
    fn test_leap_day_frost_falls_back_to_feb_28() {
        let zone = zone(Some(date(2024, 2, 29)), None);
        assert_eq!(
            season_anchor_date(Season::Spring, &zone, date(2025, 1, 1)),
            Some(date(2025, 2, 28))
        );
    }
}
