//! Date calculation utilities.

use chrono::{Datelike, NaiveDate, Utc};

/// Age in whole years on `today` for someone born on `date_of_birth`.
///
/// A birthday that has not yet occurred in `today`'s year does not count. Someone born
/// on February 29th turns a year older on March 1st in non-leap years.
///
/// # Example
/// ```ignore
/// let dob = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
///
/// assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), 23);
/// assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 24);
/// ```
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let birthday_pending =
        (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day());

    today.year() - date_of_birth.year() - i32::from(birthday_pending)
}

/// Age in whole years as of the current UTC date
pub fn age_today(date_of_birth: NaiveDate) -> i32 {
    age_on(date_of_birth, Utc::now().date_naive())
}
