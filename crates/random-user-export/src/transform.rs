//! Flattening of fetched users into CSV rows.
//!
//! The random source for identifiers and the date used for age derivation are
//! passed in, so the same inputs always produce the same rows.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rand::Rng;

use crate::model::{OutputRecord, RawUser};

/// Smallest generated identifier.
pub const ID_MIN: u32 = 1_000_000;

/// Exclusive upper bound for generated identifiers.
pub const ID_MAX: u32 = 100_000_000;

const GENDER_MALE: u8 = 0;
const GENDER_FEMALE: u8 = 1;
const GENDER_OTHER: u8 = 2;

/// Maps each user to an output row, preserving order.
///
/// Every row receives an identifier drawn uniformly from
/// [`ID_MIN`]`..`[`ID_MAX`]; identifiers are not checked for uniqueness.
#[must_use]
pub fn transform<R>(sample: &[RawUser], rng: &mut R, today: NaiveDate) -> Vec<OutputRecord>
where
    R: Rng + ?Sized,
{
    sample
        .iter()
        .map(|user| OutputRecord {
            id: rng.random_range(ID_MIN..ID_MAX),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            gender: gender_code(user.gender.as_deref()),
            email: user.email.clone(),
            username: user.username.clone(),
            date_of_birth: format_dob(&user.date_of_birth),
            age: calculate_age(user.date_of_birth.date_naive(), today),
        })
        .collect()
}

/// Maps a gender string to its numeric code, ignoring case.
///
/// # Examples
///
/// ```
/// use random_user_export::gender_code;
///
/// assert_eq!(gender_code(Some("Male")), 0);
/// assert_eq!(gender_code(Some("FEMALE")), 1);
/// assert_eq!(gender_code(Some("nonbinary")), 2);
/// assert_eq!(gender_code(None), 2);
/// ```
#[must_use]
pub fn gender_code(gender: Option<&str>) -> u8 {
    match gender.map(str::to_lowercase).as_deref() {
        Some("male") => GENDER_MALE,
        Some("female") => GENDER_FEMALE,
        _ => GENDER_OTHER,
    }
}

/// Renders a date of birth as `yyyy/MM/dd`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use random_user_export::format_dob;
///
/// let dob = Utc.with_ymd_and_hms(1987, 3, 9, 18, 30, 0).single().expect("valid");
/// assert_eq!(format_dob(&dob), "1987/03/09");
/// ```
#[must_use]
pub fn format_dob(date_of_birth: &DateTime<Utc>) -> String {
    date_of_birth.format("%Y/%m/%d").to_string()
}

/// Whole calendar years between `date_of_birth` and `today`.
///
/// One year is subtracted when the birthday has not yet come round this year.
/// A 29 February birthday is reached on 1 March in non-leap years. Dates of
/// birth after `today` yield 0.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use random_user_export::calculate_age;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid");
/// let on_birthday = NaiveDate::from_ymd_opt(2000, 6, 15).expect("valid");
/// let day_before = NaiveDate::from_ymd_opt(2000, 6, 16).expect("valid");
///
/// assert_eq!(calculate_age(on_birthday, today), 24);
/// assert_eq!(calculate_age(day_before, today), 23);
/// ```
#[must_use]
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let Ok(years) = u32::try_from(today.year() - date_of_birth.year()) else {
        return 0;
    };
    let last_anniversary = today.checked_sub_months(Months::new(years.saturating_mul(12)));
    match last_anniversary {
        Some(anniversary) if date_of_birth > anniversary => years.saturating_sub(1),
        _ => years,
    }
}
