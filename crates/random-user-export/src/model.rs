//! Domain records flowing through the export pipeline.
//!
//! [`RawUser`] is what the response decoder produces; [`OutputRecord`] is one
//! CSV row. Neither type knows about JSON or CSV layout.

use chrono::{DateTime, Utc};

/// One user as returned by the random-user API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUser {
    /// Gender as reported by the API (`"male"`, `"female"`, or anything else).
    pub gender: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address; empty when the API omitted it.
    pub email: String,
    /// Login username.
    pub username: String,
    /// Date and time of birth.
    pub date_of_birth: DateTime<Utc>,
    /// Nationality code such as `"GB"`, when present.
    pub nationality: Option<String>,
}

/// All users fetched for a single run.
pub type Sample = Vec<RawUser>;

/// One flattened CSV row.
///
/// # Example
///
/// ```
/// use random_user_export::OutputRecord;
///
/// let record = OutputRecord {
///     id: 12_345_678,
///     first_name: "Ada".to_owned(),
///     last_name: "Byron".to_owned(),
///     gender: 1,
///     email: "ada@example.com".to_owned(),
///     username: "ada".to_owned(),
///     date_of_birth: "1815/12/10".to_owned(),
///     age: 36,
/// };
///
/// assert_eq!(record.gender, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Random identifier in `[1_000_000, 100_000_000)`; not guaranteed unique.
    pub id: u32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Gender code: 0 male, 1 female, 2 other or unknown.
    pub gender: u8,
    /// Email address.
    pub email: String,
    /// Login username.
    pub username: String,
    /// Date of birth rendered as `yyyy/MM/dd`.
    pub date_of_birth: String,
    /// Whole years between the date of birth and the run date.
    pub age: u32,
}
