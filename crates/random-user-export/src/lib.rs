//! Interactive export of random-user API samples to a flat CSV file.
//!
//! The crate models a short, strictly sequential pipeline:
//!
//! - Prompt for a record count, a seed, and optional field-inclusion
//!   parameters
//! - Build the query string and fetch one page from the random-user API
//! - Decode the JSON body into a [`Sample`]
//! - Check the nationality distribution of the sample
//! - Flatten each user into an [`OutputRecord`] and write the CSV file
//!
//! External inputs (the HTTP source, the random source for identifiers, the
//! clock used for age derivation, and the environment used to locate the
//! Downloads folder) are injected so each stage can be exercised in tests.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use random_user_export::{build_query, parse_sample, transform, validate_nationalities};
//!
//! assert_eq!(build_query(4, "abc", &[]), "results=4&seed=abc&inc=");
//!
//! let body = r#"{"results": [
//!     {"gender": "male", "name": {"first": "Ada", "last": "Byron"},
//!      "email": "ada@example.com", "login": {"username": "ada"},
//!      "dob": {"date": "2000-06-15T10:00:00.000Z"}, "nat": "GB"}
//! ]}"#;
//! let sample = parse_sample(body).expect("valid body").expect("non-empty sample");
//! assert!(!validate_nationalities(&sample));
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");
//! let records = transform(&sample, &mut StdRng::seed_from_u64(7), today);
//! assert_eq!(records.first().map(|record| record.age), Some(24));
//! ```

pub mod client;
pub mod config;
mod error;
pub mod export;
mod model;
pub mod nationality;
pub mod pipeline;
pub mod prompt;
mod query;
mod response;
pub mod transform;

pub use client::{RandomUserClient, UserSource};
pub use config::ExportSettings;
pub use error::{ExportError, FetchError, ParseError, PipelineError, PromptError};
pub use export::{CSV_HEADER, Destination, render_csv, write_csv};
pub use model::{OutputRecord, RawUser, Sample};
pub use nationality::{NationalityDistribution, NationalityVerdict, validate_nationalities};
pub use pipeline::{RunOutcome, UserRequest, collect_request, export_users};
pub use prompt::Prompter;
pub use query::{build_query, request_target};
pub use response::parse_sample;
pub use transform::{calculate_age, format_dob, gender_code, transform};
