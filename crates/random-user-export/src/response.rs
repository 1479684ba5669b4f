//! Decoding of random-user API response bodies.
//!
//! The body is decoded into transport DTOs first, then mapped into
//! [`RawUser`] records in one pass.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ParseError;
use crate::model::{RawUser, Sample};

#[derive(Debug, Deserialize)]
struct RandomUserResponseDto {
    results: Option<Vec<UserDto>>,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    gender: Option<String>,
    name: Option<NameDto>,
    email: Option<String>,
    login: Option<LoginDto>,
    dob: Option<DobDto>,
    nat: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NameDto {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct LoginDto {
    username: String,
}

#[derive(Debug, Deserialize)]
struct DobDto {
    date: DateTime<Utc>,
}

impl UserDto {
    fn into_raw_user(self, index: usize) -> Result<RawUser, ParseError> {
        let missing = |field| ParseError::MissingField { index, field };
        let name = self.name.ok_or_else(|| missing("name"))?;
        let login = self.login.ok_or_else(|| missing("login"))?;
        let dob = self.dob.ok_or_else(|| missing("dob"))?;

        Ok(RawUser {
            gender: self.gender,
            first_name: name.first,
            last_name: name.last,
            email: self.email.unwrap_or_default(),
            username: login.username,
            date_of_birth: dob.date,
            nationality: self.nat,
        })
    }
}

/// Decodes an API response body into a sample.
///
/// Returns `Ok(None)` when the body is well formed but carries no users: a
/// JSON `null` body, or a `results` member that is missing, `null`, or empty.
///
/// # Errors
///
/// Returns [`ParseError::Json`] when the body is not valid JSON or does not
/// match the expected shape, and [`ParseError::MissingField`] when a user
/// lacks its `name`, `login` or `dob` section.
///
/// # Example
///
/// ```
/// use random_user_export::parse_sample;
///
/// assert_eq!(parse_sample(r#"{"results": []}"#), Ok(None));
/// assert!(parse_sample("not json").is_err());
/// ```
pub fn parse_sample(body: &str) -> Result<Option<Sample>, ParseError> {
    let decoded: Option<RandomUserResponseDto> =
        serde_json::from_str(body).map_err(|err| ParseError::Json {
            message: err.to_string(),
        })?;

    let Some(users) = decoded.and_then(|response| response.results) else {
        return Ok(None);
    };
    if users.is_empty() {
        return Ok(None);
    }

    users
        .into_iter()
        .enumerate()
        .map(|(index, user)| user.into_raw_user(index))
        .collect::<Result<Sample, _>>()
        .map(Some)
}
