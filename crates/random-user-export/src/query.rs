//! Query string assembly for the random-user API.
//!
//! Building is literal string assembly: values are neither validated nor
//! percent-encoded here.

/// Path under the API host that serves user samples.
const API_PATH: &str = "api/";

/// Builds the `results`, `seed` and `inc` query string.
///
/// Parameters are joined with commas; an empty list yields an empty `inc`
/// value.
///
/// # Examples
///
/// ```
/// use random_user_export::build_query;
///
/// assert_eq!(build_query(4, "abc", &[]), "results=4&seed=abc&inc=");
///
/// let parameters = vec!["name".to_owned(), "nat".to_owned()];
/// assert_eq!(
///     build_query(10, "foo", &parameters),
///     "results=10&seed=foo&inc=name,nat"
/// );
/// ```
#[must_use]
pub fn build_query(count: u32, seed: &str, parameters: &[String]) -> String {
    let inclusions = parameters.join(",");
    format!("results={count}&seed={seed}&inc={inclusions}")
}

/// Combines a base endpoint with a query built by [`build_query`].
///
/// A missing trailing slash on `base` is tolerated.
///
/// # Examples
///
/// ```
/// use random_user_export::request_target;
///
/// assert_eq!(
///     request_target("https://randomuser.me/", "results=1&seed=a&inc="),
///     "https://randomuser.me/api/?results=1&seed=a&inc="
/// );
/// assert_eq!(
///     request_target("http://127.0.0.1:8080", "results=1&seed=a&inc="),
///     "http://127.0.0.1:8080/api/?results=1&seed=a&inc="
/// );
/// ```
#[must_use]
pub fn request_target(base: &str, query: &str) -> String {
    let separator = if base.ends_with('/') { "" } else { "/" };
    format!("{base}{separator}{API_PATH}?{query}")
}
