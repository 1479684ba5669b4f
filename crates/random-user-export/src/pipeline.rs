//! End-to-end export flow.
//!
//! [`collect_request`] gathers the interactive answers; [`export_users`] runs
//! query → fetch → parse → validate → transform → write. Stages run strictly
//! in order and the CSV file is only touched once every earlier stage has
//! succeeded.

use std::io::{BufRead, Write};

use mockable::Clock;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::client::UserSource;
use crate::error::{PipelineError, PromptError};
use crate::export::{Destination, write_csv};
use crate::nationality::{NationalityDistribution, NationalityVerdict};
use crate::prompt::Prompter;
use crate::query::build_query;
use crate::response::parse_sample;
use crate::transform::transform;

/// Interactive answers describing what to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    /// Number of users to request.
    pub count: u32,
    /// API seed.
    pub seed: String,
    /// Field-inclusion parameters, in the order given.
    pub parameters: Vec<String>,
}

impl UserRequest {
    /// Query string for this request.
    #[must_use]
    pub fn query(&self) -> String {
        build_query(self.count, &self.seed, &self.parameters)
    }
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The CSV file was written.
    Written {
        /// Destination file.
        destination: Destination,
        /// Number of data rows written, excluding the header.
        rows: usize,
    },
    /// The API answered without any users.
    NoResults,
    /// The sample failed the nationality acceptance rule.
    NationalityRejected(NationalityVerdict),
}

impl RunOutcome {
    /// Line printed to the terminal when the run ends this way.
    ///
    /// # Example
    ///
    /// ```
    /// use random_user_export::RunOutcome;
    ///
    /// assert_eq!(
    ///     RunOutcome::NoResults.message(),
    ///     "Failed to fetch or deserialize users."
    /// );
    /// ```
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Written { .. } => "CSV file created successfully.",
            Self::NoResults => "Failed to fetch or deserialize users.",
            Self::NationalityRejected(_) => {
                "The number of nationalities is not four or one of them has a 40% or higher occurrence rate."
            }
        }
    }
}

/// Prompts for the count, the seed and the field parameters, in that order.
///
/// # Errors
///
/// Returns [`PromptError`] when the terminal closes or fails.
pub fn collect_request<R, W>(prompter: &mut Prompter<R, W>) -> Result<UserRequest, PromptError>
where
    R: BufRead,
    W: Write,
{
    let count = prompter.collect_count()?;
    let seed = prompter.collect_seed()?;
    let parameters = prompter.collect_parameters()?;
    Ok(UserRequest {
        count,
        seed,
        parameters,
    })
}

/// Fetches, checks and writes the users described by `request`.
///
/// `clock` supplies the local date ages are computed against and `rng`
/// supplies row identifiers.
///
/// # Errors
///
/// Returns [`PipelineError`] when the request fails, the body cannot be
/// decoded, or the CSV file cannot be written. An empty response and a
/// rejected sample are reported through [`RunOutcome`] instead.
pub async fn export_users<S, G>(
    request: &UserRequest,
    source: &S,
    clock: &dyn Clock,
    rng: &mut G,
    destination: &Destination,
) -> Result<RunOutcome, PipelineError>
where
    S: UserSource + ?Sized,
    G: Rng + ?Sized,
{
    let query = request.query();
    info!(query = %query, "fetching random users");
    let body = source.fetch(&query).await?;
    debug!(body = %body, "API response");

    let Some(sample) = parse_sample(&body)? else {
        warn!(query = %query, "API response contained no users");
        return Ok(RunOutcome::NoResults);
    };
    info!(
        requested = request.count,
        received = sample.len(),
        "decoded random users"
    );

    let verdict = NationalityDistribution::from_sample(&sample).verdict();
    if !verdict.is_accepted() {
        warn!(verdict = ?verdict, "sample rejected by nationality rule");
        return Ok(RunOutcome::NationalityRejected(verdict));
    }

    let today = clock.local().date_naive();
    let records = transform(&sample, rng, today);
    write_csv(&records, destination)?;
    info!(
        path = %destination.path(),
        rows = records.len(),
        "CSV file written"
    );

    Ok(RunOutcome::Written {
        destination: destination.clone(),
        rows: records.len(),
    })
}
