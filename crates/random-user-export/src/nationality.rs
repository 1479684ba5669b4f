//! Nationality distribution checks for a fetched sample.
//!
//! # Acceptance rule
//!
//! - At least [`MIN_DISTINCT_NATIONALITIES`] distinct nationality codes,
//!   compared case-insensitively
//! - No single code held by more than 40% of the sample
//!
//! Users without a nationality are left out of the per-code tally but still
//! count towards the sample size the 40% share is measured against.

use std::collections::BTreeMap;

use crate::model::RawUser;

/// Minimum number of distinct nationality codes an accepted sample carries.
pub const MIN_DISTINCT_NATIONALITIES: usize = 4;

/// Largest accepted share for a single code, as numerator over denominator.
const MAX_SHARE_NUMERATOR: usize = 2;
const MAX_SHARE_DENOMINATOR: usize = 5;

/// Outcome of applying the acceptance rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NationalityVerdict {
    /// The sample satisfies the rule.
    Accepted,
    /// One nationality holds more than 40% of the sample.
    DominantNationality {
        /// Lower-cased nationality code.
        code: String,
        /// Users carrying the code.
        count: usize,
        /// Sample size the share was measured against.
        total: usize,
    },
    /// Too few distinct nationalities were observed.
    TooFewNationalities {
        /// Number of distinct codes observed.
        distinct: usize,
    },
}

impl NationalityVerdict {
    /// Returns `true` for [`NationalityVerdict::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Per-code user counts for one sample.
///
/// # Example
///
/// ```
/// use random_user_export::NationalityDistribution;
///
/// let distribution = NationalityDistribution::from_codes(
///     [Some("GB"), Some("gb"), Some("FR"), None],
/// );
///
/// assert_eq!(distribution.count("gb"), 2);
/// assert_eq!(distribution.distinct(), 2);
/// assert_eq!(distribution.total(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NationalityDistribution {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl NationalityDistribution {
    /// Tallies the nationality codes of a sample.
    #[must_use]
    pub fn from_sample(sample: &[RawUser]) -> Self {
        Self::from_codes(sample.iter().map(|user| user.nationality.as_deref()))
    }

    /// Tallies a sequence of optional codes; `None` entries only add to the
    /// total.
    #[must_use]
    pub fn from_codes<'a, I>(codes: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut distribution = Self::default();
        for code in codes {
            distribution.total += 1;
            if let Some(value) = code {
                *distribution.counts.entry(value.to_lowercase()).or_insert(0) += 1;
            }
        }
        distribution
    }

    /// Number of users carrying `code`, compared case-insensitively.
    #[must_use]
    pub fn count(&self, code: &str) -> usize {
        self.counts.get(&code.to_lowercase()).copied().unwrap_or(0)
    }

    /// Number of distinct codes observed.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sample size, including users without a nationality.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Applies the acceptance rule.
    #[must_use]
    pub fn verdict(&self) -> NationalityVerdict {
        let dominant = self.counts.iter().find(|&(_, &count)| {
            count * MAX_SHARE_DENOMINATOR > self.total * MAX_SHARE_NUMERATOR
        });
        if let Some((code, &count)) = dominant {
            return NationalityVerdict::DominantNationality {
                code: code.clone(),
                count,
                total: self.total,
            };
        }

        if self.distinct() < MIN_DISTINCT_NATIONALITIES {
            return NationalityVerdict::TooFewNationalities {
                distinct: self.distinct(),
            };
        }

        NationalityVerdict::Accepted
    }
}

/// Returns `true` when the sample satisfies the nationality acceptance rule.
///
/// # Example
///
/// ```
/// use random_user_export::{NationalityDistribution, validate_nationalities};
///
/// let distribution = NationalityDistribution::from_codes(
///     [Some("GB"), Some("FR"), Some("DE"), Some("ES")],
/// );
/// assert!(distribution.verdict().is_accepted());
/// assert!(!validate_nationalities(&[]));
/// ```
#[must_use]
pub fn validate_nationalities(sample: &[RawUser]) -> bool {
    NationalityDistribution::from_sample(sample)
        .verdict()
        .is_accepted()
}
