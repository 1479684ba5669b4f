//! Error types for the random-user export pipeline.
//!
//! Each pipeline stage owns one semantic error enum. Malformed terminal input
//! is not an error (the prompter re-asks), and neither are the "no results"
//! and "nationality rejected" outcomes, which are reported through
//! [`crate::RunOutcome`].

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while reading answers from the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The input stream ended before a valid answer was supplied.
    #[error("input closed before a valid answer was given")]
    InputClosed,

    /// Reading from or writing to the terminal failed.
    #[error("terminal I/O failed: {message}")]
    Io {
        /// Description of the I/O error.
        message: String,
    },
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Transport-level failures from the random-user API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The configured base endpoint is not a usable URL.
    #[error("invalid API endpoint '{endpoint}': {message}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Parser error message.
        message: String,
    },

    /// The request could not be sent or the body could not be read.
    #[error("{message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The API answered with a non-success status.
    #[error("response status code does not indicate success: {status}{body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Compact preview of the response body, prefixed with `": "` when
        /// non-empty.
        body: String,
    },
}

/// Failures decoding the API response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The body is not valid JSON or does not match the expected shape.
    #[error("{message}")]
    Json {
        /// Decoder error message.
        message: String,
    },

    /// A user object is missing a required section.
    #[error("user at index {index} is missing '{field}'")]
    MissingField {
        /// Position of the user within the `results` array.
        index: usize,
        /// Name of the missing JSON property.
        field: &'static str,
    },
}

/// Failures resolving the destination or writing the CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("cannot resolve the home directory: neither HOME nor USERPROFILE is set")]
    HomeDirectoryUnavailable,

    /// A configured directory is not valid UTF-8.
    #[error("output directory is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the rejected path.
        path: String,
    },

    /// The output file name is not a single path component.
    #[error("output file name must be a plain file name: '{file_name}'")]
    InvalidFileName {
        /// Rejected file name.
        file_name: String,
    },

    /// The CSV file could not be created or written.
    #[error("failed to write CSV file at '{path}': {message}")]
    Write {
        /// Destination path.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}

/// Errors that abort a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Settings could not be loaded.
    #[error("failed to load settings: {message}")]
    Settings {
        /// Loader error message.
        message: String,
    },

    /// Reading the interactive answers failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The API request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The API response could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The CSV file could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// Terminal message for failures that end the run normally.
    ///
    /// Request and decoding failures are reported on the terminal and the
    /// process still exits successfully; every other failure returns `None`
    /// and is treated as a fatal error by the caller. A malformed API host is
    /// a configuration problem, not a request failure.
    #[must_use]
    pub fn report_line(&self) -> Option<String> {
        match self {
            Self::Fetch(FetchError::InvalidEndpoint { .. }) => None,
            Self::Fetch(err) => Some(format!("Request error: {err}")),
            Self::Parse(err) => Some(format!("JSON deserialization error: {err}")),
            Self::Settings { .. } | Self::Prompt(_) | Self::Export(_) => None,
        }
    }
}
