//! CSV output for transformed records.
//!
//! Rows are comma-joined without quoting or escaping, so a comma inside a
//! name or email shifts that row's columns. The destination directory must
//! already exist; an existing file is overwritten.

use std::io::{self, BufWriter, Write};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use mockable::Env;

use crate::error::ExportError;
use crate::model::OutputRecord;

/// Header line of every exported file.
pub const CSV_HEADER: &str = "ID,FirstName,LastName,Gender,Email,Username,DOB,Age";

/// Default name of the exported file.
pub const DEFAULT_FILE_NAME: &str = "Dunford_Curtis_users.csv";

const DOWNLOADS_DIR: &str = "Downloads";
const HOME_VARIABLES: [&str; 2] = ["HOME", "USERPROFILE"];

/// Directory and file name the CSV is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    directory: Utf8PathBuf,
    file_name: String,
}

impl Destination {
    /// Creates a destination from a directory and a plain file name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidFileName`] when `file_name` is empty or
    /// contains path separators.
    ///
    /// # Example
    ///
    /// ```
    /// use random_user_export::Destination;
    ///
    /// let destination = Destination::new("/tmp/exports", "users.csv").expect("valid");
    /// assert_eq!(destination.path().as_str(), "/tmp/exports/users.csv");
    /// assert!(Destination::new("/tmp", "../users.csv").is_err());
    /// ```
    pub fn new(
        directory: impl Into<Utf8PathBuf>,
        file_name: &str,
    ) -> Result<Self, ExportError> {
        let mut components = Utf8Path::new(file_name).components();
        let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next())
        else {
            return Err(ExportError::InvalidFileName {
                file_name: file_name.to_owned(),
            });
        };
        Ok(Self {
            directory: directory.into(),
            file_name: name.to_owned(),
        })
    }

    /// Directory the file is written into.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Full path of the output file.
    #[must_use]
    pub fn path(&self) -> Utf8PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Resolves the user's home directory from `HOME`, falling back to
/// `USERPROFILE`.
///
/// # Errors
///
/// Returns [`ExportError::HomeDirectoryUnavailable`] when neither variable
/// holds a non-empty value.
pub fn home_directory<E: Env>(env: &E) -> Result<Utf8PathBuf, ExportError> {
    HOME_VARIABLES
        .iter()
        .filter_map(|name| env.string(name))
        .find(|value| !value.trim().is_empty())
        .map(Utf8PathBuf::from)
        .ok_or(ExportError::HomeDirectoryUnavailable)
}

/// Destination `<home>/Downloads/<file_name>`.
///
/// # Errors
///
/// Returns [`ExportError`] when the home directory cannot be resolved or the
/// file name is not a plain file name.
pub fn downloads_destination<E: Env>(
    env: &E,
    file_name: &str,
) -> Result<Destination, ExportError> {
    let home = home_directory(env)?;
    Destination::new(home.join(DOWNLOADS_DIR), file_name)
}

/// Writes the header and one line per record to `out`.
///
/// # Errors
///
/// Propagates any I/O error from `out`.
///
/// # Example
///
/// ```
/// use random_user_export::{OutputRecord, render_csv};
///
/// let record = OutputRecord {
///     id: 4_242_424,
///     first_name: "Ada".to_owned(),
///     last_name: "Byron".to_owned(),
///     gender: 1,
///     email: "ada@example.com".to_owned(),
///     username: "ada".to_owned(),
///     date_of_birth: "1815/12/10".to_owned(),
///     age: 36,
/// };
/// let mut out = Vec::new();
/// render_csv(&[record], &mut out).expect("in-memory write");
///
/// assert_eq!(
///     String::from_utf8(out).expect("utf-8"),
///     "ID,FirstName,LastName,Gender,Email,Username,DOB,Age\n\
///      4242424,Ada,Byron,1,ada@example.com,ada,1815/12/10,36\n"
/// );
/// ```
pub fn render_csv<W: Write>(records: &[OutputRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            record.id,
            record.first_name,
            record.last_name,
            record.gender,
            record.email,
            record.username,
            record.date_of_birth,
            record.age
        )?;
    }
    out.flush()
}

/// Creates or overwrites the destination file with the rendered CSV.
///
/// A failure part-way through leaves a partially written file behind.
///
/// # Errors
///
/// Returns [`ExportError::Write`] when the directory cannot be opened or the
/// file cannot be created or written.
pub fn write_csv(records: &[OutputRecord], destination: &Destination) -> Result<(), ExportError> {
    let path = destination.path();
    let write_error = |err: io::Error| ExportError::Write {
        path: path.clone(),
        message: err.to_string(),
    };

    let dir = Dir::open_ambient_dir(destination.directory(), ambient_authority())
        .map_err(write_error)?;
    let file = dir.create(&destination.file_name).map_err(write_error)?;
    render_csv(records, BufWriter::new(file)).map_err(write_error)
}
