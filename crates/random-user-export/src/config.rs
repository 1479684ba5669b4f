//! Export settings loaded via OrthoConfig.
//!
//! Values layer defaults, configuration files, `RANDOM_USER_*` environment
//! variables and command-line flags. The interactive answers (count, seed and
//! field parameters) are always prompted for and never configured here.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::client::{DEFAULT_BASE_URL, RandomUserClient};
use crate::error::{ExportError, FetchError};
use crate::export::{DEFAULT_FILE_NAME, Destination, downloads_destination};

/// Configuration for one export run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RANDOM_USER")]
pub struct ExportSettings {
    /// Random-user API host.
    #[ortho_config(default = DEFAULT_BASE_URL.to_owned())]
    pub base_url: String,
    /// Directory the CSV is written into; defaults to `<home>/Downloads`.
    pub output_dir: Option<PathBuf>,
    /// Name of the CSV file.
    pub file_name: Option<String>,
}

impl ExportSettings {
    /// Return the configured file name, falling back to the default.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    /// Build the API client for the configured host.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] when `base_url` is not an
    /// absolute URL.
    pub fn client(&self) -> Result<RandomUserClient, FetchError> {
        RandomUserClient::new(&self.base_url)
    }

    /// Resolve where the CSV is written.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the configured directory is not UTF-8,
    /// the home directory cannot be resolved, or the file name is not a
    /// plain file name.
    pub fn destination<E: Env>(&self, env: &E) -> Result<Destination, ExportError> {
        match &self.output_dir {
            Some(dir) => {
                let directory = Utf8PathBuf::from_path_buf(dir.clone()).map_err(|path| {
                    ExportError::NonUtf8Path {
                        path: path.to_string_lossy().into_owned(),
                    }
                })?;
                Destination::new(directory, self.file_name())
            }
            None => downloads_destination(env, self.file_name()),
        }
    }
}
