//! JSON persistence of the fitted model.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::model::Model;

const HINT: &str = "hint: try to (re)train the model with the `train` command";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read `{path}`; {}", HINT)]
    Read { path: PathBuf, source: io::Error },

    #[error("`{path}` is not a valid model record; {}", HINT)]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("`{field}` is missing in `{path}`; {}", HINT)]
    MissingField { path: PathBuf, field: &'static str },

    #[error("invalid `{field}` value in `{path}`; {}", HINT)]
    InvalidField { path: PathBuf, field: &'static str },

    #[error("refusing to save a non-finite `{field}` into `{path}`")]
    NonFinite { path: PathBuf, field: &'static str },

    #[error("failed to save the model to `{path}`")]
    Write { path: PathBuf, source: io::Error },
}

/// Model record stored as a single JSON file, replaced wholesale on every save.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[tracing::instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Model, ModelError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| ModelError::Read {
            path: self.path.clone(),
            source,
        })?;
        let record: Map<String, Value> =
            serde_json::from_str(&contents).map_err(|source| ModelError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        let model = Model {
            theta0: self.parse_field(&record, "theta0")?,
            theta1: self.parse_field(&record, "theta1")?,
        };
        tracing::debug!(model.theta0, model.theta1, "loaded");
        Ok(model)
    }

    /// Writes the model into a temporary file next to the target and renames it over the target,
    /// so that a failed save leaves the previous record intact.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, model: &Model) -> Result<(), ModelError> {
        for (field, value) in [("theta0", model.theta0), ("theta1", model.theta1)] {
            if !value.is_finite() {
                return Err(ModelError::NonFinite {
                    path: self.path.clone(),
                    field,
                });
            }
        }
        self.write(model).map_err(|source| ModelError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, model: &Model) -> io::Result<()> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(directory)?;
        serde_json::to_writer(&mut file, model)?;
        file.flush()?;
        file.as_file().sync_all()?;
        #[cfg(unix)]
        file.as_file().set_permissions(self.permissions())?;
        file.persist(&self.path).map_err(|error| error.error)?;
        Ok(())
    }

    /// Keeps the mode of the record being replaced, otherwise `rw-r--r--`
    /// instead of the owner-only mode of temporary files.
    #[cfg(unix)]
    fn permissions(&self) -> fs::Permissions {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(&self.path)
            .map_or_else(|_| fs::Permissions::from_mode(0o644), |metadata| metadata.permissions())
    }

    /// Accepts JSON numbers and numeric strings, as long as they are finite.
    fn parse_field(
        &self,
        record: &Map<String, Value>,
        field: &'static str,
    ) -> Result<f64, ModelError> {
        let value = record.get(field).ok_or_else(|| ModelError::MissingField {
            path: self.path.clone(),
            field,
        })?;
        let number = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(string) => string.trim().parse().ok(),
            _ => None,
        };
        number
            .filter(|number| number.is_finite())
            .ok_or_else(|| ModelError::InvalidField {
                path: self.path.clone(),
                field,
            })
    }
}
