use thiserror::Error;

/// Reasons an upload is rejected as a whole.
///
/// Row-level problems (bad contact length, duplicate accounts) are never
/// reported here; they are counted in [`crate::models::Diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The bytes could not be read as a delimited table with a header row
    #[error("An error occurred while processing the file: {0}")]
    Parse(String),

    /// One or more required columns are absent, in required-list order
    #[error("The following required columns are missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

impl ValidationError {
    /// Names of the missing columns, if this is a schema failure
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            Self::MissingColumns(names) => Some(names),
            Self::Parse(_) => None,
        }
    }
}
