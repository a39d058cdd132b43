use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Expected length of a normalized `Contact No.`
pub const MOBILE_NUMBER_LEN: usize = 11;

/// How rows with a malformed `Contact No.` are treated
///
/// Both behaviours shipped at different times; which one production should
/// use is still open, so the choice is left to configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionPolicy {
    /// Drop rows whose contact number is not exactly 11 characters
    #[default]
    Strict,
    /// Keep every row, only count the malformed ones
    Permissive,
}

impl fmt::Display for AdmissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}

impl FromStr for AdmissionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!(
                "unknown admission policy '{}' (expected 'strict' or 'permissive')",
                other
            )),
        }
    }
}

/// Counters collected while an upload moves through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Policy the counts were produced under
    pub policy: AdmissionPolicy,
    /// Data rows read from the upload
    pub input_rows: usize,
    /// Rows dropped for a bad contact length (strict only)
    pub invalid_length_removed: usize,
    /// Rows kept despite a bad contact length (permissive only)
    pub invalid_length_flagged: usize,
    /// Rows dropped because their account number was already seen
    pub duplicates_removed: usize,
    /// Data rows in the output, template row excluded
    pub output_rows: usize,
    /// No data rows survived
    pub empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message the front end shows alongside the summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: String) -> Self {
        Self {
            level: NoticeLevel::Info,
            message,
        }
    }

    fn warning(message: String) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message,
        }
    }
}

impl Diagnostics {
    /// User-facing messages for every non-zero counter
    pub fn notices(&self) -> Vec<Notice> {
        let mut notices = Vec::new();

        if self.invalid_length_removed > 0 {
            notices.push(Notice::info(format!(
                "Removed {} rows where Contact No. is not exactly {} digits.",
                self.invalid_length_removed, MOBILE_NUMBER_LEN
            )));
        }
        if self.invalid_length_flagged > 0 {
            notices.push(Notice::info(format!(
                "Flagged {} rows where Contact No. is not exactly {} digits.",
                self.invalid_length_flagged, MOBILE_NUMBER_LEN
            )));
        }
        if self.duplicates_removed > 0 {
            notices.push(Notice::info(format!(
                "Removed {} duplicate rows based on 'Account No.'.",
                self.duplicates_removed
            )));
        }
        if self.empty {
            notices.push(Notice::warning(
                "No rows remain after filtering. Showing sample data only.".to_string(),
            ));
        }

        notices
    }
}
