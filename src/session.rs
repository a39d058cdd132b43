use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::io::Upload;
use crate::models::{Notice, OutputTable};
use crate::stages::{PipelineOutput, normalize};

/// What the front end should show for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Nothing uploaded yet: the blank template alone
    Sample(OutputTable),
    /// The upload normalized, with messages to display next to it
    Processed {
        output: PipelineOutput,
        notices: Vec<Notice>,
    },
    /// The upload was rejected as a whole
    Rejected { message: String },
}

impl Summary {
    /// Table offered for download, if any
    ///
    /// An upload with no surviving rows still yields the template row.
    pub fn table(&self) -> Option<&OutputTable> {
        match self {
            Self::Sample(table) => Some(table),
            Self::Processed { output, .. } => Some(&output.table),
            Self::Rejected { .. } => None,
        }
    }
}

/// Holds the upload a user is currently working with
///
/// One session per user; it is passed explicitly to whatever serves the
/// page and owns nothing beyond the current file.
#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    current: Option<Upload>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current upload
    pub fn accept(&mut self, upload: Upload) {
        debug!(
            "Accepted upload {:?} ({} bytes)",
            upload.file_name,
            upload.bytes.len()
        );
        self.current = Some(upload);
    }

    /// Forget the current upload
    pub fn reset(&mut self) {
        if let Some(upload) = self.current.take() {
            debug!("Cleared upload {:?}", upload.file_name);
        }
    }

    pub fn current(&self) -> Option<&Upload> {
        self.current.as_ref()
    }

    /// Run the pipeline over the current upload
    pub fn summarize(&self, config: &PipelineConfig) -> Summary {
        let Some(upload) = &self.current else {
            return Summary::Sample(OutputTable::sample());
        };

        match normalize(&upload.bytes, config) {
            Ok(output) => {
                let notices = output.diagnostics.notices();
                Summary::Processed { output, notices }
            }
            Err(e) => {
                warn!("Rejected upload {:?}: {}", upload.file_name, e);
                Summary::Rejected {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeLevel;

    const GOOD: &[u8] = b"Client,Account No.,Debtor Name,Contact No.\n\
A,001,Smith,09171234567\n\
B,001,Jones,09179876543\n\
C,002,Cruz,0917\n";

    #[test]
    fn test_empty_session_shows_sample() {
        let session = UploadSession::new();
        let summary = session.summarize(&PipelineConfig::default());

        assert_eq!(summary, Summary::Sample(OutputTable::sample()));
        assert_eq!(summary.table().map(OutputTable::len), Some(1));
    }

    #[test]
    fn test_processed_upload_carries_notices() {
        let mut session = UploadSession::new();
        session.accept(Upload::new("accounts.csv", GOOD.to_vec()));

        match session.summarize(&PipelineConfig::default()) {
            Summary::Processed { output, notices } => {
                assert_eq!(output.table.data_len(), 1);
                let messages: Vec<&str> = notices.iter().map(|n| n.message.as_str()).collect();
                assert_eq!(
                    messages,
                    vec![
                        "Removed 1 rows where Contact No. is not exactly 11 digits.",
                        "Removed 1 duplicate rows based on 'Account No.'.",
                    ]
                );
            }
            other => panic!("expected processed summary, got {:?}", other),
        }
    }

    #[test]
    fn test_rejected_upload_has_message() {
        let mut session = UploadSession::new();
        session.accept(Upload::new("bad.csv", b"Client,Account No.\nA,1\n".to_vec()));

        let summary = session.summarize(&PipelineConfig::default());
        assert_eq!(
            summary,
            Summary::Rejected {
                message: "The following required columns are missing: Debtor Name, Contact No."
                    .to_string()
            }
        );
        assert!(summary.table().is_none());
    }

    #[test]
    fn test_empty_result_warns_but_offers_template() {
        let mut session = UploadSession::new();
        session.accept(Upload::new(
            "short.csv",
            b"Client,Account No.,Debtor Name,Contact No.\nA,1,Smith,12\n".to_vec(),
        ));

        let summary = session.summarize(&PipelineConfig::default());
        match &summary {
            Summary::Processed { notices, .. } => {
                assert_eq!(notices.last().map(|n| n.level), Some(NoticeLevel::Warning));
            }
            other => panic!("expected processed summary, got {:?}", other),
        }
        assert_eq!(summary.table(), Some(&OutputTable::sample()));
    }

    #[test]
    fn test_reset_returns_to_sample() {
        let mut session = UploadSession::new();
        session.accept(Upload::new("accounts.csv", GOOD.to_vec()));
        assert!(session.current().is_some());

        session.reset();
        assert!(session.current().is_none());
        assert!(matches!(
            session.summarize(&PipelineConfig::default()),
            Summary::Sample(_)
        ));
    }
}
