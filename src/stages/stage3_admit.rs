use crate::models::{AdmissionPolicy, ColumnMap, InputRecord, MOBILE_NUMBER_LEN};

/// Result of Stage 3 admission
#[derive(Debug, Clone, Default)]
pub struct AdmissionOutcome {
    /// Rows removed for a bad contact length (strict)
    pub removed: usize,
    /// Rows kept despite a bad contact length (permissive)
    pub flagged: usize,
}

/// Whether a normalized contact number has the expected length in characters
pub fn has_valid_contact_len(contact: &str) -> bool {
    contact.chars().count() == MOBILE_NUMBER_LEN
}

/// Perform Stage 3: apply the admission policy to the contact number length
pub fn admit_rows(
    rows: &mut Vec<InputRecord>,
    columns: &ColumnMap,
    policy: AdmissionPolicy,
) -> AdmissionOutcome {
    match policy {
        AdmissionPolicy::Strict => {
            let before = rows.len();
            rows.retain(|row| has_valid_contact_len(row.cell(columns.contact_no)));
            AdmissionOutcome {
                removed: before - rows.len(),
                flagged: 0,
            }
        }
        AdmissionPolicy::Permissive => AdmissionOutcome {
            removed: 0,
            flagged: rows
                .iter()
                .filter(|row| !has_valid_contact_len(row.cell(columns.contact_no)))
                .count(),
        },
    }
}
