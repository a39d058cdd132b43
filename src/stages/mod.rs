pub mod stage0_parse;
pub mod stage1_schema;
pub mod stage2_clean;
pub mod stage3_admit;
pub mod stage4_dedup;
pub mod stage5_project;

pub use stage0_parse::*;
pub use stage1_schema::*;
pub use stage2_clean::*;
pub use stage3_admit::*;
pub use stage4_dedup::*;
pub use stage5_project::*;

use crate::config::PipelineConfig;
use crate::error::ValidationError;
use crate::models::{Diagnostics, OutputTable};

/// A normalized upload ready for export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Template rows, blank row last
    pub table: OutputTable,
    pub diagnostics: Diagnostics,
}

/// Run the whole normalization pipeline over raw upload bytes
///
/// Stages, in order:
/// 0. Parse the bytes as a CSV table with a header row
/// 1. Check the required columns are present
/// 2. Trim `Contact No.` / `Account No.` and blank out "nan"
/// 3. Apply the contact-length admission policy
/// 4. Drop repeated `Account No.` values, first one wins
/// 5. Project onto the template and append the blank row
///
/// Nothing is logged here; callers report from the returned diagnostics.
pub fn normalize(raw: &[u8], config: &PipelineConfig) -> Result<PipelineOutput, ValidationError> {
    let mut table = parse_table(raw)?;
    let columns = check_schema(&table)?;

    clean_fields(&mut table, &columns);

    let input_rows = table.len();
    let admission = admit_rows(&mut table.rows, &columns, config.admission);
    let duplicates_removed = dedup_accounts(&mut table.rows, &columns);

    let output = project_rows(&table.rows, &columns);

    let diagnostics = Diagnostics {
        policy: config.admission,
        input_rows,
        invalid_length_removed: admission.removed,
        invalid_length_flagged: admission.flagged,
        duplicates_removed,
        output_rows: output.data_len(),
        empty: output.data_len() == 0,
    };

    Ok(PipelineOutput {
        table: output,
        diagnostics,
    })
}
