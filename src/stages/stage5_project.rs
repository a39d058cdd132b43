use crate::models::{ColumnMap, InputRecord, OutputRecord, OutputTable};

/// Perform Stage 5: map surviving rows onto the blast template
///
/// Row order is preserved and the blank template row is always appended,
/// even when no data rows remain.
pub fn project_rows(rows: &[InputRecord], columns: &ColumnMap) -> OutputTable {
    let records = rows
        .iter()
        .map(|row| {
            OutputRecord::from_parts(
                row.cell(columns.client),
                row.cell(columns.account_no),
                row.cell(columns.debtor_name),
                row.cell(columns.contact_no),
            )
        })
        .collect();

    OutputTable::from_data_rows(records)
}
