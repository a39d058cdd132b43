use crate::models::{ColumnMap, InputTable};

/// Placeholder a spreadsheet export leaves in empty identifier cells
pub const MISSING_VALUE_MARKER: &str = "nan";

/// Trim an identifier and blank out the missing-value marker
///
/// The marker comparison is exact and runs after trimming, so `" nan "`
/// becomes empty while `"NaN"` is kept.
pub fn clean_identifier(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed == MISSING_VALUE_MARKER {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Perform Stage 2: normalize `Contact No.` and `Account No.` on every row
pub fn clean_fields(table: &mut InputTable, columns: &ColumnMap) {
    for row in &mut table.rows {
        for index in [columns.contact_no, columns.account_no] {
            let cleaned = clean_identifier(row.cell(index));
            row.set_cell(index, cleaned);
        }
    }
}
