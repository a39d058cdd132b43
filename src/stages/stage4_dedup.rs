use std::collections::HashSet;

use crate::models::{ColumnMap, InputRecord};

/// Perform Stage 4: keep the first row for each `Account No.`
///
/// Returns the number of rows removed. Empty account numbers are a key
/// like any other, so only the first blank-account row survives.
pub fn dedup_accounts(rows: &mut Vec<InputRecord>, columns: &ColumnMap) -> usize {
    let before = rows.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    rows.retain(|row| seen.insert(row.cell(columns.account_no).to_string()));
    before - rows.len()
}
