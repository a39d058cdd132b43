use crate::error::ValidationError;
use crate::models::{
    ACCOUNT_NO, CLIENT, CONTACT_NO, ColumnMap, DEBTOR_NAME, InputTable, REQUIRED_COLUMNS,
};

/// Perform Stage 1: confirm every required column is present
///
/// Missing names are reported in the order of [`REQUIRED_COLUMNS`], not the
/// order of the upload's header.
pub fn check_schema(table: &InputTable) -> Result<ColumnMap, ValidationError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();

    match (
        table.column_index(CLIENT),
        table.column_index(ACCOUNT_NO),
        table.column_index(DEBTOR_NAME),
        table.column_index(CONTACT_NO),
    ) {
        (Some(client), Some(account_no), Some(debtor_name), Some(contact_no)) => Ok(ColumnMap {
            client,
            account_no,
            debtor_name,
            contact_no,
        }),
        _ => Err(ValidationError::MissingColumns(missing)),
    }
}
