use serde::{Deserialize, Serialize};

pub const CLIENT: &str = "Client";
pub const ACCOUNT_NO: &str = "Account No.";
pub const DEBTOR_NAME: &str = "Debtor Name";
pub const CONTACT_NO: &str = "Contact No.";

/// Columns every upload must carry, in the order they are reported when missing
pub const REQUIRED_COLUMNS: [&str; 4] = [CLIENT, ACCOUNT_NO, DEBTOR_NAME, CONTACT_NO];

/// Header of the blast template, in output order
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "Campaign",
    "CH Code",
    "First Name",
    "Full Name",
    "Last Name",
    "Mobile Number",
    "OB",
];

/// Output columns that must stay text in every rendering
pub const TEXT_COLUMNS: [&str; 2] = ["CH Code", "Mobile Number"];

/// One uploaded row; cells are addressed through the owning [`InputTable`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputRecord {
    pub cells: Vec<String>,
}

impl InputRecord {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at a column index, empty when the row was short
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn set_cell(&mut self, index: usize, value: String) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, String::new());
        }
        self.cells[index] = value;
    }
}

/// Parsed upload: a fixed header plus rows in file order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputTable {
    /// Observed column names, unique within the table
    pub columns: Vec<String>,
    pub rows: Vec<InputRecord>,
}

impl InputTable {
    /// Index of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Positions of the required columns inside an [`InputTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub client: usize,
    pub account_no: usize,
    pub debtor_name: usize,
    pub contact_no: usize,
}

/// One row of the blast template
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Campaign")]
    pub campaign: String,
    #[serde(rename = "CH Code")]
    pub ch_code: String,
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Mobile Number")]
    pub mobile_number: String,
    #[serde(rename = "OB")]
    pub ob: String,
}

impl OutputRecord {
    /// The placeholder row appended to every table
    pub fn blank() -> Self {
        Self::default()
    }

    /// Build a data row; `First Name`, `Last Name` and `OB` stay empty
    pub fn from_parts(campaign: &str, ch_code: &str, full_name: &str, mobile_number: &str) -> Self {
        Self {
            campaign: campaign.to_string(),
            ch_code: ch_code.to_string(),
            full_name: full_name.to_string(),
            mobile_number: mobile_number.to_string(),
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|f| f.is_empty())
    }

    /// Field values in [`OUTPUT_COLUMNS`] order
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.campaign,
            &self.ch_code,
            &self.first_name,
            &self.full_name,
            &self.last_name,
            &self.mobile_number,
            &self.ob,
        ]
    }
}

/// Finished template: data rows followed by exactly one blank row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    records: Vec<OutputRecord>,
}

impl OutputTable {
    /// Seal data rows into a table by appending the template row
    pub fn from_data_rows(mut rows: Vec<OutputRecord>) -> Self {
        rows.push(OutputRecord::blank());
        Self { records: rows }
    }

    /// Table with no data rows, shown when nothing has been uploaded
    pub fn sample() -> Self {
        Self::from_data_rows(Vec::new())
    }

    /// All records, template row included
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    /// Records before the template row
    pub fn data_rows(&self) -> &[OutputRecord] {
        &self.records[..self.records.len() - 1]
    }

    pub fn template_row(&self) -> &OutputRecord {
        &self.records[self.records.len() - 1]
    }

    /// Total number of records, template row included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn data_len(&self) -> usize {
        self.records.len() - 1
    }
}
