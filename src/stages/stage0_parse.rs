use csv::{ReaderBuilder, StringRecord};

use crate::error::ValidationError;
use crate::models::{InputRecord, InputTable};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Perform Stage 0: decode the upload into an [`InputTable`]
///
/// The first non-blank line is the header. Every cell is kept as text so
/// identifiers such as `007` keep their leading zeros. Rows shorter than the
/// header are padded with empty cells; longer rows reject the upload.
pub fn parse_table(raw: &[u8]) -> Result<InputTable, ValidationError> {
    let body = raw.strip_prefix(&UTF8_BOM).unwrap_or(raw);
    let text = std::str::from_utf8(body).map_err(|e| {
        ValidationError::Parse(format!(
            "file is not valid UTF-8 text (invalid byte at position {})",
            e.valid_up_to() + (raw.len() - body.len())
        ))
    })?;

    if let Some(line) = unterminated_quote_line(text) {
        return Err(ValidationError::Parse(format!(
            "EOF inside string starting at line {}",
            line
        )));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ValidationError::Parse(
            "No columns to parse from file".to_string(),
        ));
    }
    let columns = unique_columns(&headers);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        if record.len() > columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(ValidationError::Parse(format!(
                "Expected {} fields in line {}, saw {}",
                columns.len(),
                line,
                record.len()
            )));
        }

        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(columns.len(), String::new());
        rows.push(InputRecord::new(cells));
    }

    Ok(InputTable { columns, rows })
}

/// Line on which a quoted field opens without ever being closed
///
/// The reader is lenient and would fold the rest of the file into that
/// field, so this is checked up front.
fn unterminated_quote_line(text: &str) -> Option<u64> {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        FieldStart,
        Unquoted,
        Quoted,
        QuoteInQuoted,
    }

    let mut state = State::FieldStart;
    let mut line = 1u64;
    let mut opened_at = 0u64;

    for ch in text.chars() {
        state = match (state, ch) {
            (State::FieldStart, '"') => {
                opened_at = line;
                State::Quoted
            }
            (State::Quoted, '"') => State::QuoteInQuoted,
            (State::QuoteInQuoted, '"') => State::Quoted,
            (State::Quoted, _) => State::Quoted,
            (_, ',') | (_, '\n') => State::FieldStart,
            (_, _) => State::Unquoted,
        };
        if ch == '\n' {
            line += 1;
        }
    }

    (state == State::Quoted).then_some(opened_at)
}

fn csv_error(err: csv::Error) -> ValidationError {
    ValidationError::Parse(err.to_string())
}

/// Make header names unique: later repeats of `X` become `X.1`, `X.2`, ...
fn unique_columns(headers: &StringRecord) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    let mut repeats = std::collections::HashMap::new();

    for name in headers.iter() {
        let mut unique = name.to_string();
        while columns.contains(&unique) {
            let count = repeats.entry(name.to_string()).or_insert(0usize);
            *count += 1;
            unique = format!("{}.{}", name, count);
        }
        columns.push(unique);
    }

    columns
}
