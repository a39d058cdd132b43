use std::io::{Seek, Write};

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::models::{OUTPUT_COLUMNS, OutputTable, TEXT_COLUMNS};

/// Name of the only worksheet in the workbook
pub const SHEET_NAME: &str = "Viber Blast";

/// `cellXfs` index of the text (`@`) number format in styles.xml
const TEXT_STYLE: usize = 1;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

// Style 0 is the default, style 1 forces the built-in text format (numFmtId 49)
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/><family val="2"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="49" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

/// Write the table as a single-sheet `.xlsx` workbook
///
/// Every value is stored as an inline string, and the `CH Code` /
/// `Mobile Number` columns additionally carry the `@` text format so the
/// template row stays text when filled in by hand.
pub fn write_xlsx<W: Write + Seek>(table: &OutputTable, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, String); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/styles.xml", STYLES.to_string()),
    ];
    for (name, body) in &parts {
        zip.start_file(*name, options)
            .with_context(|| format!("Failed to start workbook part {}", name))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("Failed to write workbook part {}", name))?;
    }

    zip.start_file("xl/worksheets/sheet1.xml", options)
        .context("Failed to start worksheet")?;
    zip.write_all(sheet_xml(table).as_bytes())
        .context("Failed to write worksheet")?;

    zip.finish().context("Failed to finish workbook")
}

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(SHEET_NAME)
    )
}

fn sheet_xml(table: &OutputTable) -> String {
    let text_columns: Vec<bool> = OUTPUT_COLUMNS
        .iter()
        .map(|c| TEXT_COLUMNS.contains(c))
        .collect();

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cols>"#,
    );
    for (i, is_text) in text_columns.iter().enumerate() {
        let n = i + 1;
        if *is_text {
            xml.push_str(&format!(
                r#"<col min="{n}" max="{n}" width="18" style="{TEXT_STYLE}" customWidth="1"/>"#
            ));
        } else {
            xml.push_str(&format!(r#"<col min="{n}" max="{n}" width="18" customWidth="1"/>"#));
        }
    }
    xml.push_str("</cols><sheetData>");

    push_row(&mut xml, 1, &OUTPUT_COLUMNS, None);
    for (i, record) in table.records().iter().enumerate() {
        push_row(&mut xml, i + 2, &record.fields(), Some(text_columns.as_slice()));
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row(xml: &mut String, row: usize, values: &[&str], text_columns: Option<&[bool]>) {
    xml.push_str(&format!(r#"<row r="{}">"#, row));
    for (i, value) in values.iter().enumerate() {
        let reference = format!("{}{}", column_letter(i), row);
        let style = match text_columns {
            Some(flags) if flags.get(i).copied().unwrap_or(false) => {
                format!(r#" s="{}""#, TEXT_STYLE)
            }
            _ => String::new(),
        };

        if value.is_empty() {
            xml.push_str(&format!(r#"<c r="{}"{}/>"#, reference, style));
        } else {
            xml.push_str(&format!(
                r#"<c r="{}"{} t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                reference,
                style,
                escape_xml(value)
            ));
        }
    }
    xml.push_str("</row>");
}

/// Spreadsheet column letter for a zero-based index (0 → A, 26 → AA)
fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Escape markup characters and drop control characters XML 1.0 forbids
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(ch),
            c if (c as u32) < 0x20 => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            c => escaped.push(c),
        }
    }
    escaped
}
