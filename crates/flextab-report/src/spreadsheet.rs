//! XML Spreadsheet 2003 encoding.
//!
//! Produces a single `Summary` worksheet set up for landscape printing, fit
//! to one page and centred horizontally. The header row is `ID` plus the
//! compacted column set. Each body cell is typed independently: text that
//! parses as a finite number becomes a `Number`, anything else a `String`.
//!
//! Control characters other than tab, line feed and carriage return (and
//! U+FFFE, U+FFFF) have no XML 1.0 representation. Writing a header, row id
//! or cell that holds one fails with [`ReportError::UnencodableText`].

use std::io::{BufWriter, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use tracing::debug;

use flextab_model::{CellValue, Table};

use crate::error::{ReportError, Result};
use crate::layout::ColumnLayout;
use crate::writer::TableWriter;

/// Spreadsheet namespace.
pub const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Office namespace.
pub const OFFICE_NS: &str = "urn:schemas-microsoft-com:office:office";

/// Excel namespace.
pub const EXCEL_NS: &str = "urn:schemas-microsoft-com:office:excel";

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Summary";

/// Writes a table as an XML spreadsheet workbook.
#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetWriter<'a, V> {
    table: &'a Table<V>,
}

impl<'a, V: CellValue> SpreadsheetWriter<'a, V> {
    pub fn new(table: &'a Table<V>) -> Self {
        Self { table }
    }
}

/// Cell data type in the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataType {
    Number,
    String,
}

impl DataType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::String => "String",
        }
    }
}

/// Type a rendered cell, normalising numbers to their shortest form.
fn classify(text: &str) -> (DataType, String) {
    match text.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => (DataType::Number, number.to_string()),
        _ => (DataType::String, text.to_string()),
    }
}

/// XML 1.0 `Char`, minus surrogates which `char` cannot hold.
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn check_encodable(text: &str) -> Result<()> {
    match text.chars().find(|ch| !is_xml_char(*ch)) {
        Some(ch) => Err(ReportError::unencodable(text, ch)),
        None => Ok(()),
    }
}

fn write_cell<W: Write>(xml: &mut Writer<W>, data_type: DataType, text: &str) -> Result<()> {
    check_encodable(text)?;
    xml.write_event(Event::Start(BytesStart::new("Cell")))?;
    let mut data = BytesStart::new("Data");
    data.push_attribute(("ss:Type", data_type.as_str()));
    xml.write_event(Event::Start(data))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("Data")))?;
    xml.write_event(Event::End(BytesEnd::new("Cell")))?;
    Ok(())
}

fn write_page_setup<W: Write>(xml: &mut Writer<W>) -> Result<()> {
    let mut options = BytesStart::new("WorksheetOptions");
    options.push_attribute(("xmlns", EXCEL_NS));
    xml.write_event(Event::Start(options))?;

    xml.write_event(Event::Start(BytesStart::new("PageSetup")))?;
    let mut layout = BytesStart::new("Layout");
    layout.push_attribute(("x:Orientation", "Landscape"));
    layout.push_attribute(("x:CenterHorizontal", "1"));
    xml.write_event(Event::Empty(layout))?;
    xml.write_event(Event::End(BytesEnd::new("PageSetup")))?;

    xml.write_event(Event::Empty(BytesStart::new("FitToPage")))?;
    xml.write_event(Event::End(BytesEnd::new("WorksheetOptions")))?;
    Ok(())
}

impl<V: CellValue> TableWriter for SpreadsheetWriter<'_, V> {
    fn write(&self, sink: &mut dyn Write) -> Result<()> {
        let layout = ColumnLayout::compacted(self.table);
        let row_ids = self.table.row_ids();
        let mut xml = Writer::new_with_indent(BufWriter::new(sink), b' ', 2);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.write_event(Event::PI(BytesPI::new("mso-application progid=\"Excel.Sheet\"")))?;

        let mut workbook = BytesStart::new("Workbook");
        workbook.push_attribute(("xmlns", SPREADSHEET_NS));
        workbook.push_attribute(("xmlns:o", OFFICE_NS));
        workbook.push_attribute(("xmlns:x", EXCEL_NS));
        workbook.push_attribute(("xmlns:ss", SPREADSHEET_NS));
        xml.write_event(Event::Start(workbook))?;

        let mut worksheet = BytesStart::new("Worksheet");
        worksheet.push_attribute(("ss:Name", SHEET_NAME));
        xml.write_event(Event::Start(worksheet))?;
        xml.write_event(Event::Start(BytesStart::new("Table")))?;

        xml.write_event(Event::Start(BytesStart::new("Row")))?;
        for label in layout.header() {
            write_cell(&mut xml, DataType::String, label)?;
        }
        xml.write_event(Event::End(BytesEnd::new("Row")))?;

        let mut numbers = 0usize;
        for row_id in &row_ids {
            xml.write_event(Event::Start(BytesStart::new("Row")))?;
            write_cell(&mut xml, DataType::String, row_id)?;
            for column in &layout.body {
                let (data_type, text) = classify(&self.table.value_as_text(row_id, column));
                if data_type == DataType::Number {
                    numbers += 1;
                }
                write_cell(&mut xml, data_type, &text)?;
            }
            xml.write_event(Event::End(BytesEnd::new("Row")))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Table")))?;
        write_page_setup(&mut xml)?;
        xml.write_event(Event::End(BytesEnd::new("Worksheet")))?;
        xml.write_event(Event::End(BytesEnd::new("Workbook")))?;

        xml.into_inner().flush()?;
        debug!(
            rows = row_ids.len(),
            columns = layout.body.len(),
            numeric_cells = numbers,
            "wrote spreadsheet"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &Table<String>) -> String {
        String::from_utf8(SpreadsheetWriter::new(table).to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_classify_per_cell() {
        assert_eq!(classify("0.80").0, DataType::Number);
        assert_eq!(classify("0.80").1, "0.8");
        assert_eq!(classify("1e3").1, "1000");
        assert_eq!(classify("n/a").0, DataType::String);
        assert_eq!(classify("").0, DataType::String);
        assert_eq!(classify("NaN").0, DataType::String);
        assert_eq!(classify("inf").0, DataType::String);
    }

    #[test]
    fn test_workbook_structure() {
        let mut table = Table::new();
        table.add_row("run1", [("acc", "0.9".to_string()), ("f1", "0.8".to_string())]);
        table.add_row("run2", [("acc", "0.9".to_string()), ("f1", "n/a".to_string())]);
        let xml = render(&table);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<?mso-application progid=\"Excel.Sheet\"?>"));
        assert!(xml.contains("<Worksheet ss:Name=\"Summary\">"));
        assert!(xml.contains("<Data ss:Type=\"String\">ID</Data>"));
        assert!(xml.contains("<Data ss:Type=\"String\">f1</Data>"));
        // acc is invariant and compacted away
        assert!(!xml.contains(">acc<"));
        assert!(xml.contains("<Data ss:Type=\"Number\">0.8</Data>"));
        assert!(xml.contains("<Data ss:Type=\"String\">n/a</Data>"));
        assert!(xml.contains("<Layout x:Orientation=\"Landscape\" x:CenterHorizontal=\"1\"/>"));
        assert!(xml.contains("<FitToPage/>"));
        assert!(xml.trim_end().ends_with("</Workbook>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut table = Table::new();
        table.set_compact(false);
        table.add_row("a<b", [("x&y", "\"q\"".to_string())]);
        let xml = render(&table);
        assert!(xml.contains(">a&lt;b<"));
        assert!(xml.contains(">x&amp;y<"));
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let mut table = Table::new();
        table.set_compact(false);
        table.add_row("r", [("c", "a\u{1}b".to_string())]);
        let err = SpreadsheetWriter::new(&table).to_bytes().unwrap_err();
        assert!(matches!(
            err,
            ReportError::UnencodableText { code: 0x1, .. }
        ));

        let mut table = Table::new();
        table.set_compact(false);
        table.add_row("r\u{FFFF}", [("c", "ok".to_string())]);
        assert!(SpreadsheetWriter::new(&table).to_bytes().is_err());

        let mut table = Table::new();
        table.set_compact(false);
        table.add_row("r", [("c\u{8}", "ok".to_string())]);
        assert!(SpreadsheetWriter::new(&table).to_bytes().is_err());
    }

    #[test]
    fn test_whitespace_and_astral_characters_are_kept() {
        let mut table = Table::new();
        table.set_compact(false);
        table.add_row("r", [("c", "a\tb\u{1F600}".to_string())]);
        let xml = render(&table);
        assert!(xml.contains("a\tb\u{1F600}"));
    }
}
