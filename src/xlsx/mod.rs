//! XLSX-Import für Referenztabellen.
//!
//! Eine XLSX-Datei ist ein ZIP-Container mit XML-Teilen: `xl/workbook.xml`
//! (Blattnamen), `xl/_rels/workbook.xml.rels` (Blatt → Datei),
//! `xl/sharedStrings.xml` (Text-Pool) und je Blatt `xl/worksheets/*.xml`.

pub mod shared_strings;
pub mod workbook;
pub mod worksheet;

pub use shared_strings::parse_shared_strings;
pub use workbook::XlsxWorkbook;
pub use worksheet::{CellGrid, column_index, parse_worksheet};

use anyhow::{Context, Result};
use quick_xml::events::BytesRef;

/// Löst eine Entity-Referenz (`&amp;`, `&#38;`, ...) in Text auf.
fn resolve_entity(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference.resolve_char_ref()? {
        return Ok(ch.to_string());
    }
    let name = reference.decode()?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(str::to_string)
        .with_context(|| format!("Unbekannte XML-Entity: &{};", name))
}
