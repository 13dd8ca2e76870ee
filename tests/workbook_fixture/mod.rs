//! Erzeugt minimale XLSX-Arbeitsmappen für Integrationstests.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Ein Blatt: Überschriften (als Shared Strings) und Zahlenzeilen.
pub struct FixtureSheet<'a> {
    pub name: &'a str,
    pub header: &'a [&'a str],
    pub rows: &'a [&'a [Option<f64>]],
}

fn column_letter(index: usize) -> String {
    let mut index = index + 1;
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn worksheet_xml(sheet: &FixtureSheet<'_>, shared: &mut Vec<String>) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    xml.push_str(r#"<row r="1">"#);
    for (col, title) in sheet.header.iter().enumerate() {
        let index = match shared.iter().position(|s| s == title) {
            Some(index) => index,
            None => {
                shared.push(title.to_string());
                shared.len() - 1
            }
        };
        xml.push_str(&format!(
            r#"<c r="{}1" t="s"><v>{}</v></c>"#,
            column_letter(col),
            index
        ));
    }
    xml.push_str("</row>");

    for (row_index, row) in sheet.rows.iter().enumerate() {
        let row_number = row_index + 2;
        xml.push_str(&format!(r#"<row r="{}">"#, row_number));
        for (col, value) in row.iter().enumerate() {
            if let Some(value) = value {
                xml.push_str(&format!(
                    r#"<c r="{}{}"><v>{}</v></c>"#,
                    column_letter(col),
                    row_number,
                    value
                ));
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Baut eine XLSX-Datei im Speicher.
pub fn build_workbook(sheets: &[FixtureSheet<'_>]) -> Vec<u8> {
    let mut shared = Vec::new();
    let worksheets: Vec<String> = sheets
        .iter()
        .map(|sheet| worksheet_xml(sheet, &mut shared))
        .collect();

    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, sheet) in sheets.iter().enumerate() {
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            sheet.name,
            i + 1,
            i + 1
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    let mut sst = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst>"#);
    for text in &shared {
        sst.push_str(&format!("<si><t>{}</t></si>", text));
    }
    sst.push_str("</sst>");

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut add = |name: &str, content: &str| {
        writer.start_file(name, options).expect("ZIP-Eintrag anlegen");
        writer
            .write_all(content.as_bytes())
            .expect("ZIP-Eintrag schreiben");
    };
    add("xl/workbook.xml", &workbook);
    add("xl/_rels/workbook.xml.rels", &rels);
    add("xl/sharedStrings.xml", &sst);
    for (i, xml) in worksheets.iter().enumerate() {
        add(&format!("xl/worksheets/sheet{}.xml", i + 1), xml);
    }

    writer.finish().expect("ZIP abschliessen").into_inner()
}
