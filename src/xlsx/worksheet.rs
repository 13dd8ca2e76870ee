//! Parser für einzelne Tabellenblätter (`xl/worksheets/sheetN.xml`).

use super::resolve_entity;
use crate::shared::CellValue;
use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Maximale Spaltenanzahl einer XLSX-Tabelle (Spalte `XFD`).
pub const MAX_COLUMNS: usize = 16_384;

/// Zeilenweises Zellraster; leere Zellen sind `None`.
pub type CellGrid = Vec<Vec<Option<CellValue>>>;

/// Zelltyp laut `t`-Attribut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Number,
    SharedString,
    InlineString,
    FormulaString,
    Bool,
    Error,
    Date,
}

impl CellKind {
    fn from_attr(value: &[u8]) -> Self {
        match value {
            b"s" => Self::SharedString,
            b"inlineStr" => Self::InlineString,
            b"str" => Self::FormulaString,
            b"b" => Self::Bool,
            b"e" => Self::Error,
            b"d" => Self::Date,
            _ => Self::Number,
        }
    }
}

/// Zelle, deren Inhalt gerade gelesen wird.
#[derive(Debug)]
struct PendingCell {
    column: usize,
    kind: CellKind,
    raw: String,
}

impl PendingCell {
    fn from_start(element: &BytesStart<'_>, fallback_column: usize) -> Result<Self> {
        let mut column = fallback_column;
        let mut kind = CellKind::Number;

        for attr in element.attributes().flatten() {
            match attr.key.local_name().as_ref() {
                b"r" => {
                    let reference = String::from_utf8_lossy(&attr.value);
                    if let Some(index) = column_index(&reference) {
                        column = index;
                    }
                }
                b"t" => kind = CellKind::from_attr(&attr.value),
                _ => {}
            }
        }

        if column >= MAX_COLUMNS {
            bail!("Spaltenindex {} ausserhalb des XLSX-Bereichs", column);
        }

        Ok(Self {
            column,
            kind,
            raw: String::new(),
        })
    }

    fn into_value(self, shared_strings: &[String]) -> Result<Option<CellValue>> {
        let raw = self.raw;
        let value = match self.kind {
            CellKind::SharedString => {
                let index = raw
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("Ungueltiger Shared-String-Index '{}'", raw))?;
                let text = shared_strings
                    .get(index)
                    .with_context(|| format!("Shared-String-Index {} fehlt", index))?;
                Some(CellValue::Text(text.clone()))
            }
            CellKind::InlineString | CellKind::FormulaString | CellKind::Date => {
                (!raw.is_empty()).then_some(CellValue::Text(raw))
            }
            CellKind::Bool => Some(CellValue::Bool(raw.trim() == "1")),
            // Fehlerwerte wie #DIV/0! gelten als leer
            CellKind::Error => None,
            CellKind::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    let number = trimmed
                        .parse::<f64>()
                        .with_context(|| format!("Zahl '{}' konnte nicht geparst werden", trimmed))?;
                    Some(CellValue::Number(number))
                }
            }
        };
        Ok(value)
    }
}

/// Parst ein Tabellenblatt zu einem Zellraster.
///
/// Zeilen ohne Inhalt werden ausgelassen. Spalten werden über die
/// Zellreferenz (`r="C7"`) platziert; fehlt sie, zählt die Position.
pub fn parse_worksheet(content: &[u8], shared_strings: &[String]) -> Result<CellGrid> {
    let mut reader = Reader::from_reader(content);
    let mut buf = Vec::new();

    let mut grid: CellGrid = Vec::new();
    let mut row: Vec<Option<CellValue>> = Vec::new();
    let mut cell: Option<PendingCell> = None;
    let mut capture = false;
    let mut next_column = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => {
                    row.clear();
                    next_column = 0;
                }
                b"c" => {
                    let pending = PendingCell::from_start(&e, next_column)?;
                    next_column = pending.column + 1;
                    cell = Some(pending);
                }
                b"v" => capture = cell.is_some(),
                b"t" => {
                    capture = cell
                        .as_ref()
                        .is_some_and(|c| c.kind == CellKind::InlineString);
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"c" {
                    let pending = PendingCell::from_start(&e, next_column)?;
                    next_column = pending.column + 1;
                }
            }
            Ok(Event::Text(e)) => {
                if capture {
                    if let Some(pending) = cell.as_mut() {
                        pending.raw.push_str(&e.xml_content()?);
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if capture {
                    if let Some(pending) = cell.as_mut() {
                        pending.raw.push_str(&resolve_entity(&e)?);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"v" | b"t" => capture = false,
                b"c" => {
                    if let Some(pending) = cell.take() {
                        let column = pending.column;
                        let value = pending.into_value(shared_strings)?;
                        place(&mut row, column, value);
                    }
                }
                b"row" => {
                    if row.iter().any(Option::is_some) {
                        grid.push(std::mem::take(&mut row));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des Tabellenblatts"),
            _ => {}
        }
        buf.clear();
    }

    Ok(grid)
}

/// Spaltenindex (0-basiert) aus einer Zellreferenz wie `"C7"` oder `"AA10"`.
pub fn column_index(reference: &str) -> Option<usize> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .collect();
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let number = letters.iter().fold(0usize, |acc, &letter| {
        acc * 26 + (letter.to_ascii_uppercase() - b'A') as usize + 1
    });
    Some(number - 1)
}

fn place(row: &mut Vec<Option<CellValue>>, column: usize, value: Option<CellValue>) {
    if value.is_none() {
        return;
    }
    if row.len() <= column {
        row.resize(column + 1, None);
    }
    row[column] = value;
}
