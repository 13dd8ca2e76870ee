//! Tabellarische Datenquellen: Zellwerte, Tabellenblätter und die
//! `TableSource`-Schnittstelle, über die Referenzdaten geladen werden.

use crate::core::LayoutError;

/// Ein einzelner, nicht-leerer Zellwert.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Liefert den Zahlenwert der Zelle.
    ///
    /// Text wird getrimmt und als Zahl geparst; Wahrheitswerte gelten nicht als
    /// Zahl. Nur endliche Werte zählen, `"inf"` oder `"NaN"` als Text sind leer.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Bool(_) => None,
        };
        value.filter(|v| v.is_finite())
    }

    /// Darstellung als Spaltenüberschrift.
    pub fn as_header(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
        }
    }
}

/// Ein Tabellenblatt: Kopfzeile plus Datenzeilen.
///
/// Zeilen können kürzer als die Kopfzeile sein; fehlende Zellen gelten als leer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl Sheet {
    pub fn new(
        name: impl Into<String>,
        header: Vec<String>,
        rows: Vec<Vec<Option<CellValue>>>,
    ) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    /// Baut ein Blatt aus einem rohen Zellraster auf.
    ///
    /// Die erste nicht-leere Zeile wird zur Kopfzeile, leere Überschriften
    /// heißen `Unnamed: <index>`. Komplett leere Zeilen entfallen.
    pub fn from_grid(name: impl Into<String>, grid: Vec<Vec<Option<CellValue>>>) -> Self {
        let mut rows = grid
            .into_iter()
            .filter(|row| row.iter().any(Option::is_some));

        let header = rows
            .next()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(index, cell)| match cell {
                        Some(value) => value.as_header(),
                        None => format!("Unnamed: {}", index),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self::new(name, header, rows.collect())
    }

    /// Index der ersten Spalte mit exakt dieser Überschrift.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Zellwert an (Zeile, Spalte), `None` für leere oder fehlende Zellen.
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(column)?.as_ref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Quelle für benannte Tabellenblätter (XLSX-Datei, In-Memory-Daten, ...).
pub trait TableSource {
    /// Namen aller Blätter in Quell-Reihenfolge.
    fn sheet_names(&self) -> Vec<String>;

    /// Liest ein Blatt. Unbekannte Namen ergeben `LayoutError::SheetNotFound`.
    fn read_sheet(&self, name: &str) -> Result<Sheet, LayoutError>;
}

/// Arbeitsmappe im Speicher, z.B. für Tests oder bereits geladene Daten.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<Sheet>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt ein Blatt hinzu (Builder-Stil).
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}

impl TableSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    fn read_sheet(&self, name: &str) -> Result<Sheet, LayoutError> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .cloned()
            .ok_or_else(|| LayoutError::SheetNotFound {
                sheet: name.to_string(),
                available: self.sheet_names().join(", "),
            })
    }
}
