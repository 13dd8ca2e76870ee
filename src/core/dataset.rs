//! Referenzdaten: Zeilen mit Spannweite N, Parameter e und Segmentdistanzen.

use crate::core::{LayoutError, LayoutResult};
use crate::shared::{Sheet, TableSource};

/// Überschrift der Spannweiten-Spalte.
pub const SPAN_COLUMN: &str = "N";
/// Überschrift der Parameter-Spalte.
pub const PARAMETER_COLUMN: &str = "e";
/// Präfix der Distanzspalten (`D1`, `D2`, ...).
pub const DISTANCE_COLUMN_PREFIX: &str = "D";

/// Eine bekannte Konfiguration aus der Referenztabelle.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    /// Spannweite
    pub n: f64,
    /// Parameter e
    pub e: f64,
    /// Segmentdistanzen von links nach rechts, leere Zellen entfernt
    pub distances: Vec<f64>,
}

impl ReferenceRow {
    pub fn new(n: f64, e: f64, distances: Vec<f64>) -> Self {
        Self { n, e, distances }
    }
}

/// Index über die Referenzzeilen eines Tabellenblatts.
///
/// Zeilen ohne gültiges N oder e sind nicht enthalten. Doppelte (N, e)-Paare
/// sind erlaubt; Abfragen liefern die erste passende Zeile in Blatt-Reihenfolge.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    rows: Vec<ReferenceRow>,
}

impl DatasetIndex {
    /// Erstellt den Index; Zeilen mit NaN in N oder e werden verworfen.
    pub fn from_rows(rows: Vec<ReferenceRow>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| !row.n.is_nan() && !row.e.is_nan())
            .collect();
        Self { rows }
    }

    /// Lädt ein Tabellenblatt aus der Quelle und indiziert es.
    pub fn load(source: &dyn TableSource, sheet_name: &str) -> LayoutResult<Self> {
        let sheet = source.read_sheet(sheet_name)?;
        let index = Self::from_sheet(&sheet)?;
        log::info!(
            "Referenztabelle '{}' geladen: {} Zeilen",
            sheet_name,
            index.len()
        );
        Ok(index)
    }

    /// Liest Referenzzeilen aus einem Tabellenblatt.
    ///
    /// Benötigt die Spalten `N` und `e`; alle Spalten mit Präfix `D` sind
    /// Distanzspalten in deklarierter Reihenfolge.
    pub fn from_sheet(sheet: &Sheet) -> LayoutResult<Self> {
        let span_col = required_column(sheet, SPAN_COLUMN)?;
        let parameter_col = required_column(sheet, PARAMETER_COLUMN)?;
        let distance_cols: Vec<usize> = sheet
            .header
            .iter()
            .enumerate()
            .filter(|(_, name)| name.starts_with(DISTANCE_COLUMN_PREFIX))
            .map(|(index, _)| index)
            .collect();

        let mut rows = Vec::with_capacity(sheet.row_count());
        let mut skipped = 0usize;

        for row_index in 0..sheet.row_count() {
            let n = sheet.cell(row_index, span_col).and_then(|c| c.as_number());
            let e = sheet
                .cell(row_index, parameter_col)
                .and_then(|c| c.as_number());
            let (Some(n), Some(e)) = (n, e) else {
                skipped += 1;
                continue;
            };

            let distances = distance_cols
                .iter()
                .filter_map(|&col| {
                    let cell = sheet.cell(row_index, col)?;
                    let value = cell.as_number();
                    if value.is_none() {
                        log::warn!(
                            "Blatt '{}', Zeile {}: Distanzwert {:?} ignoriert",
                            sheet.name,
                            row_index + 2,
                            cell
                        );
                    }
                    value
                })
                .collect();

            rows.push(ReferenceRow::new(n, e, distances));
        }

        if skipped > 0 {
            log::warn!(
                "Blatt '{}': {} Zeilen ohne gueltiges N/e uebersprungen",
                sheet.name,
                skipped
            );
        }

        Ok(Self::from_rows(rows))
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Erste Zeile mit exakt gleichem N und e (ohne Toleranz).
    pub fn find_exact(&self, n: f64, e: f64) -> Option<&ReferenceRow> {
        self.rows.iter().find(|row| row.n == n && row.e == e)
    }

    /// Zeile mit dem größten N strikt kleiner als `n`.
    pub fn find_below(&self, n: f64) -> Option<&ReferenceRow> {
        self.rows
            .iter()
            .filter(|row| row.n < n)
            .fold(None, |best: Option<&ReferenceRow>, row| match best {
                Some(current) if current.n >= row.n => Some(current),
                _ => Some(row),
            })
    }

    /// Zeile mit dem kleinsten N strikt größer als `n`.
    pub fn find_above(&self, n: f64) -> Option<&ReferenceRow> {
        self.rows
            .iter()
            .filter(|row| row.n > n)
            .fold(None, |best: Option<&ReferenceRow>, row| match best {
                Some(current) if current.n <= row.n => Some(current),
                _ => Some(row),
            })
    }
}

fn required_column(sheet: &Sheet, name: &str) -> LayoutResult<usize> {
    sheet.column_index(name).ok_or_else(|| {
        LayoutError::SourceUnavailable(format!(
            "Spalte '{}' fehlt in Blatt '{}'",
            name, sheet.name
        ))
    })
}
