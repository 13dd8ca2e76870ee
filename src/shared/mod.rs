//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Konfiguration und die tabellarische Datenquelle, die zwischen
//! `core`, `xlsx` und `app` geteilt werden.

pub mod options;
pub mod table;

pub use options::CalculatorOptions;
pub use table::{CellValue, MemoryWorkbook, Sheet, TableSource};
