//! Pendulum Layout Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;
pub mod xlsx;

pub use app::{Calculation, CalculationRequest, calculate, calculate_from_workbook};
pub use crate::core::{
    DatasetIndex, LayoutError, LayoutResult, NormalizerParams, Origin, ReferenceRow,
    build_positions, normalize, resolve, verify,
};
pub use shared::{CalculatorOptions, CellValue, MemoryWorkbook, Sheet, TableSource};
pub use xlsx::XlsxWorkbook;
