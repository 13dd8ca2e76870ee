//! Use-Cases der Anwendung.

pub mod calculate;

pub use calculate::{calculate, calculate_from_workbook};
