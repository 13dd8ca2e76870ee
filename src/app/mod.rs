//! Application-Layer: Anfrage, Ergebnis und Use-Cases.

pub mod calculation;
pub mod request;
pub mod use_cases;

pub use calculation::Calculation;
pub use request::CalculationRequest;
pub use use_cases::{calculate, calculate_from_workbook};
