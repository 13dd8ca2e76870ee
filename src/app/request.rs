//! Berechnungsanfrage aus dem Frontend (Rohtexte für N, e und Blattname).

use crate::core::{LayoutError, LayoutResult};

/// Geprüfte Anfrage: Spannweite N, Parameter e, Tabellenblatt.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    /// Spannweite N
    pub span: f64,
    /// Parameter e
    pub e: f64,
    pub sheet_name: String,
}

impl CalculationRequest {
    pub fn new(span: f64, e: f64, sheet_name: impl Into<String>) -> Self {
        Self {
            span,
            e,
            sheet_name: sheet_name.into(),
        }
    }

    /// Parst die Eingabetexte.
    ///
    /// N und e müssen endliche Zahlen sein, sonst `LayoutError::InvalidInput`,
    /// bevor irgendeine Datenquelle angefasst wird. Der Blattname wird getrimmt.
    pub fn parse(span_text: &str, e_text: &str, sheet_name: &str) -> LayoutResult<Self> {
        let span = parse_number("N", span_text)?;
        let e = parse_number("e", e_text)?;
        Ok(Self::new(span, e, sheet_name.trim()))
    }
}

fn parse_number(field: &'static str, text: &str) -> LayoutResult<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| LayoutError::InvalidInput {
            field,
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_inputs() {
        let request = CalculationRequest::parse(" 15 ", "1.5", "  Acier ").unwrap();
        assert_eq!(request, CalculationRequest::new(15.0, 1.5, "Acier"));
    }

    #[test]
    fn test_parse_rejects_non_numeric_span() {
        assert_eq!(
            CalculationRequest::parse("quinze", "1", "Acier"),
            Err(LayoutError::InvalidInput {
                field: "N",
                value: "quinze".into(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_non_finite_parameter() {
        let err = CalculationRequest::parse("15", "NaN", "Acier").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInput { field: "e", .. }));
        assert!(CalculationRequest::parse("inf", "1", "Acier").is_err());
        assert!(CalculationRequest::parse("", "1", "Acier").is_err());
    }
}
