//! Ergebnis einer Berechnung: Segmente, Positionen und Herkunft.

use crate::core::rounding::round2;
use crate::core::{Origin, verify_with_tolerance};
use serde::Serialize;

/// Ergebnis für das Frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    /// Angefragte Spannweite N
    pub span: f64,
    /// Segmentlängen von links nach rechts
    pub distances: Vec<f64>,
    /// Kumulative Positionen, beginnend bei 0
    pub positions: Vec<f64>,
    pub origin: Origin,
}

impl Calculation {
    pub fn distance_sum(&self) -> f64 {
        self.distances.iter().sum()
    }

    /// Segmente so, wie sie angezeigt werden (zwei Nachkommastellen).
    pub fn displayed_distances(&self) -> Vec<f64> {
        self.distances.iter().map(|&d| round2(d)).collect()
    }

    /// Summenkontrolle auf den angezeigten Werten gegen `span`.
    pub fn verify(&self, span: f64, tolerance: f64) -> bool {
        verify_with_tolerance(&self.displayed_distances(), span, tolerance)
    }
}
