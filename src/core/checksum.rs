//! Kontrolle der Segmentsumme gegen die Spannweite.

use crate::shared::options::CHECKSUM_TOLERANCE;

/// Prüft, ob die Segmente (nahezu) die Spannweite ergeben.
pub fn verify(distances: &[f64], span: f64) -> bool {
    verify_with_tolerance(distances, span, CHECKSUM_TOLERANCE)
}

/// Wie [`verify`], mit frei wählbarer Toleranz (strikt kleiner).
pub fn verify_with_tolerance(distances: &[f64], span: f64, tolerance: f64) -> bool {
    let total: f64 = distances.iter().sum();
    (total - span).abs() < tolerance
}
