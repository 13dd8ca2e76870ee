//! Kumulative Pendelpositionen entlang der Spannweite.

use crate::core::rounding::round2;
use crate::core::{LayoutError, LayoutResult};

/// Mindestanzahl Segmente für eine sinnvolle Positionsliste.
pub const MIN_SEGMENTS: usize = 2;

/// Baut die Positionsliste: Start bei 0, danach laufende Summe der Segmente.
///
/// Jede Zwischensumme wird auf zwei Nachkommastellen gerundet, Rundungsfehler
/// summieren sich also über die Schritte.
pub fn build_positions(segments: &[f64]) -> LayoutResult<Vec<f64>> {
    require_segments(segments)?;

    let mut positions = Vec::with_capacity(segments.len() + 1);
    positions.push(0.0);
    let mut current = 0.0;
    for &segment in segments {
        current = round2(current + segment);
        positions.push(current);
    }
    Ok(positions)
}

pub(crate) fn require_segments(segments: &[f64]) -> LayoutResult<()> {
    if segments.len() < MIN_SEGMENTS {
        return Err(LayoutError::InsufficientSegments {
            count: segments.len(),
        });
    }
    Ok(())
}
