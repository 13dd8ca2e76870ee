//! Normalisierung der Rohdistanzen zu einer begrenzten, gerundeten
//! Segmentliste, deren Summe exakt der Spannweite entspricht.
//!
//! Ablauf (strikt in dieser Reihenfolge):
//! 1. Skalierung auf die Spannweite (erste Distanz bleibt fest)
//! 2. Kappen auf die Maximallänge und Verteilen des Überschusses (ein Durchgang)
//! 3. Summenkorrektur auf dem letzten Segment
//! 4. Zusammenfassen kleiner Segmente mit dem Vorgänger
//! 5. Begrenzen der Segmentanzahl
//! 6. Rundung auf das Raster (Standard 0.25)
//! 7. Abschließende Summenkorrektur

use crate::core::positions::require_segments;
use crate::core::rounding::{round2, round_to_step};
use crate::core::{LayoutError, LayoutResult};
use crate::shared::options::{
    MAX_SEGMENT_LENGTH, MAX_SEGMENTS, MIN_SEGMENT_LENGTH, ROUNDING_STEP,
};


/// Parameter der Normalisierungs-Pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerParams {
    /// Maximale Segmentlänge für das Kappen
    pub max_segment_length: f64,
    /// Segmente unterhalb dieser Länge werden mit dem Vorgänger zusammengefasst
    pub min_segment_length: f64,
    /// Maximale Anzahl Segmente
    pub max_segments: usize,
    /// Rundungsraster
    pub rounding_step: f64,
}

impl Default for NormalizerParams {
    fn default() -> Self {
        Self {
            max_segment_length: MAX_SEGMENT_LENGTH,
            min_segment_length: MIN_SEGMENT_LENGTH,
            max_segments: MAX_SEGMENTS,
            rounding_step: ROUNDING_STEP,
        }
    }
}

/// Führt die komplette Pipeline (Stufen 1–7) aus.
pub fn normalize(distances: &[f64], span: f64, params: &NormalizerParams) -> LayoutResult<Vec<f64>> {
    let scaled = scale_to_span(distances, span)?;
    log::debug!("Skaliert: {:?}", scaled);

    let mut capped = cap_and_redistribute(&scaled, params.max_segment_length);
    correct_sum(&mut capped, span);
    log::debug!("Gekappt und korrigiert: {:?}", capped);

    consolidate(&capped, span, params)
}

/// Stufen 4–7: Zusammenfassen, Anzahl begrenzen, Rasterung, Summenkorrektur.
///
/// Prüft abschließend, dass mindestens zwei Segmente übrig bleiben.
pub fn consolidate(distances: &[f64], span: f64, params: &NormalizerParams) -> LayoutResult<Vec<f64>> {
    let merged = merge_small_segments(distances, params.min_segment_length);
    let limited = limit_segment_count(merged, params.max_segments);
    let mut rounded = round_segments(&limited, params.rounding_step);
    correct_sum(&mut rounded, span);
    log::debug!("Segmente: {:?}", rounded);

    require_segments(&rounded)?;
    Ok(rounded)
}

/// Skaliert alle Distanzen außer der ersten, sodass die Summe `span` ergibt.
///
/// Skalierte Werte werden auf zwei Nachkommastellen gerundet. Stimmt die
/// Summe bereits exakt, bleibt die Liste unverändert.
pub fn scale_to_span(distances: &[f64], span: f64) -> LayoutResult<Vec<f64>> {
    let total: f64 = distances.iter().sum();
    if total == span {
        return Ok(distances.to_vec());
    }

    let Some((&first, rest)) = distances.split_first() else {
        return Err(LayoutError::DegenerateScale);
    };

    let rest_total: f64 = rest.iter().sum();
    if rest_total == 0.0 {
        return Err(LayoutError::DegenerateScale);
    }

    let factor = (span - first) / rest_total;
    Ok(std::iter::once(first)
        .chain(rest.iter().map(|d| round2(d * factor)))
        .collect())
}

/// Kappt jede Distanz auf `cap` und verteilt den Überschuss gleichmäßig auf alle.
///
/// Genau ein Durchgang: nach dem Verteilen darf ein Wert wieder über `cap` liegen.
pub fn cap_and_redistribute(distances: &[f64], cap: f64) -> Vec<f64> {
    if distances.is_empty() {
        return Vec::new();
    }

    let excess: f64 = distances
        .iter()
        .filter(|&&d| d > cap)
        .map(|d| d - cap)
        .sum();
    let share = excess / distances.len() as f64;

    distances
        .iter()
        .map(|&d| round2(d.min(cap) + share))
        .collect()
}

/// Schlägt die Abweichung der Summe von `span` auf das letzte Segment.
pub fn correct_sum(segments: &mut [f64], span: f64) {
    let total: f64 = segments.iter().sum();
    if total != span {
        if let Some(last) = segments.last_mut() {
            *last = round2(*last + (span - total));
        }
    }
}

/// Fasst Distanzen unter `min_length` mit dem jeweils zuletzt gebildeten Segment zusammen.
///
/// Die erste Distanz eröffnet immer ein Segment, auch wenn sie selbst zu klein ist.
pub fn merge_small_segments(distances: &[f64], min_length: f64) -> Vec<f64> {
    let mut merged: Vec<f64> = Vec::with_capacity(distances.len());
    for &distance in distances {
        match merged.last_mut() {
            Some(last) if distance < min_length => *last += distance,
            _ => merged.push(distance),
        }
    }
    merged
}

/// Reduziert die Segmentanzahl auf höchstens `max_segments`.
///
/// Das kleinste Segment (erstes bei Gleichstand) geht im Vorgänger auf; ist es
/// das erste Segment, im Nachfolger.
pub fn limit_segment_count(mut segments: Vec<f64>, max_segments: usize) -> Vec<f64> {
    let max_segments = max_segments.max(1);
    while segments.len() > max_segments {
        let Some(index) = smallest_index(&segments) else {
            break;
        };
        let value = segments.remove(index);
        // Nach dem Entfernen liegt der Nachfolger des ersten Segments auf Index 0.
        let target = index.saturating_sub(1);
        segments[target] += value;
    }
    segments
}

/// Rundet jedes Segment auf das nächste Vielfache von `step`.
pub fn round_segments(segments: &[f64], step: f64) -> Vec<f64> {
    segments.iter().map(|&d| round_to_step(d, step)).collect()
}

fn smallest_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, &value)| match best {
            Some((_, current)) if current <= value => best,
            _ => Some((index, value)),
        })
        .map(|(index, _)| index)
}
