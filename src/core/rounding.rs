//! Rundungs-Helfer.
//!
//! Halbwerte werden zur geraden Ziffer gerundet (Banker's Rounding), damit
//! z.B. `2.625` auf der Viertel-Rasterung zu `2.5` wird und nicht zu `2.75`.

/// Rundet auf zwei Nachkommastellen.
///
/// Gerundet wird der exakt gespeicherte Wert, nicht `value * 100`: `2.675`
/// liegt binär knapp unter der Grenze und ergibt `2.67`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // Formatierung mit Präzision rundet korrekt auf Basis der Binärdarstellung
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Rundet auf das nächste Vielfache von `step`.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round_ties_even() * step
}
