//! Ermittelt die Rohdistanzen für eine Anfrage (N, e): exakter Treffer oder
//! lineare Interpolation zwischen den benachbarten Spannweiten.

use crate::core::{DatasetIndex, LayoutError, LayoutResult, ReferenceRow};
use serde::{Deserialize, Serialize};

/// Herkunft der Rohdistanzen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// Direkt aus einer Referenzzeile übernommen
    Exact,
    /// Interpoliert zwischen zwei Nachbarzeilen
    Interpolated { below_n: f64, above_n: f64 },
}

/// Ergebnis der Auflösung.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub distances: Vec<f64>,
    pub origin: Origin,
}

impl Resolution {
    pub fn is_exact(&self) -> bool {
        self.origin == Origin::Exact
    }
}

/// Löst die Rohdistanzen für (N, e) auf.
///
/// Bei einem exakten Treffer werden dessen Distanzen unverändert geliefert.
/// Sonst wird zwischen der nächstkleineren und nächstgrößeren Spannweite
/// interpoliert, unabhängig von e.
pub fn resolve(n: f64, e: f64, index: &DatasetIndex) -> LayoutResult<Resolution> {
    if let Some(row) = index.find_exact(n, e) {
        if row.distances.is_empty() {
            return Err(LayoutError::NoDistanceColumns { n, e });
        }
        log::debug!("Exakter Treffer fuer N={}, e={}", n, e);
        return Ok(Resolution {
            distances: row.distances.clone(),
            origin: Origin::Exact,
        });
    }

    let (Some(below), Some(above)) = (index.find_below(n), index.find_above(n)) else {
        return Err(LayoutError::NoData { n, e });
    };

    let distances = interpolate(below, above, n);
    if distances.is_empty() {
        return Err(LayoutError::NoDistanceColumns { n, e });
    }

    log::debug!(
        "Interpoliert zwischen N={} und N={}: {:?}",
        below.n,
        above.n,
        distances
    );

    Ok(Resolution {
        distances,
        origin: Origin::Interpolated {
            below_n: below.n,
            above_n: above.n,
        },
    })
}

/// Interpoliert positionsweise; bei ungleicher Länge bestimmt die kürzere Zeile
/// die Anzahl der Werte.
///
/// Erst multiplizieren, dann teilen: ein vorab berechneter Faktor weicht im
/// letzten Bit ab und kippt die exakte Summenprüfung der Skalierung.
fn interpolate(below: &ReferenceRow, above: &ReferenceRow, n: f64) -> Vec<f64> {
    let offset = n - below.n;
    let width = above.n - below.n;
    below
        .distances
        .iter()
        .zip(&above.distances)
        .map(|(low, high)| low + (high - low) * offset / width)
        .collect()
}
