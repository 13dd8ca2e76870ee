//! Fehlertypen der Pendel-Berechnung.

use thiserror::Error;

/// Alle Fehler, die eine Berechnung abbrechen.
///
/// Jede Variante wird von der Stufe erzeugt, die den Fehler entdeckt, und
/// unverändert an den Aufrufer weitergereicht. Es gibt keinen Fallback auf ein
/// Standardergebnis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// N oder e ist keine gültige Zahl.
    #[error("Ungueltige Eingabe fuer {field}: '{value}' ist keine gueltige Zahl")]
    InvalidInput {
        /// Name des Eingabefelds (`N` oder `e`)
        field: &'static str,
        /// Der abgelehnte Rohtext
        value: String,
    },

    /// Das angefragte Tabellenblatt existiert nicht.
    #[error("Tabellenblatt '{sheet}' nicht gefunden (vorhanden: {available})")]
    SheetNotFound {
        sheet: String,
        /// Kommagetrennte Liste der vorhandenen Blätter
        available: String,
    },

    /// Jeder andere Fehler beim Laden der Referenztabelle.
    #[error("Referenztabelle konnte nicht geladen werden: {0}")]
    SourceUnavailable(String),

    /// Die passende Referenzzeile enthält keine Distanzwerte.
    #[error("Keine Distanzspalten fuer N={n}, e={e} gefunden")]
    NoDistanceColumns { n: f64, e: f64 },

    /// Kein exakter Treffer und keine Nachbarzeilen für eine Interpolation.
    #[error("Keine Daten fuer N={n}, e={e} und keine Interpolation moeglich")]
    NoData { n: f64, e: f64 },

    /// Die Restdistanzen summieren sich zu 0, eine Skalierung ist unmöglich.
    #[error("Restdistanzen ergeben 0, Distanzen koennen nicht skaliert werden")]
    DegenerateScale,

    /// Weniger als zwei Segmente, es entsteht kein Zwischenpunkt.
    #[error("Zu wenige Segmente ({count}) fuer eine Positionsberechnung")]
    InsufficientSegments { count: usize },
}

impl LayoutError {
    /// Überschrift für die Darstellung im Frontend.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "Input Error",
            Self::SheetNotFound { .. } => "Sheet Error",
            Self::SourceUnavailable(_) => "File Error",
            Self::NoDistanceColumns { .. }
            | Self::NoData { .. }
            | Self::DegenerateScale
            | Self::InsufficientSegments { .. } => "Data Error",
        }
    }
}

/// Kurzform für Ergebnisse der Berechnungs-Pipeline.
pub type LayoutResult<T> = Result<T, LayoutError>;
