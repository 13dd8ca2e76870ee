//! Zentrale Konfiguration für den Pendel-Rechner.
//!
//! `CalculatorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::positions::MIN_SEGMENTS;
use crate::core::{LayoutError, LayoutResult, NormalizerParams};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Datenquelle ─────────────────────────────────────────────────────

/// Standard-Arbeitsmappe mit den Referenzdaten.
pub const WORKBOOK_PATH: &str = "pendules.xlsx";
/// Dateiname der Optionen neben der Binary.
pub const CONFIG_FILE_NAME: &str = "pendulum_layout.toml";

// ── Normalisierung ──────────────────────────────────────────────────

/// Maximale Segmentlänge beim Kappen.
pub const MAX_SEGMENT_LENGTH: f64 = 8.0;
/// Segmente unter dieser Länge werden mit dem Vorgänger zusammengefasst.
pub const MIN_SEGMENT_LENGTH: f64 = 2.0;
/// Maximale Anzahl Segmente.
pub const MAX_SEGMENTS: usize = 9;
/// Rundungsraster der Segmentlängen.
pub const ROUNDING_STEP: f64 = 0.25;

// ── Kontrolle ───────────────────────────────────────────────────────

/// Toleranz der Summenkontrolle (strikt kleiner).
pub const CHECKSUM_TOLERANCE: f64 = 0.05;

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `pendulum_layout.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorOptions {
    // ── Datenquelle ─────────────────────────────────────────────
    /// Pfad zur XLSX-Arbeitsmappe
    pub workbook_path: String,

    // ── Normalisierung ──────────────────────────────────────────
    /// Maximale Segmentlänge
    pub max_segment_length: f64,
    /// Mindestlänge, darunter wird zusammengefasst
    pub min_segment_length: f64,
    /// Maximale Segmentanzahl
    pub max_segments: usize,
    /// Rundungsraster
    pub rounding_step: f64,
    /// Exakte Treffer ebenfalls zusammenfassen und runden
    #[serde(default)]
    pub consolidate_exact_matches: bool,

    // ── Kontrolle ───────────────────────────────────────────────
    /// Toleranz der Summenkontrolle
    #[serde(default = "default_checksum_tolerance")]
    pub checksum_tolerance: f64,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            workbook_path: WORKBOOK_PATH.to_string(),
            max_segment_length: MAX_SEGMENT_LENGTH,
            min_segment_length: MIN_SEGMENT_LENGTH,
            max_segments: MAX_SEGMENTS,
            rounding_step: ROUNDING_STEP,
            consolidate_exact_matches: false,
            checksum_tolerance: CHECKSUM_TOLERANCE,
        }
    }
}

/// Serde-Default für `checksum_tolerance` (Abwärtskompatibilität).
fn default_checksum_tolerance() -> f64 {
    CHECKSUM_TOLERANCE
}

impl CalculatorOptions {
    /// Lädt Optionen aus einer TOML-Datei.
    ///
    /// Fehlt die Datei, ist sie fehlerhaft oder enthält sie ungültige Werte,
    /// gelten die Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            log::info!(
                "Keine Optionen-Datei unter {}, verwende Standardwerte",
                path.display()
            );
            return Self::default();
        }

        match Self::read_validated(path) {
            Ok(opts) => {
                log::info!("Optionen geladen aus: {}", path.display());
                opts
            }
            Err(e) => {
                log::warn!("Optionen verworfen, verwende Standardwerte: {:#}", e);
                Self::default()
            }
        }
    }

    fn read_validated(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("{} nicht lesbar", path.display()))?;
        let opts: Self = toml::from_str(&content)
            .with_context(|| format!("{} ist kein gueltiges TOML", path.display()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Speichert Optionen als TOML-Datei; ungültige Werte werden nicht geschrieben.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen nach {} schreiben", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// `pendulum_layout.toml` im Verzeichnis der Binary, sonst im Arbeitsverzeichnis.
    pub fn config_path() -> PathBuf {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(CONFIG_FILE_NAME)
    }

    /// Prüft die Normalisierungs- und Kontrollwerte.
    ///
    /// Längen, Raster und Toleranz müssen endlich und positiv sein (die
    /// Mindestlänge darf 0 sein), und es muss Platz für zwei Segmente bleiben.
    pub fn validate(&self) -> LayoutResult<()> {
        check_positive("max_segment_length", self.max_segment_length)?;
        check_positive("rounding_step", self.rounding_step)?;
        check_positive("checksum_tolerance", self.checksum_tolerance)?;
        if !self.min_segment_length.is_finite() || self.min_segment_length < 0.0 {
            return Err(invalid("min_segment_length", self.min_segment_length));
        }
        if self.max_segments < MIN_SEGMENTS {
            return Err(invalid("max_segments", self.max_segments));
        }
        Ok(())
    }

    /// Parameter für die Normalisierungs-Pipeline.
    pub fn normalizer_params(&self) -> NormalizerParams {
        NormalizerParams {
            max_segment_length: self.max_segment_length,
            min_segment_length: self.min_segment_length,
            max_segments: self.max_segments,
            rounding_step: self.rounding_step,
        }
    }
}

fn check_positive(field: &'static str, value: f64) -> LayoutResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value))
    }
}

fn invalid(field: &'static str, value: impl std::fmt::Display) -> LayoutError {
    LayoutError::InvalidInput {
        field,
        value: value.to_string(),
    }
}
