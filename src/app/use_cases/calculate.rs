//! Use-Case: Pendelpositionen für eine Anfrage berechnen.

use crate::app::{Calculation, CalculationRequest};
use crate::core::{
    DatasetIndex, LayoutResult, Origin, build_positions, consolidate, normalize, resolve,
};
use crate::shared::{CalculatorOptions, TableSource};
use crate::xlsx::XlsxWorkbook;

/// Berechnet Segmente und Positionen aus einer beliebigen Tabellenquelle.
///
/// Ungültige Optionen brechen mit `LayoutError::InvalidInput` ab, bevor die
/// Quelle gelesen wird. Das Blatt wird bei jedem Aufruf neu geladen. Interpolierte Distanzen
/// durchlaufen die Normalisierung; exakte Treffer bleiben unverändert, außer
/// `consolidate_exact_matches` ist gesetzt.
pub fn calculate(
    request: &CalculationRequest,
    source: &dyn TableSource,
    options: &CalculatorOptions,
) -> LayoutResult<Calculation> {
    options.validate()?;
    let index = DatasetIndex::load(source, &request.sheet_name)?;
    let resolution = resolve(request.span, request.e, &index)?;
    let params = options.normalizer_params();

    let distances = match resolution.origin {
        Origin::Interpolated { .. } => normalize(&resolution.distances, request.span, &params)?,
        Origin::Exact if options.consolidate_exact_matches => {
            consolidate(&resolution.distances, request.span, &params)?
        }
        Origin::Exact => resolution.distances,
    };

    let positions = build_positions(&distances)?;

    log::info!(
        "N={}, e={}: {} Segmente ({:?})",
        request.span,
        request.e,
        distances.len(),
        resolution.origin
    );

    Ok(Calculation {
        span: request.span,
        distances,
        positions,
        origin: resolution.origin,
    })
}

/// Öffnet die konfigurierte Arbeitsmappe und berechnet die Anfrage.
pub fn calculate_from_workbook(
    request: &CalculationRequest,
    options: &CalculatorOptions,
) -> LayoutResult<Calculation> {
    let workbook = XlsxWorkbook::open(&options.workbook_path)?;
    calculate(request, &workbook, options)
}
