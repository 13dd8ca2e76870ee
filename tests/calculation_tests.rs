/// Integration-Tests für den Berechnungs-Use-Case (In-Memory-Tabellen)
use approx::assert_relative_eq;
use pendulum_layout::{
    CalculationRequest, CalculatorOptions, CellValue, LayoutError, MemoryWorkbook, Origin, Sheet,
    calculate, verify,
};

/// Baut ein Blatt mit den Spalten N, e, D1..Dk.
fn reference_sheet(name: &str, rows: &[(f64, f64, &[f64])]) -> Sheet {
    let width = rows.iter().map(|(_, _, d)| d.len()).max().unwrap_or(0);
    let mut header = vec!["N".to_string(), "e".to_string()];
    header.extend((1..=width).map(|i| format!("D{}", i)));

    let rows = rows
        .iter()
        .map(|(n, e, distances)| {
            let mut row = vec![Some(CellValue::Number(*n)), Some(CellValue::Number(*e))];
            row.extend(distances.iter().map(|d| Some(CellValue::Number(*d))));
            row
        })
        .collect();

    Sheet::new(name, header, rows)
}

fn workbook(rows: &[(f64, f64, &[f64])]) -> MemoryWorkbook {
    MemoryWorkbook::new().with_sheet(reference_sheet("Acier", rows))
}

fn request(span: f64, e: f64) -> CalculationRequest {
    CalculationRequest::new(span, e, "Acier")
}

fn is_quarter_multiple(value: f64) -> bool {
    (value * 4.0).fract() == 0.0
}

#[test]
fn test_interpolation_scenario() {
    let source = workbook(&[(10.0, 1.0, &[4.0, 6.0]), (20.0, 1.0, &[8.0, 12.0])]);
    let result = calculate(&request(15.0, 1.0), &source, &CalculatorOptions::default())
        .expect("Berechnung sollte gelingen");

    // Rohwerte [6, 9]; die Kappung auf 8 verteilt den Überschuss
    assert_eq!(result.distances, vec![6.5, 8.5]);
    assert_eq!(result.positions, vec![0.0, 6.5, 15.0]);
    assert_eq!(
        result.origin,
        Origin::Interpolated {
            below_n: 10.0,
            above_n: 20.0
        }
    );
}

#[test]
fn test_exact_match_is_returned_unchanged() {
    let source = workbook(&[
        (12.0, 1.0, &[3.3, 1.2, 7.5]),
        (20.0, 1.0, &[8.0, 12.0]),
    ]);
    let result = calculate(&request(12.0, 1.0), &source, &CalculatorOptions::default()).unwrap();

    assert_eq!(result.origin, Origin::Exact);
    assert_eq!(result.distances, vec![3.3, 1.2, 7.5]);
    assert_eq!(result.positions, vec![0.0, 3.3, 4.5, 12.0]);
}

#[test]
fn test_exact_match_consolidation_is_optional() {
    let source = workbook(&[(12.0, 1.0, &[3.3, 1.2, 7.5])]);
    let options = CalculatorOptions {
        consolidate_exact_matches: true,
        ..CalculatorOptions::default()
    };
    let result = calculate(&request(12.0, 1.0), &source, &options).unwrap();

    assert_eq!(result.distances, vec![4.5, 7.5]);
    assert_eq!(result.positions, vec![0.0, 4.5, 12.0]);
}

#[test]
fn test_exact_match_with_single_distance_has_too_few_segments() {
    let source = workbook(&[(12.0, 1.0, &[12.0])]);
    assert_eq!(
        calculate(&request(12.0, 1.0), &source, &CalculatorOptions::default()),
        Err(LayoutError::InsufficientSegments { count: 1 })
    );
}

#[test]
fn test_exact_match_without_distances_fails() {
    let sheet = Sheet::new(
        "Acier",
        vec!["N".into(), "e".into(), "D1".into()],
        vec![vec![
            Some(CellValue::Number(12.0)),
            Some(CellValue::Number(1.0)),
            None,
        ]],
    );
    let source = MemoryWorkbook::new().with_sheet(sheet);
    assert_eq!(
        calculate(&request(12.0, 1.0), &source, &CalculatorOptions::default()),
        Err(LayoutError::NoDistanceColumns { n: 12.0, e: 1.0 })
    );
}

#[test]
fn test_span_outside_reference_range_has_no_data() {
    let source = workbook(&[(10.0, 1.0, &[4.0, 6.0]), (20.0, 1.0, &[8.0, 12.0])]);
    assert_eq!(
        calculate(&request(25.0, 1.0), &source, &CalculatorOptions::default()),
        Err(LayoutError::NoData { n: 25.0, e: 1.0 })
    );
}

#[test]
fn test_unknown_sheet_is_reported() {
    let source = workbook(&[(10.0, 1.0, &[4.0, 6.0])]);
    let request = CalculationRequest::new(10.0, 1.0, "Bois");
    let err = calculate(&request, &source, &CalculatorOptions::default()).unwrap_err();
    assert!(matches!(err, LayoutError::SheetNotFound { ref sheet, .. } if sheet == "Bois"));
    assert_eq!(err.heading(), "Sheet Error");
}

#[test]
fn test_invalid_input_is_rejected_before_loading() {
    let err = CalculationRequest::parse("abc", "1", "Acier").unwrap_err();
    assert_eq!(err.heading(), "Input Error");
}

#[test]
fn test_long_interpolation_respects_invariants() {
    let below: &[f64] = &[1.2, 7.0, 9.0, 0.8, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 1.0];
    let above: &[f64] = &[1.4, 8.0, 11.0, 1.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 1.5];
    let source = workbook(&[(60.0, 1.0, below), (72.0, 1.0, above)]);
    let span = 66.0;

    let result = calculate(&request(span, 1.0), &source, &CalculatorOptions::default()).unwrap();

    assert!(result.distances.len() >= 2 && result.distances.len() <= 9);
    assert!((result.distance_sum() - span).abs() < 0.01);
    let last = result.distances.len() - 1;
    assert!(result.distances[..last].iter().all(|&d| is_quarter_multiple(d)));
    assert_eq!(result.positions.len(), result.distances.len() + 1);
    assert_relative_eq!(*result.positions.last().unwrap(), span, epsilon = 0.01);
}

#[test]
fn test_cap_may_leave_segments_above_maximum() {
    let source = workbook(&[
        (40.0, 1.0, &[4.0, 18.0, 18.0]),
        (48.0, 1.0, &[4.0, 22.0, 22.0]),
    ]);
    let result = calculate(&request(44.0, 1.0), &source, &CalculatorOptions::default()).unwrap();

    assert_eq!(result.distances, vec![12.0, 16.0, 16.0]);
    assert!(result.distances.iter().any(|&d| d > 8.0));
}

#[test]
fn test_checksum_scenario() {
    assert!(verify(&[6.0, 9.0], 15.0));
    assert!(!verify(&[6.0, 9.0], 15.2));

    let source = workbook(&[(10.0, 1.0, &[4.0, 6.0]), (20.0, 1.0, &[8.0, 12.0])]);
    let result = calculate(&request(15.0, 1.0), &source, &CalculatorOptions::default()).unwrap();
    assert!(result.verify(15.0, 0.05));
    assert!(!result.verify(15.2, 0.05));
}

#[test]
fn test_calculation_serializes_to_json() {
    let source = workbook(&[(10.0, 1.0, &[4.0, 6.0]), (20.0, 1.0, &[8.0, 12.0])]);
    let result = calculate(&request(15.0, 1.0), &source, &CalculatorOptions::default()).unwrap();

    let json = serde_json::to_value(&result).expect("JSON erwartet");
    assert_eq!(json["origin"]["kind"], "interpolated");
    assert_eq!(json["distances"], serde_json::json!([6.5, 8.5]));
}

#[test]
fn test_stage_two_value_below_threshold_is_merged() {
    let source = workbook(&[
        (21.0, 1.0, &[4.6, 2.19, 6.83, 6.3, 9.72, 9.63]),
        (38.0, 1.0, &[5.6, 6.8, 1.2, 11.4, 8.17, 4.19]),
    ]);
    let result = calculate(&request(37.22, 1.0), &source, &CalculatorOptions::default()).unwrap();

    assert_eq!(result.distances, vec![6.0, 9.0, 8.5, 8.5, 5.22]);
    assert_eq!(result.positions, vec![0.0, 6.0, 15.0, 23.5, 32.0, 37.22]);
}

#[test]
fn test_interpolation_rounding_boundaries_on_long_rows() {
    let source = workbook(&[
        (
            33.0,
            1.0,
            &[5.5, 2.01, 7.1, 5.64, 1.6, 6.75, 8.8, 4.81, 4.59, 9.38],
        ),
        (
            48.0,
            1.0,
            &[12.0, 2.42, 7.33, 2.0, 4.8, 9.4, 6.36, 11.3, 8.5, 6.21],
        ),
    ]);
    let result = calculate(&request(46.5, 1.0), &source, &CalculatorOptions::default()).unwrap();

    assert_eq!(
        result.distances,
        vec![10.0, 6.5, 3.0, 6.0, 4.25, 6.75, 5.25, 4.75]
    );
    assert_eq!(
        result.positions,
        vec![0.0, 10.0, 16.5, 19.5, 25.5, 29.75, 36.5, 41.75, 46.5]
    );
}

#[test]
fn test_invalid_options_are_rejected() {
    let source = workbook(&[(10.0, 1.0, &[4.0, 6.0]), (20.0, 1.0, &[8.0, 12.0])]);
    let options = CalculatorOptions {
        rounding_step: 0.0,
        ..CalculatorOptions::default()
    };
    let err = calculate(&request(15.0, 1.0), &source, &options).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::InvalidInput {
            field: "rounding_step",
            ..
        }
    ));
}
