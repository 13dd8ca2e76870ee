use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pendulum_layout::xlsx::parse_worksheet;
use pendulum_layout::{
    CalculationRequest, CalculatorOptions, CellValue, MemoryWorkbook, NormalizerParams, Sheet,
    calculate, normalize,
};
use std::hint::black_box;

const DISTANCE_COLUMNS: usize = 14;

fn build_reference_sheet(row_count: usize) -> Sheet {
    let mut header = vec!["N".to_string(), "e".to_string()];
    header.extend((1..=DISTANCE_COLUMNS).map(|i| format!("D{}", i)));

    let rows = (0..row_count)
        .map(|index| {
            let span = 20.0 + index as f64;
            let mut row = vec![
                Some(CellValue::Number(span)),
                Some(CellValue::Number((index % 4) as f64)),
            ];
            row.extend((0..DISTANCE_COLUMNS).map(|col| {
                let weight = 1.0 + ((index + col * 7) % 5) as f64 * 0.3;
                Some(CellValue::Number(span / DISTANCE_COLUMNS as f64 * weight))
            }));
            row
        })
        .collect();

    Sheet::new("Acier", header, rows)
}

fn build_worksheet_xml(row_count: usize) -> String {
    let mut xml = String::from("<worksheet><sheetData>");
    for row in 0..row_count {
        xml.push_str(&format!(r#"<row r="{}">"#, row + 1));
        for col in 0..(DISTANCE_COLUMNS + 2) {
            xml.push_str(&format!("<c><v>{}</v></c>", row * 31 + col));
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn bench_normalize(c: &mut Criterion) {
    let raw: Vec<f64> = (0..DISTANCE_COLUMNS)
        .map(|i| 1.5 + (i % 5) as f64 * 2.1)
        .collect();
    let params = NormalizerParams::default();

    c.bench_function("normalize_14_segments", |b| {
        b.iter(|| {
            let segments = normalize(black_box(&raw), black_box(75.0), &params)
                .expect("Normalisierung fehlgeschlagen");
            black_box(segments.len())
        })
    });
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");
    let options = CalculatorOptions::default();

    for &row_count in &[100usize, 10_000usize] {
        let source = MemoryWorkbook::new().with_sheet(build_reference_sheet(row_count));
        let request = CalculationRequest::new(20.5 + row_count as f64 / 2.0, 1.0, "Acier");

        group.bench_with_input(
            BenchmarkId::new("interpolated", row_count),
            &source,
            |b, source| {
                b.iter(|| {
                    let result = calculate(black_box(&request), source, &options)
                        .expect("Berechnung fehlgeschlagen");
                    black_box(result.positions.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_worksheet_parsing(c: &mut Criterion) {
    let xml = build_worksheet_xml(5_000);

    c.bench_function("xlsx_parse_worksheet_5000_rows", |b| {
        b.iter(|| {
            let grid = parse_worksheet(black_box(xml.as_bytes()), &[]).expect("Parse fehlgeschlagen");
            black_box(grid.len())
        })
    });
}

criterion_group!(
    core_benches,
    bench_normalize,
    bench_calculate,
    bench_worksheet_parsing
);
criterion_main!(core_benches);
