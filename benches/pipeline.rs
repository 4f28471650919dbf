use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use opslog::{correct, map_to_store_columns, prepare_row, Candidate, CorrectorPolicy, RecordType};

const ISSUE_TEXT: &str = "Equipment malfunction: air compressor not working";
const ISSUE_PAYLOAD: &str = r#"{"type":"issue","category":"Equipment","description":"Air compressor not working","severity":"Medium"}"#;
const FUEL_TEXT: &str = "Hilux refueled 40 liters, odo 12300 to 12420, John driving";
const FUEL_PAYLOAD: &str = r#"{"type":"fuel","vehicle":"Toyota Hilux","liters":"40 L","odometer_start":"12,300","odometer_end":12420,"driver":"John"}"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 4).expect("valid date")
}

fn parse_bench(c: &mut Criterion) {
    c.bench_function("parse_candidate_fuel", |b| {
        b.iter(|| {
            let candidate = extract::parse_candidate(black_box(FUEL_PAYLOAD)).expect("payload parses");
            black_box(candidate);
        });
    });
}

fn correct_bench(c: &mut Criterion) {
    let policy = CorrectorPolicy::default();
    let candidate = Candidate::new(RecordType::Fuel).with("vehicle", "Other");

    c.bench_function("correct_reclassified_fuel", |b| {
        b.iter(|| {
            let out = correct(
                black_box(candidate.clone()),
                black_box("Fuel supply running low"),
                today(),
                &policy,
            );
            black_box(out);
        });
    });
}

fn prepare_bench(c: &mut Criterion) {
    let policy = CorrectorPolicy::default();
    let cases = [(ISSUE_TEXT, ISSUE_PAYLOAD), (FUEL_TEXT, FUEL_PAYLOAD)];

    c.bench_function("parse_correct_validate_map", |b| {
        b.iter(|| {
            for (text, payload) in cases {
                let candidate = extract::parse_candidate(payload).expect("payload parses");
                let row = prepare_row(candidate, black_box(text), today(), &policy)
                    .expect("record validates");
                black_box(row);
            }
        });
    });

    let candidate = extract::parse_candidate(FUEL_PAYLOAD).expect("payload parses");
    let prepared = prepare_row(candidate, FUEL_TEXT, today(), &policy).expect("record validates");
    c.bench_function("map_to_store_columns_fuel", |b| {
        b.iter(|| black_box(map_to_store_columns(black_box(&prepared.record))));
    });
}

criterion_group!(benches, parse_bench, correct_bench, prepare_bench);
criterion_main!(benches);
