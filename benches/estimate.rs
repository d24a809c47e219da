use codspeed_criterion_compat::{Criterion, criterion_group, criterion_main};
use readlife::prelude::*;

fn setup_table() -> LifeExpectancyTable {
    let mut table = LifeExpectancyTable::new().with_entry(
        GLOBAL_KEY,
        Gender::All,
        LifeExpectancyEntry::new(73.2)
            .with_band(AgeBand::Age0To19, 61.7)
            .with_band(AgeBand::Age20To39, 46.8)
            .with_band(AgeBand::Age40To59, 29.9)
            .with_band(AgeBand::Age60To79, 16.4),
    );

    // A few hundred synthetic countries to keep lookups realistic
    for i in 0..26 * 26 {
        let code = format!("{}{}", (b'A' + (i / 26) as u8) as char, (b'A' + (i % 26) as u8) as char);
        for gender in Gender::ALL_VARIANTS {
            let offset = f64::from(i % 7);
            table.insert(
                &code,
                gender,
                LifeExpectancyEntry::new(70.0 + offset)
                    .with_band(AgeBand::Age20To39, 45.0 + offset)
                    .with_band(AgeBand::Age40To59, 28.0 + offset),
            );
        }
    }
    table
}

fn input(age: f64, country: Option<&str>, gender: Option<Gender>) -> ReadingGoalInput {
    ReadingGoalInput::builder()
        .current_age(age)
        .minutes(30.0)
        .pages_per_hour(40.0)
        .avg_pages_per_book(300.0)
        .maybe_country_code(country.map(str::to_string))
        .maybe_gender(gender)
        .build()
}

fn bench_estimate(c: &mut Criterion) {
    let table = setup_table();

    let global = input(30.0, None, None);
    c.bench_function("estimate_global", |b| {
        b.iter(|| estimate().input(&global).table(&table).call())
    });

    let country = input(45.0, Some(" fr "), Some(Gender::Female));
    c.bench_function("estimate_country_gender", |b| {
        b.iter(|| estimate().input(&country).table(&table).call())
    });

    // Band missing for the country, falls back to global
    let fallback = input(70.0, Some("FR"), None);
    c.bench_function("estimate_country_fallback", |b| {
        b.iter(|| estimate().input(&fallback).table(&table).call())
    });
}

fn bench_estimate_bulk(c: &mut Criterion) {
    let table = setup_table();
    let inputs: Vec<ReadingGoalInput> = (0..100)
        .map(|age| input(f64::from(age), Some("US"), Some(Gender::Male)))
        .collect();

    c.bench_function("estimate_many_100_ages", |b| {
        b.iter(|| estimate_many(&inputs, &table))
    });

    c.bench_function("estimate_many_to_df", |b| {
        b.iter(|| LifetimeReadingResult::to_df(&estimate_many(&inputs, &table)).unwrap())
    });
}

criterion_group!(benches, bench_estimate, bench_estimate_bulk);
criterion_main!(benches);
