//! # ReadLife Basic Usage Example
//!
//! This example demonstrates the basic usage of the readlife crate
//! for lifetime reading projections using the builder pattern API.

use polars::prelude::*;
use readlife::prelude::*;

fn main() -> ReadLifeResult<()> {
    println!("ReadLife Basic Usage Example");
    println!("============================");
    println!();

    // Load life expectancy data
    println!("Loading life expectancy table...");
    let df = df! {
        "country" => ["global", "US", "US", "GB"],
        "gender" => ["all", "male", "female", "all"],
        "at_birth" => [73.2, 76.1, 81.1, 81.0],
        "0-19" => [61.7, 64.6, 69.4, 70.5],
        "20-39" => [46.8, 46.7, 51.9, 52.0],
        "40-59" => [29.9, 30.2, 34.0, 34.6],
        "60-79" => [16.4, 18.3, 21.3, 21.0],
    }?;
    let data = LifeExpectancyData::from_df(df)?;
    let table = LifeExpectancyTable::from_data(&data)?;
    println!("✓ Table loaded with countries: {:?}", table.countries());

    // Method 1: global average
    println!("\n=== Global Average (age 30, 30 min/day) ===");
    let input = ReadingGoalInput::builder()
        .current_age(30.0)
        .minutes(30.0)
        .pages_per_hour(40.0)
        .avg_pages_per_book(300.0)
        .build();
    input.validate_all()?;
    print_result(&estimate().input(&input).table(&table).call());

    // Method 2: country and gender, weekly cadence
    println!("\n=== US Female (age 58, 3 hours/week) ===");
    let input = ReadingGoalInput::builder()
        .current_age(58.0)
        .minutes(180.0)
        .cadence(Cadence::Weekly)
        .pages_per_hour(35.0)
        .avg_pages_per_book(320.0)
        .country_code("us")
        .gender(Gender::Female)
        .build();
    print_result(&estimate().input(&input).table(&table).call());

    // Method 3: explicit expected age
    println!("\n=== Custom Expected Age 90 (age 70) ===");
    let input = ReadingGoalInput::builder()
        .current_age(70.0)
        .minutes(45.0)
        .pages_per_hour(30.0)
        .avg_pages_per_book(280.0)
        .build();
    print_result(
        &estimate()
            .input(&input)
            .table(&table)
            .expected_age(90.0)
            .call(),
    );

    // Several readers at once, exported as a DataFrame
    println!("\n=== Projection by Age ===");
    let inputs: Vec<ReadingGoalInput> = [20.0, 35.0, 50.0, 65.0, 80.0]
        .into_iter()
        .map(|age| {
            ReadingGoalInput::builder()
                .current_age(age)
                .minutes(30.0)
                .pages_per_hour(40.0)
                .avg_pages_per_book(300.0)
                .country_code("GB")
                .build()
        })
        .collect();
    let summary = LifetimeReadingResult::to_df(&estimate_many(&inputs, &table))?
        .lazy()
        .select([col("current_age"), col("years_left"), col("energy_factor"), col("total_books")])
        .collect()?;
    println!("{summary}");

    println!("\n✓ All projections completed successfully!");

    Ok(())
}

fn print_result(result: &LifetimeReadingResult) {
    println!("  Based on: {}", result.life_expectancy_label);
    println!("  Expected age: {:.1}", result.expected_age);
    println!("  Days left: {}", result.days_left);
    println!("  Daily minutes: {:.1}", result.daily_minutes);
    println!("  Energy factor: {}", result.energy_factor);
    println!("  Readable hours: {:.0}", result.total_readable_hours);
    println!("  Pages: {:.0}", result.total_pages);
    println!("  Books: {}", result.total_books);
}
