//! # Reading Lifetime Projection
//!
//! Projects how much reading a person has left, from their age, habits and a life expectancy table.
//!
//! ## Calculation
//!
//! ```text
//! R                    = remaining years from the table (country/gender/age band, global fallback)
//! expected_age         = A + R
//! years_left           = max(R, 0)
//! daily_minutes        = M (daily) or M / 7 (weekly)
//! days_left            = round(years_left · 365)
//! total_readable_hours = days_left · daily_minutes · energy_factor / 60
//! total_pages          = total_readable_hours · pages_per_hour
//! total_books          = max(floor(total_pages / avg_pages_per_book), 0), or 0 when avg_pages_per_book ≤ 0
//! ```
//!
//! The energy factor models declining reading stamina: 1.0 below 50, 0.8 from 50 to 65, 0.6 above 65.
//!
//! ## Usage Example
//! ```rust
//! # use readlife::prelude::*;
//! let table = LifeExpectancyTable::new().with_entry(
//!     "global",
//!     Gender::All,
//!     LifeExpectancyEntry::new(73.0).with_band(AgeBand::Age60To79, 16.0),
//! );
//! let input = ReadingGoalInput::builder()
//!     .current_age(70.0)
//!     .minutes(30.0)
//!     .pages_per_hour(40.0)
//!     .avg_pages_per_book(300.0)
//!     .build();
//!
//! let result = estimate().input(&input).table(&table).call();
//! assert_eq!(result.energy_factor, 0.6);
//! assert_eq!(result.days_left, 5840.0);
//! # ReadLifeResult::Ok(())
//! ```

mod result;

pub use self::result::LifetimeReadingResult;
use crate::helpers::normalize_country_code;
use crate::le_table::{Gender, LifeExpectancyTable};
use crate::params::ReadingGoalInput;
use bon::builder;

pub const DAYS_IN_YEAR: f64 = 365.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;

// =======================================
// PUBLIC FUNCTIONS
// =======================================

/// Energy factor for an age: 1.0 below 50, 0.8 from 50 to 65 inclusive, 0.6 above 65.
///
/// Non-increasing in age. A NaN age gets 0.6.
pub fn get_energy_factor(current_age: f64) -> f64 {
    if current_age < 50.0 {
        1.0
    } else if current_age <= 65.0 {
        0.8
    } else {
        0.6
    }
}

/// Describe which data the remaining-years figure came from.
///
/// - no country: `"global average"`
/// - country and a gender other than `all`: `"US · female"`
/// - otherwise: `"US average expectancy"`
///
/// The label does not check whether the country exists in the table.
pub fn build_life_expectancy_label(country_code: Option<&str>, gender: Option<Gender>) -> String {
    match (normalize_country_code(country_code), gender) {
        (None, _) => "global average".to_string(),
        (Some(country), Some(gender)) if gender != Gender::All => format!("{country} · {gender}"),
        (Some(country), _) => format!("{country} average expectancy"),
    }
}

/// Lifetime reading projection for one person.
///
/// Total function: inputs are not validated and the result is always produced. Out-of-range
/// values propagate arithmetically; see [`ReadingGoalInput::validate_all`] to reject them first.
///
/// # Parameters
/// - `input`: reading habits and demographic context
/// - `table`: life expectancy lookup
/// - `expected_age`: optional explicit expected age. When set the table is bypassed and
///   the remaining years are `expected_age - current_age`
///
/// # Examples
///
/// ## Country and gender specific
/// ```rust
/// # use readlife::prelude::*;
/// let table = LifeExpectancyTable::new()
///     .with_entry("global", Gender::All, LifeExpectancyEntry::new(73.0).with_band(AgeBand::Age20To39, 47.0))
///     .with_entry("US", Gender::Female, LifeExpectancyEntry::new(81.0).with_band(AgeBand::Age20To39, 52.0));
/// let input = ReadingGoalInput::builder()
///     .current_age(30.0)
///     .minutes(30.0)
///     .pages_per_hour(40.0)
///     .avg_pages_per_book(300.0)
///     .country_code("us")
///     .gender(Gender::Female)
///     .build();
///
/// let result = estimate().input(&input).table(&table).call();
/// assert_eq!(result.life_expectancy_label, "US · female");
/// assert_eq!(result.remaining_years_model, 52.0);
/// # ReadLifeResult::Ok(())
/// ```
///
/// ## Explicit expected age
/// ```rust
/// # use readlife::prelude::*;
/// let table = LifeExpectancyTable::new();
/// let input = ReadingGoalInput::builder()
///     .current_age(40.0)
///     .minutes(20.0)
///     .pages_per_hour(30.0)
///     .avg_pages_per_book(250.0)
///     .build();
///
/// let result = estimate().input(&input).table(&table).expected_age(90.0).call();
/// assert_eq!(result.years_left, 50.0);
/// # ReadLifeResult::Ok(())
/// ```
#[builder]
pub fn estimate(
    input: &ReadingGoalInput,
    table: &LifeExpectancyTable,
    expected_age: Option<f64>,
) -> LifetimeReadingResult {
    let current_age = input.current_age;
    let country_code = input.country_code.as_deref();

    // R: remaining years model
    let (remaining_years, life_expectancy_label) = match expected_age {
        Some(age) => (age - current_age, format!("custom expectancy ({age})")),
        None => (
            table
                .remaining_years()
                .age(current_age)
                .maybe_country_code(country_code)
                .maybe_gender(input.gender)
                .call(),
            build_life_expectancy_label(country_code, input.gender),
        ),
    };

    let years_left = remaining_years.max(0.0);
    let daily_minutes = input.daily_minutes();
    let days_left = (years_left * DAYS_IN_YEAR).round();
    let energy_factor = get_energy_factor(current_age);
    let total_readable_hours = days_left * daily_minutes * energy_factor / MINUTES_PER_HOUR;
    let total_pages = total_readable_hours * input.pages_per_hour;
    let total_books = if input.avg_pages_per_book > 0.0 {
        (total_pages / input.avg_pages_per_book).floor().max(0.0)
    } else {
        0.0
    };

    LifetimeReadingResult {
        goal_type: input.goal_type_or_default(),
        current_age,
        expected_age: current_age + remaining_years,
        years_left,
        days_left,
        daily_minutes,
        energy_factor,
        total_readable_hours,
        total_pages,
        total_books,
        pages_per_hour: input.pages_per_hour,
        avg_pages_per_book: input.avg_pages_per_book,
        remaining_years_model: remaining_years,
        life_expectancy_label,
    }
}

/// Project every input against the same table. Results keep the input order.
pub fn estimate_many(
    inputs: &[ReadingGoalInput],
    table: &LifeExpectancyTable,
) -> Vec<LifetimeReadingResult> {
    inputs
        .iter()
        .map(|input| estimate().input(input).table(table).call())
        .collect()
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::le_table::{AgeBand, GLOBAL_KEY, LifeExpectancyEntry};
    use crate::params::{Cadence, GoalType};
    use approx::assert_abs_diff_eq;

    fn sample_table() -> LifeExpectancyTable {
        LifeExpectancyTable::new()
            .with_entry(
                GLOBAL_KEY,
                Gender::All,
                LifeExpectancyEntry::new(73.2)
                    .with_band(AgeBand::Age0To19, 61.7)
                    .with_band(AgeBand::Age20To39, 46.8)
                    .with_band(AgeBand::Age40To59, 29.9)
                    .with_band(AgeBand::Age60To79, 16.4),
            )
            .with_entry(
                "US",
                Gender::Female,
                LifeExpectancyEntry::new(81.1)
                    .with_band(AgeBand::Age20To39, 51.9)
                    .with_band(AgeBand::Age60To79, 21.3),
            )
            .with_entry(
                "US",
                Gender::All,
                LifeExpectancyEntry::new(78.5).with_band(AgeBand::Age20To39, 49.0),
            )
    }

    fn input_at(age: f64) -> ReadingGoalInput {
        ReadingGoalInput::builder()
            .current_age(age)
            .minutes(30.0)
            .pages_per_hour(40.0)
            .avg_pages_per_book(300.0)
            .build()
    }

    #[test]
    fn test_energy_factor_breakpoints() {
        assert_eq!(get_energy_factor(0.0), 1.0);
        assert_eq!(get_energy_factor(49.99), 1.0);
        assert_eq!(get_energy_factor(50.0), 0.8);
        assert_eq!(get_energy_factor(65.0), 0.8);
        assert_eq!(get_energy_factor(65.01), 0.6);
        assert_eq!(get_energy_factor(120.0), 0.6);
    }

    #[test]
    fn test_energy_factor_is_non_increasing() {
        let mut previous = get_energy_factor(-10.0);
        for tenth in -100..1_500 {
            let factor = get_energy_factor(f64::from(tenth) / 10.0);
            assert!([1.0, 0.8, 0.6].contains(&factor));
            assert!(factor <= previous);
            previous = factor;
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(build_life_expectancy_label(None, None), "global average");
        assert_eq!(
            build_life_expectancy_label(None, Some(Gender::Male)),
            "global average"
        );
        assert_eq!(
            build_life_expectancy_label(Some(" us "), Some(Gender::Female)),
            "US · female"
        );
        assert_eq!(
            build_life_expectancy_label(Some("us"), Some(Gender::All)),
            "US average expectancy"
        );
        assert_eq!(
            build_life_expectancy_label(Some("fr"), None),
            "FR average expectancy"
        );
        assert_eq!(build_life_expectancy_label(Some("  "), None), "global average");
    }

    #[test]
    fn test_age_30_daily_global() {
        let result = estimate().input(&input_at(30.0)).table(&sample_table()).call();

        let r = 46.8;
        let days_left = (r * 365.0_f64).round();
        let hours = days_left * 30.0 * 1.0 / 60.0;
        let pages = hours * 40.0;

        assert_eq!(result.goal_type, GoalType::Reading);
        assert_abs_diff_eq!(result.remaining_years_model, r);
        assert_abs_diff_eq!(result.expected_age, 76.8, epsilon = 1e-9);
        assert_eq!(result.days_left, 17_082.0);
        assert_eq!(result.days_left, days_left);
        assert_eq!(result.daily_minutes, 30.0);
        assert_eq!(result.energy_factor, 1.0);
        assert_abs_diff_eq!(result.total_readable_hours, hours);
        assert_abs_diff_eq!(result.total_pages, pages);
        assert_eq!(result.total_books, (pages / 300.0).floor());
        assert_eq!(result.total_books, 1_138.0);
        assert_eq!(result.life_expectancy_label, "global average");
    }

    #[test]
    fn test_age_70_uses_last_band_and_low_energy() {
        let result = estimate().input(&input_at(70.0)).table(&sample_table()).call();
        assert_eq!(result.energy_factor, 0.6);
        assert_abs_diff_eq!(result.remaining_years_model, 16.4);
        assert_eq!(result.days_left, 5_986.0);
    }

    #[test]
    fn test_weekly_cadence() {
        let mut input = input_at(30.0);
        input.cadence = Cadence::Weekly;
        input.minutes = 140.0;
        let result = estimate().input(&input).table(&sample_table()).call();
        assert_eq!(result.daily_minutes, 20.0);
    }

    #[test]
    fn test_country_and_gender_specific() {
        let mut input = input_at(30.0);
        input.country_code = Some("us".to_string());
        input.gender = Some(Gender::Female);
        let result = estimate().input(&input).table(&sample_table()).call();
        assert_eq!(result.life_expectancy_label, "US · female");
        assert_abs_diff_eq!(result.remaining_years_model, 51.9);
    }

    #[test]
    fn test_unknown_country_uses_global_value() {
        let mut input = input_at(30.0);
        input.country_code = Some("ZZ".to_string());
        let result = estimate().input(&input).table(&sample_table()).call();
        assert_abs_diff_eq!(result.remaining_years_model, 46.8);
        assert_eq!(result.life_expectancy_label, "ZZ average expectancy");
    }

    #[test]
    fn test_no_global_entry_uses_default_expected_age() {
        let table = LifeExpectancyTable::new();
        let result = estimate().input(&input_at(30.0)).table(&table).call();
        assert_eq!(result.remaining_years_model, 50.0);
        assert_eq!(result.expected_age, 80.0);
        assert_eq!(result.days_left, 18_250.0);

        let result = estimate().input(&input_at(90.0)).table(&table).call();
        assert_eq!(result.remaining_years_model, 0.0);
        assert_eq!(result.days_left, 0.0);
        assert_eq!(result.total_books, 0.0);
    }

    #[test]
    fn test_zero_or_negative_book_length_gives_no_books() {
        let table = sample_table();
        for pages in [0.0, -250.0] {
            let mut input = input_at(30.0);
            input.avg_pages_per_book = pages;
            let result = estimate().input(&input).table(&table).call();
            assert_eq!(result.total_books, 0.0);
            assert!(result.total_pages > 0.0);
        }
    }

    #[test]
    fn test_huge_book_counts_are_not_saturated() {
        let table = LifeExpectancyTable::new();
        let mut input = input_at(30.0);
        input.avg_pages_per_book = 1e-300;
        let result = estimate().input(&input).table(&table).call();

        // 50 years · 365 days · 30 min at 40 pages per hour
        assert_eq!(result.days_left, 18_250.0);
        assert_abs_diff_eq!(result.total_pages, 365_000.0);
        assert!(result.total_books.is_finite());
        assert!(result.total_books > u64::MAX as f64);
        assert_abs_diff_eq!(result.total_books / 3.65e305, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_infinite_remaining_years_propagate() {
        let table = LifeExpectancyTable::new().with_entry(
            GLOBAL_KEY,
            Gender::All,
            LifeExpectancyEntry::new(73.0).with_band(AgeBand::Age20To39, f64::INFINITY),
        );
        let result = estimate().input(&input_at(30.0)).table(&table).call();

        assert_eq!(result.years_left, f64::INFINITY);
        assert_eq!(result.days_left, f64::INFINITY);
        assert_eq!(result.total_pages, f64::INFINITY);
        assert_eq!(result.total_books, f64::INFINITY);
    }

    #[test]
    fn test_negative_values_propagate_without_panicking() {
        let table = sample_table();
        let mut input = input_at(-5.0);
        input.minutes = -30.0;
        let result = estimate().input(&input).table(&table).call();

        // Negative age matches no band and resolves to the last band
        assert_abs_diff_eq!(result.remaining_years_model, 16.4);
        assert_abs_diff_eq!(result.expected_age, 11.4, epsilon = 1e-9);
        assert!(result.total_pages < 0.0);
        assert_eq!(result.total_books, 0.0);
    }

    #[test]
    fn test_expected_age_override_bypasses_table() {
        let table = sample_table();
        let result = estimate()
            .input(&input_at(30.0))
            .table(&table)
            .expected_age(85.0)
            .call();
        assert_eq!(result.remaining_years_model, 55.0);
        assert_eq!(result.years_left, 55.0);
        assert_eq!(result.days_left, 20_075.0);
        assert_eq!(result.life_expectancy_label, "custom expectancy (85)");

        // Already past the expected age
        let result = estimate()
            .input(&input_at(90.0))
            .table(&table)
            .expected_age(85.0)
            .call();
        assert_eq!(result.remaining_years_model, -5.0);
        assert_eq!(result.years_left, 0.0);
        assert_eq!(result.days_left, 0.0);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let table = sample_table();
        let mut input = input_at(52.5);
        input.country_code = Some("US".to_string());
        let first = estimate().input(&input).table(&table).call();
        let second = estimate().input(&input).table(&table).call();
        assert_eq!(first, second);
        assert_eq!(first.total_pages.to_bits(), second.total_pages.to_bits());
    }

    #[test]
    fn test_estimate_many_keeps_order() {
        let table = sample_table();
        let inputs = vec![input_at(30.0), input_at(70.0), input_at(10.0)];
        let results = estimate_many(&inputs, &table);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].energy_factor, 1.0);
        assert_eq!(results[1].energy_factor, 0.6);
        assert_abs_diff_eq!(results[2].remaining_years_model, 61.7);
    }
}
