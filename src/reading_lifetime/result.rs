use crate::ReadLifeResult;
use crate::params::GoalType;
use polars::prelude::*;

/// Lifetime reading projection. Derived entirely from one input and the table.
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeReadingResult {
    pub goal_type: GoalType,
    pub current_age: f64,
    /// `current_age + remaining_years_model`
    pub expected_age: f64,
    /// Remaining years clamped at 0.
    pub years_left: f64,
    /// Whole days, kept as `f64` so huge or infinite spans are not saturated.
    pub days_left: f64,
    pub daily_minutes: f64,
    pub energy_factor: f64,
    pub total_readable_hours: f64,
    pub total_pages: f64,
    /// Whole books, `floor(total_pages / avg_pages_per_book)`.
    pub total_books: f64,
    pub pages_per_hour: f64,
    pub avg_pages_per_book: f64,
    /// Raw remaining years, before clamping.
    pub remaining_years_model: f64,
    /// Which data the remaining years came from, e.g. "US · female".
    pub life_expectancy_label: String,
}

impl LifetimeReadingResult {
    /// Collect results into a DataFrame, one row per result.
    ///
    /// # Example
    /// ```rust
    /// # use readlife::prelude::*;
    /// let table = LifeExpectancyTable::new();
    /// let inputs: Vec<ReadingGoalInput> = [25.0, 45.0, 65.0]
    ///     .into_iter()
    ///     .map(|age| {
    ///         ReadingGoalInput::builder()
    ///             .current_age(age)
    ///             .minutes(30.0)
    ///             .pages_per_hour(40.0)
    ///             .avg_pages_per_book(300.0)
    ///             .build()
    ///     })
    ///     .collect();
    /// let results = estimate_many(&inputs, &table);
    /// let df = LifetimeReadingResult::to_df(&results)?;
    /// assert_eq!(df.shape(), (3, 14));
    /// # ReadLifeResult::Ok(())
    /// ```
    pub fn to_df(results: &[LifetimeReadingResult]) -> ReadLifeResult<DataFrame> {
        let f64_col = |name: &str, f: fn(&LifetimeReadingResult) -> f64| {
            Series::new(name.into(), results.iter().map(f).collect::<Vec<f64>>()).into_column()
        };
        let str_col = |name: &str, f: fn(&LifetimeReadingResult) -> String| {
            Series::new(name.into(), results.iter().map(f).collect::<Vec<String>>()).into_column()
        };

        let df = DataFrame::new(vec![
            str_col("goal_type", |r| r.goal_type.to_string()),
            f64_col("current_age", |r| r.current_age),
            f64_col("expected_age", |r| r.expected_age),
            f64_col("years_left", |r| r.years_left),
            f64_col("days_left", |r| r.days_left),
            f64_col("daily_minutes", |r| r.daily_minutes),
            f64_col("energy_factor", |r| r.energy_factor),
            f64_col("total_readable_hours", |r| r.total_readable_hours),
            f64_col("total_pages", |r| r.total_pages),
            f64_col("total_books", |r| r.total_books),
            f64_col("pages_per_hour", |r| r.pages_per_hour),
            f64_col("avg_pages_per_book", |r| r.avg_pages_per_book),
            f64_col("remaining_years_model", |r| r.remaining_years_model),
            str_col("life_expectancy_label", |r| r.life_expectancy_label.clone()),
        ])?;

        Ok(df)
    }
}
