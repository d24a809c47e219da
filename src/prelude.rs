//! # ReadLife Prelude
//!
//! Conveniently re-exports the most common types and functions for reading lifetime estimates.
//! Import this module to access all primary ReadLife features with a single `use` statement.
//!
//! ## Example
//!
//! ```rust
//! # use readlife::prelude::*;
//! use polars::prelude::*;
//! let df = df! {
//!     "country" => ["global", "US"],
//!     "gender" => ["all", "female"],
//!     "at_birth" => [73.0, 81.0],
//!     "0-19" => [62.0, 70.0],
//!     "20-39" => [47.0, 52.0],
//!     "40-59" => [30.0, 36.0],
//!     "60-79" => [16.0, 20.0],
//! }?;
//! let data = LifeExpectancyData::from_df(df)?;
//! let table = LifeExpectancyTable::from_data(&data)?;
//! let input = ReadingGoalInput::builder()
//!     .current_age(30.0)
//!     .minutes(140.0)
//!     .cadence(Cadence::Weekly)
//!     .pages_per_hour(40.0)
//!     .avg_pages_per_book(300.0)
//!     .country_code("us")
//!     .gender(Gender::Female)
//!     .build();
//! let result = estimate().input(&input).table(&table).call();
//! println!("Books left: {}", result.total_books);
//! # ReadLifeResult::Ok(())
//! ```

// Package Result type for ReadLife functions
pub use crate::ReadLifeResult;

// Reading lifetime projection
pub use crate::reading_lifetime::*;

// Reading goal input
pub use crate::params::{Cadence, GoalType, ReadingGoalInput};

// Life expectancy table types
pub use crate::le_table::{AgeBand, GLOBAL_KEY, Gender, LifeExpectancyEntry, LifeExpectancyTable};

// Life expectancy raw data type
pub use crate::le_table::le_data::LifeExpectancyData;

// Most commonly used Polars types for working with life expectancy data
pub use polars::prelude::{DataFrame, LazyFrame, PolarsError, PolarsResult, Series};
