//! # ReadLife
//!
//! Estimate how many books a person can still read in their lifetime, combining reading habits
//! with actuarial life-expectancy data.
//!
//! ## Features
//! - **Pure & Total**: `estimate` never fails; missing data degrades to documented numeric defaults
//! - **Country & Gender Aware**: Remaining-years lookup with country/gender fallback to a global average
//! - **Flexible Data**: Build life expectancy tables in code, from DataFrames or Spreadsheets (ODS/XLSX)
//! - **Builder Pattern**: Calculations and inputs use builders with sensible defaults
//! - **Opt-in Validation**: UI layers can validate reading goals before estimating
//!
//! ## Quick Start
//!
//! ```rust
//! use readlife::prelude::*;
//!
//! let table = LifeExpectancyTable::new()
//!     .with_entry(
//!         GLOBAL_KEY,
//!         Gender::All,
//!         LifeExpectancyEntry::new(73.0)
//!             .with_band(AgeBand::Age0To19, 62.0)
//!             .with_band(AgeBand::Age20To39, 47.0)
//!             .with_band(AgeBand::Age40To59, 30.0)
//!             .with_band(AgeBand::Age60To79, 16.0),
//!     );
//!
//! let input = ReadingGoalInput::builder()
//!     .current_age(30.0)
//!     .minutes(30.0)
//!     .pages_per_hour(40.0)
//!     .avg_pages_per_book(300.0)
//!     .build();
//!
//! let result = estimate().input(&input).table(&table).call();
//!
//! println!("Books left: {}", result.total_books);
//! println!("Based on: {}", result.life_expectancy_label);
//! # ReadLifeResult::Ok(())
//! ```
//!
//! ## Supported Functions
//!
//! - **Projection**: `estimate`, `estimate_many`
//! - **Building blocks**: `get_energy_factor`, `build_life_expectancy_label`, `AgeBand::from_age`
//! - **Table lookup**: `LifeExpectancyTable::remaining_years`
//! - **Data loading**: `LifeExpectancyData::from_df`, `from_xlsx`, `from_ods` (optional conveniences)
//!
//! ## Notes
//! - Inputs are not validated by `estimate`; call `ReadingGoalInput::validate_all` first if needed
//! - Ages at or above 60 all share the open-ended `60-79` band
//! - Tables are read-only once built and can be shared freely between threads

pub type ReadLifeResult<T> = Result<T, Box<dyn std::error::Error>>;
pub mod helpers;
pub mod le_table;
pub mod macros;
pub mod params;
pub mod prelude;
pub mod reading_lifetime;
