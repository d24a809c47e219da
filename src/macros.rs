/// Macro to create a LifeExpectancyTable from inline columns.
/// Usage:
/// ```rust
/// # use readlife::prelude::*;
/// let table = readlife::ledf! {
///     "country" => ["global", "US"],
///     "gender" => ["all", "female"],
///     "at_birth" => [73.0, 81.0],
///     "20-39" => [47.0, 52.0],
/// }?;
/// assert_eq!(table.countries(), vec!["US"]);
/// # ReadLifeResult::Ok(())
/// ```
#[macro_export]
macro_rules! ledf {
    ($($name:expr => $val:expr),+ $(,)?) => {{
        use $crate::le_table::LifeExpectancyTable;
        use $crate::le_table::le_data::LifeExpectancyData;
        use polars::prelude::df;
        let df_result = df! { $($name => $val),+ };
        match df_result {
            Ok(df) => LifeExpectancyData::from_df(df)
                .and_then(|data| LifeExpectancyTable::from_data(&data)),
            Err(e) => Err(e.into()),
        }
    }};
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use crate::le_table::{AgeBand, Gender};

    #[test]
    fn test_ledf_macro() {
        let table = ledf! {
            "country" => ["global", "GB", "GB"],
            "gender" => ["all", "male", "female"],
            "at_birth" => [73.0, 79.0, 83.0],
            "40-59" => [30.0, 33.5, 36.8],
        }
        .expect("Failed to create LifeExpectancyTable from macro");

        assert!(table.has_global());
        assert_eq!(table.countries(), vec!["GB"]);
        let entry = table.entry("gb", Gender::Female).unwrap();
        assert_eq!(entry.remaining_years(AgeBand::Age40To59), Some(36.8));
        assert_eq!(entry.remaining_years(AgeBand::Age20To39), None);
    }

    #[test]
    fn test_ledf_macro_rejects_invalid_data() {
        let result = ledf! {
            "country" => ["global"],
            "gender" => ["nobody"],
            "at_birth" => [73.0],
            "40-59" => [30.0],
        };
        assert!(result.is_err());
    }
}
