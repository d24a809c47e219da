use super::spreadsheet_helpers::*;
use super::{AgeBand, Gender, LifeExpectancyEntry};
use crate::ReadLifeResult;
use crate::helpers::{is_global_key, normalize_country_code};
use calamine::{Reader, open_workbook_auto};
use polars::prelude::*;
use spreadsheet_ods::read_ods;
use std::collections::HashSet;

/// Text columns of a life expectancy sheet.
pub const TEXT_COLUMNS: [&str; 2] = ["country", "gender"];

/// Validated raw life expectancy data, one row per (country, gender).
///
/// # Schema
/// - `country` (str): country code, or `global` for the global average
/// - `gender` (str): `male`, `female` or `all`
/// - `at_birth` (f64): expected lifespan at birth
/// - `0-19`, `20-39`, `40-59`, `60-79` (f64, nullable): remaining years per age band,
///   at least one of them present
///
/// The loaders are optional conveniences for local data (DataFrames, XLSX/XLS and ODS files).
/// A [`LifeExpectancyTable`](super::LifeExpectancyTable) can equally be built in code.
#[derive(Debug, Clone)]
pub struct LifeExpectancyData {
    pub category: String,
    pub description: String,
    pub dataframe: DataFrame,
}

impl LifeExpectancyData {
    /// Create a new LifeExpectancyData instance with custom category and DataFrame.
    ///
    /// The DataFrame schema is validated first, then numeric columns are cast to f64.
    /// Country codes and genders are kept as given and normalized on lookup.
    ///
    /// # Errors
    /// - Empty DataFrame
    /// - Missing `country`, `gender` or `at_birth` column, or no age band column
    /// - Unknown gender values or blank country codes
    /// - Negative numeric values
    /// - Duplicate (country, gender) rows
    ///
    /// # Examples
    /// ```rust
    /// # use readlife::prelude::*;
    /// use polars::prelude::*;
    ///
    /// let df = df! {
    ///     "country" => ["global"],
    ///     "gender" => ["all"],
    ///     "at_birth" => [73.0],
    ///     "20-39" => [47.0],
    /// }?;
    ///
    /// let data = LifeExpectancyData::new("WHO".to_string(), "Global 2019".to_string(), df)?;
    /// assert_eq!(data.dataframe.height(), 1);
    /// # ReadLifeResult::Ok(())
    /// ```
    pub fn new(category: String, description: String, dataframe: DataFrame) -> ReadLifeResult<Self> {
        // Structure first, values after casting
        validate_df_schema(&dataframe)?;
        let dataframe = setup_dataframe_to_correct_schema(dataframe)
            .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;
        validate_df_values(&dataframe)?;

        Ok(Self {
            category,
            description,
            dataframe,
        })
    }

    /// Create LifeExpectancyData from a DataFrame with a default category.
    ///
    /// # Examples
    /// ```rust
    /// # use readlife::prelude::*;
    /// use polars::prelude::*;
    ///
    /// let df = df! {
    ///     "country" => ["global", "US", "US"],
    ///     "gender" => ["all", "male", "female"],
    ///     "at_birth" => [73.0, 76.0, 81.0],
    ///     "60-79" => [16.0, 18.0, 21.0],
    /// }?;
    /// let data = LifeExpectancyData::from_df(df)?;
    /// assert_eq!(data.category, "Custom Life Expectancy Data");
    /// # ReadLifeResult::Ok(())
    /// ```
    pub fn from_df(df: DataFrame) -> ReadLifeResult<Self> {
        let category = "Custom Life Expectancy Data".to_string();
        let description = "Created from DataFrame".to_string();
        Self::new(category, description, df)
    }

    /// Parse life expectancy data from an XLSX/XLS file using calamine.
    ///
    /// The first row holds the headers (trimmed, lowercased). Data rows are read until the
    /// first fully empty row.
    ///
    /// # Errors
    /// - File not found or not readable
    /// - Sheet not found or empty
    /// - Cells that cannot be read as the column type
    /// - Schema validation errors (via `new`)
    ///
    /// # Examples
    /// ```rust, ignore
    /// # use readlife::prelude::*;
    /// let data = LifeExpectancyData::from_xlsx("data/life_expectancy.xlsx", "2019")?;
    /// # ReadLifeResult::Ok(())
    /// ```
    pub fn from_xlsx(xlsx_file_path_str: &str, sheet_name: &str) -> ReadLifeResult<Self> {
        let mut workbook = open_workbook_auto(xlsx_file_path_str)
            .map_err(|e| format!("Failed to open XLSX file '{xlsx_file_path_str}': {e}"))?;

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| format!("Failed to read sheet '{sheet_name}': {e}"))?;

        let df = df_from_excel_range(&range, sheet_name)?;
        let category = "Custom Life Expectancy Data".to_string();
        let description = format!("Created from XLSX file {xlsx_file_path_str}, sheet {sheet_name}.");
        Self::new(category, description, df)
    }

    /// Parse life expectancy data from an ODS file using spreadsheet-ods.
    ///
    /// Same layout rules as [`LifeExpectancyData::from_xlsx`].
    ///
    /// # Examples
    /// ```rust, ignore
    /// # use readlife::prelude::*;
    /// let data = LifeExpectancyData::from_ods("data/life_expectancy.ods", "2019")?;
    /// # ReadLifeResult::Ok(())
    /// ```
    pub fn from_ods(ods_file_path_str: &str, sheet_name: &str) -> ReadLifeResult<Self> {
        let workbook = read_ods(ods_file_path_str).map_err(|e| -> Box<dyn std::error::Error> {
            format!("Failed to open ODS file '{ods_file_path_str}': {e}").into()
        })?;

        let sheet = (0..workbook.num_sheets())
            .map(|i| workbook.sheet(i))
            .find(|sheet| sheet.name() == sheet_name)
            .ok_or_else(|| format!("Sheet '{sheet_name}' not found in ODS file"))?;

        let (max_row, _) = sheet.used_grid_size();
        if max_row < 1 {
            return Err(format!("Sheet '{sheet_name}' is empty").into());
        }

        let headers = parse_ods_headers(sheet, 0)?;
        let columns = parse_ods_data(sheet, 1, &headers, &TEXT_COLUMNS)?;
        let df = sheet_columns_to_df(&headers, columns)?;

        let category = "Custom Life Expectancy Data".to_string();
        let description = format!("Created from ODS file {ods_file_path_str}, sheet {sheet_name}.");
        Self::new(category, description, df)
    }

    /// Age band columns present in the data, in band order.
    pub fn age_bands(&self) -> Vec<AgeBand> {
        present_age_bands(&self.dataframe)
    }

    /// Rows as table entries: `(country, gender, entry)`.
    ///
    /// Null band values are left out of the entry.
    pub fn entries(&self) -> ReadLifeResult<Vec<(String, Gender, LifeExpectancyEntry)>> {
        let df = &self.dataframe;
        let countries = df.column("country")?.str()?;
        let genders = df.column("gender")?.str()?;
        let at_birth = df.column("at_birth")?.f64()?;

        let bands = self.age_bands();
        let band_columns = bands
            .iter()
            .map(|band| Ok((*band, df.column(band.label())?.f64()?)))
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut entries = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let country = countries
                .get(row)
                .ok_or_else(|| format!("Missing country at row {row}"))?;
            let gender: Gender = genders
                .get(row)
                .ok_or_else(|| format!("Missing gender at row {row}"))?
                .parse()?;

            let mut entry = LifeExpectancyEntry::new(at_birth.get(row).unwrap_or(f64::NAN));
            for (band, values) in &band_columns {
                if let Some(years) = values.get(row) {
                    entry = entry.with_band(*band, years);
                }
            }
            entries.push((country.to_string(), gender, entry));
        }

        Ok(entries)
    }
}

// ================================================
// PRIVATE FUNCTIONS
// ================================================

fn df_from_excel_range(
    range: &calamine::Range<calamine::Data>,
    sheet_name: &str,
) -> ReadLifeResult<DataFrame> {
    if range.is_empty() {
        return Err(format!("Sheet '{sheet_name}' is empty").into());
    }
    let headers = parse_excel_headers(range, 0)?;
    let columns = parse_excel_data(range, 1, &headers, &TEXT_COLUMNS)?;
    sheet_columns_to_df(&headers, columns)
}

fn present_age_bands(df: &DataFrame) -> Vec<AgeBand> {
    let col_names = df.get_column_names();
    AgeBand::ALL
        .into_iter()
        .filter(|band| col_names.iter().any(|name| name.as_str() == band.label()))
        .collect()
}

fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    let mut names = vec!["at_birth".to_string()];
    names.extend(present_age_bands(df).iter().map(|b| b.label().to_string()));
    names
}

/// Validate column layout and types before casting.
fn validate_df_schema(df: &DataFrame) -> ReadLifeResult<()> {
    if df.height() == 0 {
        return Err("DataFrame must contain at least one row of data".into());
    }

    let col_names = df.get_column_names();
    for required in ["country", "gender", "at_birth"] {
        if !col_names.iter().any(|name| name.as_str() == required) {
            return Err(format!("DataFrame is missing required column '{required}'").into());
        }
    }

    if present_age_bands(df).is_empty() {
        return Err("DataFrame must have at least one age band column ('0-19', '20-39', '40-59', '60-79')".into());
    }

    for text_col in TEXT_COLUMNS {
        if df.column(text_col)?.dtype() != &DataType::String {
            return Err(format!("Column '{text_col}' must be a string column").into());
        }
    }

    for num_col in numeric_column_names(df) {
        let dtype = df.column(&num_col)?.dtype();
        if !(dtype.is_float() || dtype.is_integer()) {
            return Err(format!("Column '{num_col}' must be f64 convertible").into());
        }
    }

    Ok(())
}

/// Validate values once numeric columns are f64.
fn validate_df_values(df: &DataFrame) -> ReadLifeResult<()> {
    for num_col in numeric_column_names(df) {
        if df.column(&num_col)?.f64()?.min().unwrap_or(0.0) < 0.0 {
            return Err(format!("Column '{num_col}' must be non-negative").into());
        }
    }

    let countries = df.column("country")?.str()?;
    let genders = df.column("gender")?.str()?;
    let mut seen = HashSet::new();
    for (row, (country, gender)) in countries.into_iter().zip(genders.into_iter()).enumerate() {
        let country = country.ok_or_else(|| format!("Missing country at row {row}"))?;
        let key = if is_global_key(country) {
            country.trim().to_lowercase()
        } else {
            normalize_country_code(Some(country))
                .ok_or_else(|| format!("Blank country code at row {row}"))?
        };

        let gender: Gender = gender
            .ok_or_else(|| format!("Missing gender at row {row}"))?
            .parse()
            .map_err(|e| format!("{e} at row {row}"))?;

        if !seen.insert((key.clone(), gender)) {
            return Err(format!("Duplicate entry for country '{key}' and gender '{gender}'").into());
        }
    }

    Ok(())
}

fn setup_dataframe_to_correct_schema(df: DataFrame) -> PolarsResult<DataFrame> {
    // Assumes validate_df_schema has passed
    let exprs: Vec<Expr> = numeric_column_names(&df)
        .iter()
        .map(|name| col(name.as_str()).cast(DataType::Float64))
        .collect();

    df.lazy().with_columns(exprs).collect()
}
