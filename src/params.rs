use crate::helpers::is_well_formed_country_code;
use crate::le_table::Gender;
use bon::Builder;
use garde::Validate;
use std::fmt;
use std::str::FromStr;

// =======================================
// ENUMS
// =======================================

/// Kind of lifetime goal. Only reading is defined for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GoalType {
    #[default]
    Reading,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Reading => "reading",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `minutes` is a daily or a weekly quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cadence {
    #[default]
    Daily,
    Weekly,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            other => Err(format!(
                "Unknown cadence '{other}', expected 'daily' or 'weekly'"
            )),
        }
    }
}

// =======================================
// READING GOAL INPUT
// =======================================

/// A person's reading habits and demographic context, built per estimate.
///
/// The estimator accepts any values; [`ReadingGoalInput::validate_all`] is an opt-in check for
/// callers (typically a UI layer) that want to reject nonsensical input up front.
#[derive(Debug, Clone, PartialEq, Validate, Builder)]
#[garde(allow_unvalidated)]
pub struct ReadingGoalInput {
    // Age in years, fractional ages allowed
    // Basic range validation (0-150 years old is reasonable)
    #[garde(range(min = 0.0, max = 150.0))]
    pub current_age: f64,

    // Reading minutes per day or per week depending on cadence
    #[garde(range(min = 0.0))]
    pub minutes: f64,

    #[builder(default)]
    pub cadence: Cadence,

    // Reading speed
    #[garde(range(min = 0.0))]
    pub pages_per_hour: f64,

    // Must be strictly positive to produce a book count
    #[garde(custom(validate_avg_pages_per_book))]
    pub avg_pages_per_book: f64,

    // Defaults to reading when unset
    pub goal_type: Option<GoalType>,

    // Case-insensitive, trimmed on lookup
    #[builder(into)]
    pub country_code: Option<String>,

    pub gender: Option<Gender>,
}

/// Custom validation function for avg_pages_per_book field
fn validate_avg_pages_per_book(value: &f64, _context: &()) -> garde::Result {
    if value.is_nan() || *value <= 0.0 {
        return Err(garde::Error::new(
            "avg_pages_per_book must be greater than 0.0 to estimate a number of books",
        ));
    }
    Ok(())
}

impl ReadingGoalInput {
    /// Goal type, defaulting to reading.
    pub fn goal_type_or_default(&self) -> GoalType {
        self.goal_type.unwrap_or_default()
    }

    /// Minutes read per day: `minutes` for daily cadence, `minutes / 7` for weekly.
    pub fn daily_minutes(&self) -> f64 {
        match self.cadence {
            Cadence::Daily => self.minutes,
            Cadence::Weekly => self.minutes / 7.0,
        }
    }

    /// Validate with cross-field validation using Result<(), garde::Report>
    pub fn validate_all(&self) -> Result<(), garde::Report> {
        // First run garde's built-in validations
        self.validate()?;

        // Then run our custom cross-field validations
        self.validate_custom_constraints()
    }

    /// Custom cross-field validations that garde can't handle with attributes
    fn validate_custom_constraints(&self) -> Result<(), garde::Report> {
        let mut report = garde::Report::new();
        let mut errors: ErrorVec = Vec::new();

        // Weekly minutes cannot exceed the minutes in a week
        let max_minutes = match self.cadence {
            Cadence::Daily => 24.0 * 60.0,
            Cadence::Weekly => 7.0 * 24.0 * 60.0,
        };
        if self.minutes > max_minutes {
            errors.push((
                "minutes",
                format!(
                    "{} minutes {} exceed the {max_minutes} minutes available",
                    self.minutes, self.cadence
                ),
            ));
        }

        // Blank country codes mean no country, anything else must look like a code
        if let Some(code) = &self.country_code {
            if !code.trim().is_empty() && !is_well_formed_country_code(code) {
                errors.push((
                    "country_code",
                    format!("country_code '{code}' must be 2 or 3 letters or 'global'"),
                ));
            }
        }

        for (path, message) in errors {
            report.append(garde::Path::new(path), garde::Error::new(message));
        }

        if report.is_empty() {
            Ok(())
        } else {
            Err(report)
        }
    }
}

type ErrorVec = Vec<(&'static str, String)>;
