use crate::le_table::GLOBAL_KEY;

// ================================================
// PUBLIC FUNCTIONS
// ================================================

/// Normalize a user supplied country code: trim whitespace and uppercase.
///
/// Returns `None` when the code is absent or blank, which means "no country context".
pub fn normalize_country_code(country_code: Option<&str>) -> Option<String> {
    let trimmed = country_code?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_uppercase())
}

/// Whether a table key refers to the reserved global entry (case-insensitive).
pub fn is_global_key(key: &str) -> bool {
    key.trim().eq_ignore_ascii_case(GLOBAL_KEY)
}

/// Whether a country code is 2 or 3 ASCII letters once trimmed, or the global key.
pub fn is_well_formed_country_code(country_code: &str) -> bool {
    let trimmed = country_code.trim();
    if is_global_key(trimmed) {
        return true;
    }
    (2..=3).contains(&trimmed.len()) && trimmed.chars().all(|c| c.is_ascii_alphabetic())
}
