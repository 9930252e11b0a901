// Display helpers shared by the engine and anything rendering its output.
use thiserror::Error;

/// Suffixes for successive powers of 1000.
pub const MAGNITUDE_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("value {value} needs magnitude {magnitude}, beyond the largest suffix 'T'")]
    MagnitudeOverflow { value: f64, magnitude: usize },

    #[error("cannot format non-finite value {value}")]
    NonFinite { value: f64 },
}

/// Rounds to three significant figures. Goes through scientific notation so the
/// rounding happens on the decimal representation, not on binary fractions.
fn round_significant(value: f64) -> f64 {
    format!("{:.2e}", value).parse::<f64>().unwrap_or(value)
}

/// Compact human-readable number: `1234.0` -> `"1.23K"`, `1_500_000.0` -> `"1.5M"`.
///
/// Values at or above one quadrillion (after rounding) have no suffix and yield
/// `FormatError::MagnitudeOverflow`.
pub fn human_format(value: f64) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NonFinite { value });
    }

    let mut num = round_significant(value);
    let mut magnitude = 0;
    while num.abs() >= 1000.0 {
        magnitude += 1;
        num /= 1000.0;
    }

    let suffix = MAGNITUDE_SUFFIXES
        .get(magnitude)
        .ok_or(FormatError::MagnitudeOverflow { value, magnitude })?;

    let digits = format!("{:.6}", num);
    let digits = digits.trim_end_matches('0').trim_end_matches('.');
    Ok(format!("{}{}", digits, suffix))
}
