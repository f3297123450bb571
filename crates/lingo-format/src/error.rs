#![forbid(unsafe_code)]

/// Errors raised when a value cannot be formatted with the given options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Options that contradict each other or are out of range.
    #[error("invalid format options: {0}")]
    InvalidOptions(String),
    /// `style: currency` without a currency code.
    #[error("currency style requires a currency code")]
    MissingCurrency,
    /// A currency code that is not three ASCII letters.
    #[error("invalid currency code `{0}`")]
    InvalidCurrency(String),
    /// A time zone name not present in the IANA database.
    #[error("unknown time zone `{0}`")]
    InvalidTimeZone(String),
    /// An instant whose wall-clock time in the target zone is not representable.
    #[error("instant {0} is out of range in the target time zone")]
    OutOfRange(String),
}
