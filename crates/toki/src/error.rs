use std::num::ParseIntError;

/// Errors raised by the calendar facility while formatting or parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("year outside of range [0,9999]")]
    YearOutOfRange,
    #[error("timezone hour outside of range [0,23]")]
    ZoneHourOutOfRange,
    #[error("invalid pattern {0:?}")]
    InvalidPattern(String),
    #[error("epoch value {0} is outside the representable calendar range")]
    EpochOutOfRange(i64),
    #[error("zone offset of {0} seconds is not representable")]
    InvalidOffset(i32),
    #[error("calendar fields do not name a valid date and time")]
    InvalidDate,
    #[error("leap second is not representable")]
    LeapSecond,
    #[error("instant could not be rendered with pattern {0:?}")]
    Format(String),
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Errors surfaced by the marshal / unmarshal engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokiError {
    /// Decimal parse failure for one of the epoch layouts.
    #[error("parsing {text:?} as an epoch integer: {source}")]
    MalformedInteger {
        text: String,
        #[source]
        source: ParseIntError,
    },
    /// JSON input for a string layout was not delimited by quotes.
    #[error("Toki.UnmarshalJSON: input is not a JSON string")]
    NotAJsonString,
    #[error(transparent)]
    DelegatedFormat(CalendarError),
    #[error(transparent)]
    DelegatedParse(CalendarError),
}

impl TokiError {
    /// Build a [`TokiError::MalformedInteger`] from the raw input bytes.
    pub(crate) fn malformed(data: &[u8], source: ParseIntError) -> Self {
        Self::MalformedInteger {
            text: String::from_utf8_lossy(data).into_owned(),
            source,
        }
    }
}

pub type CalendarResult<T> = Result<T, CalendarError>;

pub type TokiResult<T> = Result<T, TokiError>;
