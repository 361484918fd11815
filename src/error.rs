//! Error types for anyrow

use thiserror::Error;

/// Result type alias for anyrow operations
pub type AnyrowResult<T> = Result<T, AnyrowError>;

/// Error types for record access and statement synthesis
#[derive(Debug, Error)]
pub enum AnyrowError {
    /// Typed getter invoked on a column whose current value is NULL
    #[error("Null value in column '{0}'")]
    NullValue(String),

    /// Getter invoked on a column name not present on the record
    #[error("Invalid column '{0}'")]
    InvalidColumn(String),

    /// Stored bytes cannot be coerced to the requested type
    #[error("Unsupported value in column '{0}'")]
    UnsupportedValue(String),

    /// Mutation attempted on a record with no declared primary-key fields
    #[error("Primary key not set")]
    PrimaryKeyNotSet,

    /// A declared primary-key field has no value on the record
    #[error("Invalid primary key: no value for column '{0}'")]
    PrimaryKeyInvalid(String),

    /// Mutation attempted on a record with no declared table name
    #[error("Table not set")]
    TableNotSet,

    /// Column text is not a valid integer for the requested width
    #[error("Cannot parse column '{column}' as an integer: {source}")]
    Parse {
        column: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Error surfaced verbatim from the executor backend
    #[error("Backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AnyrowError {
    /// Create a null-value error for a specific column
    pub fn null_value(column: impl Into<String>) -> Self {
        Self::NullValue(column.into())
    }

    /// Create an invalid-column error
    pub fn invalid_column(column: impl Into<String>) -> Self {
        Self::InvalidColumn(column.into())
    }

    /// Create an unsupported-value error for a specific column
    pub fn unsupported_value(column: impl Into<String>) -> Self {
        Self::UnsupportedValue(column.into())
    }

    /// Create a parse error for a specific column
    pub fn parse(column: impl Into<String>, source: std::num::ParseIntError) -> Self {
        Self::Parse {
            column: column.into(),
            source,
        }
    }

    /// Wrap an arbitrary backend error
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    /// Check if this is a null-value error
    pub fn is_null_value(&self) -> bool {
        matches!(self, Self::NullValue(_))
    }

    /// Check if this is an invalid-column error
    pub fn is_invalid_column(&self) -> bool {
        matches!(self, Self::InvalidColumn(_))
    }

    /// Check if this is a primary-key error (not set or invalid)
    pub fn is_primary_key(&self) -> bool {
        matches!(self, Self::PrimaryKeyNotSet | Self::PrimaryKeyInvalid(_))
    }

    /// Check if this error came from the executor backend
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}
