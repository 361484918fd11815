//! The value cell: one column value in canonical byte form.
//!
//! Every value a record holds is either NULL or a byte sequence carrying the
//! value's textual/binary form. The bytes are the single source of truth for
//! every typed read; nothing is parsed eagerly or cached. Values written
//! programmatically (integers, floats, timestamps) are normalized to their
//! decimal/formatted text before storage, so a value set and then read back
//! through a typed getter always round-trips through text.

use crate::error::{AnyrowError, AnyrowResult};
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A single column value: NULL, or canonical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// SQL NULL
    #[default]
    Null,
    /// The value's canonical byte form (text for anything set via a typed
    /// conversion, raw bytes for binary columns)
    Bytes(Bytes),
}

impl Value {
    /// Whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The raw bytes, or `None` for NULL.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Null => None,
            Self::Bytes(b) => Some(b),
        }
    }

    /// Decode the bytes as UTF-8 text.
    ///
    /// `column` is only used for error context. Returns
    /// [`AnyrowError::NullValue`] on NULL and [`AnyrowError::UnsupportedValue`]
    /// when the stored bytes are not valid UTF-8.
    pub fn as_str(&self, column: &str) -> AnyrowResult<&str> {
        match self {
            Self::Null => Err(AnyrowError::null_value(column)),
            Self::Bytes(b) => {
                std::str::from_utf8(b).map_err(|_| AnyrowError::unsupported_value(column))
            }
        }
    }

    /// Parse the text form as a base-10 signed 64-bit integer.
    pub fn as_i64(&self, column: &str) -> AnyrowResult<i64> {
        self.as_str(column)?
            .parse()
            .map_err(|e| AnyrowError::parse(column, e))
    }

    /// Parse the text form as a base-10 unsigned 64-bit integer.
    pub fn as_u64(&self, column: &str) -> AnyrowResult<u64> {
        self.as_str(column)?
            .parse()
            .map_err(|e| AnyrowError::parse(column, e))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Bytes(Bytes::copy_from_slice(v.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Bytes(Bytes::from(v.into_bytes()))
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(v))
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::from(if v { "true" } else { "false" })
    }
}

macro_rules! impl_from_display {
    ($($t:ty),+) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::from(v.to_string())
            }
        })+
    };
}

impl_from_display!(i8, i16, i32, i64, u16, u32, u64, f32, f64);

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::from(v.format("%Y-%m-%d").to_string())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::from(v.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::from(v.naive_utc())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_values_normalize_to_text() {
        assert_eq!(Value::from(666i64).as_bytes(), Some(b"666".as_ref()));
        assert_eq!(Value::from(-1i32).as_bytes(), Some(b"-1".as_ref()));
        assert_eq!(Value::from(555.66f64).as_bytes(), Some(b"555.66".as_ref()));
        assert_eq!(Value::from(true).as_bytes(), Some(b"true".as_ref()));
    }

    #[test]
    fn text_and_bytes_stored_verbatim() {
        assert_eq!(Value::from("abc").as_str("c").unwrap(), "abc");
        assert_eq!(
            Value::from(vec![0x01u8, 0x02]).as_bytes(),
            Some([0x01u8, 0x02].as_ref())
        );
    }

    #[test]
    fn option_maps_none_to_null() {
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::from(Some(5i64)).as_i64("c").unwrap(), 5);
    }

    #[test]
    fn integer_parse_covers_full_width() {
        assert_eq!(Value::from(i64::MIN).as_i64("c").unwrap(), i64::MIN);
        assert_eq!(Value::from(i64::MAX).as_i64("c").unwrap(), i64::MAX);
        assert_eq!(Value::from(u64::MAX).as_u64("c").unwrap(), u64::MAX);
    }

    #[test]
    fn parse_failures_carry_column_context() {
        let err = Value::from("not a number").as_i64("field_integer").unwrap_err();
        assert!(matches!(
            err,
            AnyrowError::Parse { ref column, .. } if column == "field_integer"
        ));

        // u64::MAX + 1 overflows the unsigned parse
        let err = Value::from("18446744073709551616").as_u64("c").unwrap_err();
        assert!(matches!(err, AnyrowError::Parse { .. }));

        // negatives are not valid unsigned input
        let err = Value::from(-1i64).as_u64("c").unwrap_err();
        assert!(matches!(err, AnyrowError::Parse { .. }));
    }

    #[test]
    fn null_reads_fail_with_null_value() {
        assert!(Value::Null.as_str("c").unwrap_err().is_null_value());
        assert!(Value::Null.as_i64("c").unwrap_err().is_null_value());
        assert!(Value::Null.as_u64("c").unwrap_err().is_null_value());
    }

    #[test]
    fn non_utf8_bytes_are_unsupported_as_text() {
        let v = Value::from(vec![0xffu8, 0xfe]);
        assert!(matches!(
            v.as_str("field_binary").unwrap_err(),
            AnyrowError::UnsupportedValue(ref c) if c == "field_binary"
        ));
    }

    #[test]
    fn timestamps_format_as_text() {
        let d = NaiveDate::from_ymd_opt(2020, 2, 3)
            .unwrap()
            .and_hms_opt(15, 30, 44)
            .unwrap();
        assert_eq!(Value::from(d).as_str("c").unwrap(), "2020-02-03 15:30:44");
    }
}
