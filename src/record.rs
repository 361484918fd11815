//! Dynamically-typed rows.
//!
//! A [`Record`] is a map from field name to [`Value`] plus the metadata a
//! mutation needs: the table it belongs to and the caller-declared primary-key
//! fields. The metadata is captured at construction and never changes; field
//! values are freely mutable. No static schema is involved anywhere — setting
//! a field that was never selected simply adds it.

use crate::error::{AnyrowError, AnyrowResult};
use crate::options::Options;
use crate::value::Value;
use std::collections::BTreeMap;

/// A dynamically-typed row of named values.
///
/// Produced by [`Session::select`], one per returned row, or built directly
/// for inserts and deletes:
///
/// ```
/// use anyrow::{Options, Record};
///
/// let mut user = Record::with_options(
///     Options::new().table("users").primary_key(["id"]),
/// );
/// user.set("id", 5i64);
/// user.set("username", "alice");
/// ```
///
/// [`Session::select`]: crate::Session::select
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: BTreeMap<String, Value>,
    primary_key: Vec<String>,
    table: String,
    auto_increment: bool,
}

impl Record {
    /// Create an empty record with no metadata.
    ///
    /// Such a record can hold values but is not eligible for
    /// [`create`](crate::Session::create) (no table) or
    /// [`save`](crate::Session::save)/[`delete`](crate::Session::delete)
    /// (no table, no primary key).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record carrying the metadata from `options`
    /// (table name, primary-key fields, auto-increment flag).
    ///
    /// Bind arguments on `options` are ignored; they only apply to queries.
    pub fn with_options(options: Options) -> Self {
        let (table, primary_key, auto_increment) = options.take_meta();
        Self {
            values: BTreeMap::new(),
            primary_key,
            table,
            auto_increment,
        }
    }

    /// The table this record targets. Empty means unset.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The declared primary-key fields, in declaration order.
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    /// Whether the table's primary key was declared auto-incrementing.
    pub fn auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Snapshot of the field names currently present, in no meaningful order.
    pub fn fields(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// Number of fields currently set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set a field, overwriting any previous value.
    ///
    /// Accepts anything convertible to [`Value`]: text and raw bytes are
    /// stored verbatim, `Option::None` stores NULL, and other typed values
    /// (integers, floats, timestamps) are converted to their canonical text
    /// form first, so a value set here reads back through the typed getters.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// The raw value of a field, or `None` if the field is absent.
    ///
    /// Note the distinction: an absent field returns `None` here, while a
    /// present-but-NULL field returns `Some(&Value::Null)`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether the named field is present and NULL.
    pub fn is_null(&self, name: &str) -> AnyrowResult<bool> {
        Ok(self.cell(name)?.is_null())
    }

    /// Read a field as text.
    pub fn string(&self, name: &str) -> AnyrowResult<String> {
        Ok(self.cell(name)?.as_str(name)?.to_string())
    }

    /// Read a field as a signed 64-bit integer.
    pub fn int64(&self, name: &str) -> AnyrowResult<i64> {
        self.cell(name)?.as_i64(name)
    }

    /// Read a field as an unsigned 64-bit integer.
    pub fn uint64(&self, name: &str) -> AnyrowResult<u64> {
        self.cell(name)?.as_u64(name)
    }

    /// Like [`string`](Self::string), but panics on failure.
    ///
    /// # Panics
    /// Panics if the field is absent, NULL, or not valid text. Only for
    /// callers that have already validated the record's shape.
    pub fn must_string(&self, name: &str) -> String {
        self.string(name)
            .unwrap_or_else(|e| panic!("must_string({name:?}): {e}"))
    }

    /// Like [`int64`](Self::int64), but panics on failure.
    ///
    /// # Panics
    /// Panics if the field is absent, NULL, or not a valid signed integer.
    pub fn must_int64(&self, name: &str) -> i64 {
        self.int64(name)
            .unwrap_or_else(|e| panic!("must_int64({name:?}): {e}"))
    }

    /// Like [`uint64`](Self::uint64), but panics on failure.
    ///
    /// # Panics
    /// Panics if the field is absent, NULL, or not a valid unsigned integer.
    pub fn must_uint64(&self, name: &str) -> u64 {
        self.uint64(name)
            .unwrap_or_else(|e| panic!("must_uint64({name:?}): {e}"))
    }

    /// Field iteration in map order. The synthesized column list and value
    /// list of a statement must agree, so both come from this one iterator.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn cell(&self, name: &str) -> AnyrowResult<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| AnyrowError::invalid_column(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_captured_at_construction() {
        let record = Record::with_options(
            Options::new()
                .table("test_table")
                .primary_key(["id"])
                .auto_increment(),
        );
        assert_eq!(record.table(), "test_table");
        assert_eq!(record.primary_key(), ["id".to_string()]);
        assert!(record.auto_increment());
        assert!(record.is_empty());
    }

    #[test]
    fn set_does_not_touch_metadata() {
        let mut record = Record::with_options(Options::new().table("t").primary_key(["id"]));
        record.set("id", 1i64);
        record.set("table", "something else entirely");
        assert_eq!(record.table(), "t");
        assert_eq!(record.primary_key(), ["id".to_string()]);
    }

    #[test]
    fn string_round_trip() {
        let mut record = Record::new();
        record.set("field_string", "field_string");
        assert_eq!(record.string("field_string").unwrap(), "field_string");
        assert_eq!(record.must_string("field_string"), "field_string");
    }

    #[test]
    fn int64_round_trip_across_full_range() {
        let mut record = Record::new();
        for n in [i64::MIN, -1, 0, 1, i64::MAX] {
            record.set("n", n);
            assert_eq!(record.int64("n").unwrap(), n);
        }
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut record = Record::new();
        record.set("field_string", "old value");
        record.set("field_string", "new value");
        assert_eq!(record.must_string("field_string"), "new value");
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn fields_snapshot_matches_what_was_set() {
        let mut record = Record::new();
        record.set("id", 1i64);
        record.set("alias", 555.66f64);
        let mut fields = record.fields();
        fields.sort_unstable();
        assert_eq!(fields, ["alias", "id"]);
    }

    #[test]
    fn absent_field_is_invalid_column() {
        let record = Record::new();
        assert!(record.string("missing").unwrap_err().is_invalid_column());
        assert!(record.int64("missing").unwrap_err().is_invalid_column());
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn null_field_is_null_value_not_empty_string() {
        let mut record = Record::new();
        record.set("field_string_nullable", None::<String>);
        assert!(
            record
                .string("field_string_nullable")
                .unwrap_err()
                .is_null_value()
        );
        assert!(record.is_null("field_string_nullable").unwrap());
        assert_eq!(record.get("field_string_nullable"), Some(&Value::Null));
    }

    #[test]
    #[should_panic(expected = "must_int64")]
    fn must_getter_panics_on_absent_field() {
        Record::new().must_int64("missing");
    }
}
