//! Per-call session configuration.
//!
//! An [`Options`] value is the ephemeral context for a single session
//! operation: the bind arguments for the statement, plus the record metadata
//! (table name, primary-key fields, auto-increment flag) stamped onto every
//! record the call produces. Settings are plain fields behind builder methods;
//! repeating a setting overwrites the previous one, so the last call wins.

use crate::value::Value;

/// Configuration for a single session call (and for [`Record`] construction).
///
/// ```
/// use anyrow::Options;
///
/// let opts = Options::new()
///     .table("users")
///     .primary_key(["id"])
///     .auto_increment()
///     .args([666i64.into(), "alice".into()]);
/// ```
///
/// [`Record`]: crate::Record
#[derive(Debug, Clone, Default)]
pub struct Options {
    args: Vec<Value>,
    primary_key: Vec<String>,
    table: String,
    auto_increment: bool,
}

impl Options {
    /// Create an empty configuration: no args, no primary key, no table,
    /// auto-increment off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table name mutations will target.
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = name.into();
        self
    }

    /// Declare the primary-key fields, in order.
    ///
    /// Order is preserved: composite keys produce WHERE clauses with the
    /// fields in exactly this order. The key is declared by the caller, never
    /// inferred from the query or the database schema.
    pub fn primary_key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the target table's primary key as auto-incrementing.
    ///
    /// Only meaningful together with a single-field primary key; see
    /// [`Session::create`](crate::Session::create).
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Set the positional bind arguments for the statement.
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.args = args.into_iter().collect();
        self
    }

    pub(crate) fn bind_args(&self) -> &[Value] {
        &self.args
    }

    pub(crate) fn take_meta(self) -> (String, Vec<String>, bool) {
        (self.table, self.primary_key, self.auto_increment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let opts = Options::new();
        assert!(opts.bind_args().is_empty());
        let (table, pk, auto) = opts.take_meta();
        assert!(table.is_empty());
        assert!(pk.is_empty());
        assert!(!auto);
    }

    #[test]
    fn repeated_settings_overwrite() {
        let opts = Options::new()
            .table("first")
            .table("second")
            .primary_key(["a", "b"])
            .primary_key(["id"])
            .args([Value::from(1i64)])
            .args([Value::from(2i64)]);

        assert_eq!(opts.bind_args(), &[Value::from(2i64)]);
        let (table, pk, _) = opts.take_meta();
        assert_eq!(table, "second");
        assert_eq!(pk, vec!["id".to_string()]);
    }

    #[test]
    fn composite_key_order_is_preserved() {
        let (_, pk, _) = Options::new()
            .primary_key(["tenant", "id"])
            .take_meta();
        assert_eq!(pk, vec!["tenant".to_string(), "id".to_string()]);
    }
}
