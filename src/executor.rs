//! The executor capability: the one external dependency of the crate.
//!
//! A [`Session`](crate::Session) never talks to a database directly. It hands
//! finished, parameterized statements to an [`Executor`], which owns the
//! connection, the wire protocol, and statement preparation. Anything that can
//! run a statement and report rows or an affected count can back a session:
//! a real driver, a pool handle, or an in-memory fake in tests.

use crate::error::AnyrowResult;
use crate::value::Value;

/// The rows produced by a read statement.
///
/// Column names are in projection order and, because SQL allows it, not
/// necessarily unique. Each row carries one raw [`Value`] per column, in the
/// same order.
#[derive(Debug, Clone, Default)]
pub struct QueryOutput {
    /// Column names, in projection order.
    pub columns: Vec<String>,
    /// One value per column per row, in result-set order.
    pub rows: Vec<Vec<Value>>,
}

/// The outcome of a write statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOutput {
    /// Number of rows the statement touched.
    pub rows_affected: u64,
    /// The generated identifier from the most recent insert, when the backend
    /// can report one. Not every statement produces one.
    pub last_insert_id: Option<u64>,
}

/// A capability that can execute parameterized SQL statements.
///
/// The two operations mirror the read/write split of the underlying store.
/// Both take positional arguments matching the statement's `?` placeholders.
/// Backend failures (malformed SQL, connectivity loss, constraint violations)
/// are returned as [`AnyrowError::Backend`](crate::AnyrowError::Backend) and
/// surface to the session caller verbatim.
///
/// Whether two in-flight calls against the same executor are safe is the
/// executor's contract; the session adds no synchronization of its own.
pub trait Executor: Send + Sync {
    /// Run a read statement and return all rows.
    fn query(
        &self,
        statement: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = AnyrowResult<QueryOutput>> + Send;

    /// Run a write statement and return its outcome.
    fn exec(
        &self,
        statement: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = AnyrowResult<ExecOutput>> + Send;
}

impl QueryOutput {
    /// A result set with the given projection and no rows.
    pub fn empty(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The value count must match the column count.
    pub fn push_row(&mut self, row: impl IntoIterator<Item = Value>) {
        let row: Vec<Value> = row.into_iter().collect();
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }
}
