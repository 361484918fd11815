//! The session: query execution and CRUD statement synthesis.
//!
//! A [`Session`] wraps an [`Executor`] and adds the record layer on top:
//! [`select`](Session::select) materializes query results as [`Record`]s, and
//! [`create`](Session::create) / [`save`](Session::save) /
//! [`delete`](Session::delete) turn a record's captured metadata and current
//! values back into single parameterized INSERT / UPDATE / DELETE statements.
//!
//! Statements use the MySQL-flavored dialect: backtick-quoted column names,
//! positional `?` placeholders, and a `LIMIT 1` bound on every UPDATE and
//! DELETE so a non-unique WHERE clause can never touch more than one row.

use crate::error::{AnyrowError, AnyrowResult};
use crate::executor::Executor;
use crate::options::Options;
use crate::record::Record;
use crate::value::Value;
use tracing::debug;

/// A schema-less database session over an [`Executor`].
///
/// ```ignore
/// use anyrow::{Options, Session};
///
/// let session = Session::new(executor);
/// let users = session
///     .select(
///         "SELECT * FROM users WHERE status = ?",
///         Options::new()
///             .args(["active".into()])
///             .table("users")
///             .primary_key(["id"]),
///     )
///     .await?;
///
/// for mut user in users {
///     user.set("status", "inactive");
///     session.save(&user).await?;
/// }
/// ```
#[derive(Debug)]
pub struct Session<E> {
    executor: E,
}

impl<E> Session<E> {
    /// Create a session over the given executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// The underlying executor, for statements this layer cannot express.
    pub fn executor(&self) -> &E {
        &self.executor
    }
}

impl<E: Executor> Session<E> {
    /// Run a read query and materialize every returned row as a [`Record`].
    ///
    /// The query string is passed to the executor untouched, with the bind
    /// arguments from `options`. Each record is tagged with the table name,
    /// primary-key fields, and auto-increment flag declared on `options`, so
    /// it can be handed straight back to [`save`](Self::save) or
    /// [`delete`](Self::delete). One field is set per returned column, under
    /// the column's reported name; record order matches result-set order.
    ///
    /// The full result set is materialized before returning. Executor errors
    /// surface verbatim.
    pub async fn select(&self, query: &str, options: Options) -> AnyrowResult<Vec<Record>> {
        debug!(sql = query, "select");
        let out = self.executor.query(query, options.bind_args()).await?;

        let mut records = Vec::with_capacity(out.rows.len());
        for row in out.rows {
            let mut record = Record::with_options(options.clone());
            for (name, value) in out.columns.iter().zip(row) {
                record.set(name.clone(), value);
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Insert the record's current fields as a new row.
    ///
    /// Fails with [`AnyrowError::TableNotSet`] if the record carries no table
    /// name. The synthesized statement names every field currently set, with
    /// one placeholder per field.
    ///
    /// When the record's primary key is exactly one field and auto-increment
    /// was declared, the generated identifier reported by the executor is
    /// written back into that field. An executor that reports none is
    /// tolerated and the capture is skipped; composite keys never capture.
    pub async fn create(&self, record: &mut Record) -> AnyrowResult<()> {
        if record.table().is_empty() {
            return Err(AnyrowError::TableNotSet);
        }

        let mut columns = Vec::with_capacity(record.len());
        let mut args = Vec::with_capacity(record.len());
        for (field, value) in record.iter() {
            columns.push(format!("`{field}`"));
            args.push(value.clone());
        }
        let placeholders = vec!["?"; args.len()].join(", ");

        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            record.table(),
            columns.join(", "),
            placeholders
        );
        debug!(sql = %statement, "create");

        let out = self.executor.exec(&statement, &args).await?;

        if record.primary_key().len() == 1 && record.auto_increment() {
            // Statements that don't generate an identifier report none; the
            // capture is skipped rather than failing the insert.
            if let Some(id) = out.last_insert_id {
                let pk = record.primary_key()[0].clone();
                record.set(pk, id);
            }
        }
        Ok(())
    }

    /// Update the row identified by the record's primary key.
    ///
    /// Requires a table name ([`AnyrowError::TableNotSet`]) and a non-empty
    /// declared primary key ([`AnyrowError::PrimaryKeyNotSet`]). Every
    /// primary-key field must have a value on the record, checked before any
    /// statement runs ([`AnyrowError::PrimaryKeyInvalid`]).
    ///
    /// The SET clause covers every field on the record, primary-key fields
    /// included (they may legitimately be rewritten). The WHERE clause covers
    /// the primary-key fields in declared order, bounded by `LIMIT 1`.
    pub async fn save(&self, record: &Record) -> AnyrowResult<()> {
        check_mutable(record)?;
        let (where_clause, pk_args) = primary_key_clause(record)?;

        let mut sets = Vec::with_capacity(record.len());
        let mut args = Vec::with_capacity(record.len() + pk_args.len());
        for (field, value) in record.iter() {
            sets.push(format!("`{field}` = ?"));
            args.push(value.clone());
        }
        args.extend(pk_args);

        let statement = format!(
            "UPDATE {} SET {} WHERE {} LIMIT 1",
            record.table(),
            sets.join(", "),
            where_clause
        );
        debug!(sql = %statement, "save");

        self.executor.exec(&statement, &args).await?;
        Ok(())
    }

    /// Delete the row identified by the record's primary key.
    ///
    /// Same preconditions as [`save`](Self::save). Only the primary-key
    /// fields' values are used, so a record built purely to carry a key value
    /// is enough:
    ///
    /// ```ignore
    /// let mut doomed = Record::with_options(
    ///     Options::new().table("users").primary_key(["id"]),
    /// );
    /// doomed.set("id", 5i64);
    /// session.delete(&doomed).await?;
    /// ```
    pub async fn delete(&self, record: &Record) -> AnyrowResult<()> {
        check_mutable(record)?;
        let (where_clause, args) = primary_key_clause(record)?;

        let statement = format!(
            "DELETE FROM {} WHERE {} LIMIT 1",
            record.table(),
            where_clause
        );
        debug!(sql = %statement, "delete");

        self.executor.exec(&statement, &args).await?;
        Ok(())
    }
}

/// Shared save/delete precondition: a table and a declared primary key.
fn check_mutable(record: &Record) -> AnyrowResult<()> {
    if record.table().is_empty() {
        return Err(AnyrowError::TableNotSet);
    }
    if record.primary_key().is_empty() {
        return Err(AnyrowError::PrimaryKeyNotSet);
    }
    Ok(())
}

/// Build the `` `pk1` = ? AND `pk2` = ? `` clause and collect the key values,
/// in declared order. Fails if any declared key field has no value.
fn primary_key_clause(record: &Record) -> AnyrowResult<(String, Vec<Value>)> {
    let mut clauses = Vec::with_capacity(record.primary_key().len());
    let mut args = Vec::with_capacity(record.primary_key().len());
    for field in record.primary_key() {
        let value = record
            .get(field)
            .ok_or_else(|| AnyrowError::PrimaryKeyInvalid(field.clone()))?;
        clauses.push(format!("`{field}` = ?"));
        args.push(value.clone());
    }
    Ok((clauses.join(" AND "), args))
}
