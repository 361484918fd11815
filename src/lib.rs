//! # anyrow
//!
//! A schema-less, record-based data access layer for SQL databases.
//!
//! anyrow sits between "write every struct by hand" and a full ORM: you issue
//! arbitrary SQL read statements and get back dynamically-typed [`Record`]s,
//! then update, delete, or insert rows through those same records — no static
//! record types, no schema introspection, no code generation.
//!
//! ## Design
//!
//! - **SQL explicit**: SELECT statements are written by you, verbatim; only
//!   INSERT/UPDATE/DELETE are synthesized, from a record's captured metadata
//! - **Declared keys**: table name and primary key are declared per call via
//!   [`Options`], never inferred from the query or the database
//! - **Canonical text values**: every value lives as bytes and answers typed
//!   reads (`string` / `int64` / `uint64`) on demand, with explicit errors for
//!   NULL and absent columns
//! - **Safe mutations**: synthesized UPDATE/DELETE statements always carry the
//!   full declared key in the WHERE clause and a `LIMIT 1` bound
//! - **Pluggable backend**: the database side is a two-method [`Executor`]
//!   trait; drivers, pools, and test fakes all plug in the same way
//!
//! ## Example
//!
//! ```ignore
//! use anyrow::{Options, Session};
//!
//! let session = Session::new(executor);
//!
//! let users = session
//!     .select(
//!         "SELECT id, username FROM users WHERE status = ?",
//!         Options::new()
//!             .args(["active".into()])
//!             .table("users")
//!             .primary_key(["id"]),
//!     )
//!     .await?;
//!
//! for mut user in users {
//!     println!("{} {}", user.must_int64("id"), user.must_string("username"));
//!     user.set("status", "inactive");
//!     session.save(&user).await?;
//! }
//! ```

pub mod error;
pub mod executor;
pub mod options;
pub mod record;
pub mod session;
pub mod value;

pub use error::{AnyrowError, AnyrowResult};
pub use executor::{ExecOutput, Executor, QueryOutput};
pub use options::Options;
pub use record::Record;
pub use session::Session;
pub use value::Value;
