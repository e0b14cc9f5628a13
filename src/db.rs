//! Database session module for pidbm
//!
//! This module wraps the single SQLite connection shared by every
//! component for the duration of one invocation. It exposes the two
//! primitives the rest of the tool is built on, parameterized execution
//! and parameterized queries with string-typed extraction, plus the
//! schema-version precondition checked right after opening.
//!
//! The connection is opened once at process start and closed when the
//! session is dropped at process end; there is no pooling and no
//! transaction management across statements.

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};

use crate::conninfo;
use crate::error::{PidbmError, PidbmResult};

/// Major schema version this tool understands
pub const DBSCHEMA_MAJOR: i64 = 1;

/// Minor schema version this tool understands
pub const DBSCHEMA_MINOR: i64 = 0;

/// The shared storage session
///
/// Owns the underlying SQLite connection. All row values are extracted as
/// strings, matching how they are rendered, compared and re-inserted by
/// the record engine; SQLite's type affinity keeps numeric columns numeric
/// when the strings are written back.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a session from a connection info string
    ///
    /// Accepts the historical `sqlite3:db=<path>` form or a bare path.
    /// The database file must already exist; this tool administers an
    /// existing database and never creates one.
    pub fn open(cinfo: &str) -> PidbmResult<Self> {
        let path = conninfo::database_path(cinfo);
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(Database { conn })
    }

    /// Wrap an already opened connection (used by the test fixtures)
    pub fn from_connection(conn: Connection) -> Self {
        Database { conn }
    }

    /// Check the schema version precondition
    ///
    /// The `schema_version` table must hold exactly one row whose
    /// `valid_to` marker is null, and its major/minor pair must match the
    /// compiled-in expectation. Any mismatch is fatal before any
    /// sub-command runs.
    pub fn check_schema_version(&self) -> PidbmResult<()> {
        let rows = self.query_rows(
            "SELECT major,minor FROM schema_version WHERE valid_to IS NULL",
            &[],
        )?;

        let row = rows.first().ok_or_else(|| {
            PidbmError::invalid("database schema version not found")
        })?;
        let major: i64 = row[0].parse().unwrap_or(-1);
        let minor: i64 = row[1].parse().unwrap_or(-1);

        if major != DBSCHEMA_MAJOR || minor != DBSCHEMA_MINOR {
            return Err(PidbmError::SchemaVersionMismatch {
                expected: format!("{DBSCHEMA_MAJOR}.{DBSCHEMA_MINOR}"),
                found: format!("{major}.{minor}"),
            });
        }
        Ok(())
    }

    /// Run a query and materialize every row as a vector of strings
    ///
    /// NULL values come back as empty strings. An empty result is not an
    /// error; callers check for absence explicitly.
    pub fn query_rows(&self, sql: &str, params: &[&str]) -> PidbmResult<Vec<Vec<String>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let ncols = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();

        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(ncols);
            for i in 0..ncols {
                record.push(value_to_string(row.get_ref(i)?));
            }
            out.push(record);
        }
        Ok(out)
    }

    /// Run a single-column query and return the first value as an integer
    ///
    /// Used by id lookups all over the resolver. Returns `None` on an
    /// empty result or a non-numeric first column.
    pub fn query_first_id(&self, sql: &str, params: &[&str]) -> PidbmResult<Option<i64>> {
        let rows = self.query_rows(sql, params)?;
        Ok(rows.first().and_then(|r| r[0].parse().ok()))
    }

    /// Execute a statement and return the number of affected rows
    pub fn execute(&self, sql: &str, params: &[&str]) -> PidbmResult<usize> {
        let affected = self
            .conn
            .execute(sql, params_from_iter(params.iter()))?;
        Ok(affected)
    }

    /// Row id generated by the most recent successful INSERT
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}

/// Convert one SQLite value to its display string
///
/// Integers and reals use their canonical decimal form, NULL becomes the
/// empty string. Blobs do not occur in this schema but print a length
/// marker rather than panicking.
fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<blob {} bytes>", b.len()),
    }
}
