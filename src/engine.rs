//! Record access engine for pidbm
//!
//! The four generic record operations every sub-command is built from:
//! select, insert (optionally idempotent), update and delete. The engine
//! is stateless across commands; it borrows the shared session and the
//! configuration and turns statement descriptions into executed SQL.
//!
//! Destructive operations are gated: unless quiet mode is active, a
//! delete first renders the matching rows and requires an explicit `y`
//! confirmation from the operator. Multi-statement sequences (the board
//! cascade in the dispatcher, the entity copy constructors) are not
//! wrapped in a transaction and can partially apply if interrupted.

use crate::config::Config;
use crate::db::Database;
use crate::error::PidbmResult;
use crate::prompt::{self, LineReader};
use crate::query::{CompareOp, Predicate, Statement};
use crate::render;
use crate::resolver::WhereCondition;

/// The generic record access engine
pub struct Engine<'a> {
    db: &'a Database,
    config: &'a Config,
}

impl<'a> Engine<'a> {
    pub fn new(db: &'a Database, config: &'a Config) -> Self {
        Engine { db, config }
    }

    /// Execute a select and materialize the matching rows
    ///
    /// An empty result is not an error; callers check for absence.
    pub fn select(
        &self,
        what: &[String],
        from: &str,
        predicate: &Predicate,
        order_by: Option<&str>,
        group_by: Option<&str>,
    ) -> PidbmResult<Vec<Vec<String>>> {
        let stmt = Statement::Select {
            what: what.to_vec(),
            from: from.to_string(),
            predicate: predicate.clone(),
            order_by: order_by.map(str::to_string),
            group_by: group_by.map(str::to_string),
        };
        self.db.query_rows(&stmt.sql(), &stmt.params())
    }

    /// Select with a single equality or pattern condition
    pub fn select_where(
        &self,
        what: &[String],
        from: &str,
        column: &str,
        value: &str,
    ) -> PidbmResult<Vec<Vec<String>>> {
        let mut predicate = Predicate::new();
        predicate.push(column, CompareOp::Eq, value);
        self.select(what, from, &predicate, None, None)
    }

    /// Insert one row and return its generated id
    ///
    /// In idempotent mode the engine first checks for a row where every
    /// supplied column equals its supplied value; if one exists its id is
    /// returned and nothing is inserted. Re-running the same add command
    /// therefore never duplicates join-table rows.
    pub fn insert(
        &self,
        columns: &[&str],
        table: &str,
        values: &[String],
        idempotent: bool,
    ) -> PidbmResult<i64> {
        if idempotent {
            let mut predicate = Predicate::new();
            for (column, value) in columns.iter().zip(values) {
                predicate.push(*column, CompareOp::Eq, value.clone());
            }
            let probe = Statement::Select {
                what: vec!["rowid".to_string()],
                from: table.to_string(),
                predicate,
                order_by: None,
                group_by: None,
            };
            if let Some(id) = self.db.query_first_id(&probe.sql(), &probe.params())? {
                return Ok(id);
            }
        }

        let stmt = Statement::Insert {
            table: table.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            values: values.to_vec(),
        };
        self.db.execute(&stmt.sql(), &stmt.params())?;
        Ok(self.db.last_insert_id())
    }

    /// Update columns of the rows matching a predicate
    ///
    /// Reports the affected row count for user feedback; zero affected
    /// rows is not an error.
    pub fn update(
        &self,
        columns: &[String],
        table: &str,
        predicate: Predicate,
        values: Vec<String>,
    ) -> PidbmResult<usize> {
        let stmt = Statement::Update {
            table: table.to_string(),
            columns: columns.to_vec(),
            values,
            predicate,
        };
        let affected = self.db.execute(&stmt.sql(), &stmt.params())?;

        if !self.config.quiet() {
            println!("{affected} record updated to {table}.");
        }
        Ok(affected)
    }

    /// Delete the rows matching a condition, after confirmation
    ///
    /// Unless quiet mode is active the matching rows are rendered through
    /// the result table first and the operator has to answer `y`/`Y`; any
    /// other answer aborts with no change and no error. `what` is the
    /// projection used for the preview.
    pub fn delete(
        &self,
        what: &[String],
        table: &str,
        condition: &WhereCondition,
        reader: &mut dyn LineReader,
    ) -> PidbmResult<()> {
        let mut predicate = Predicate::new();
        condition.apply_to(&mut predicate);

        if !self.config.quiet() {
            let n = render::print_records(self.db, what, table, &predicate, None, None)?;
            let question =
                format!("Could you confirm the deletion of the {n} records above [y/N] ? ");
            if !prompt::confirm(reader, &question)? {
                return Ok(());
            }
        }

        self.delete_matching(table, &predicate)?;
        Ok(())
    }

    /// Delete every row matching a predicate, no confirmation
    pub fn delete_matching(&self, table: &str, predicate: &Predicate) -> PidbmResult<usize> {
        let stmt = Statement::Delete {
            table: table.to_string(),
            predicate: predicate.clone(),
        };
        self.db.execute(&stmt.sql(), &stmt.params())
    }

    /// Delete rows by plain column equality, without confirmation
    ///
    /// Used by the board cascade once the parent deletion is confirmed.
    pub fn delete_where(&self, table: &str, column: &str, value: &str) -> PidbmResult<usize> {
        let mut predicate = Predicate::new();
        predicate.push(column, CompareOp::Eq, value);

        let stmt = Statement::Delete {
            table: table.to_string(),
            predicate,
        };
        self.db.execute(&stmt.sql(), &stmt.params())
    }
}
