//! Query builder module for pidbm
//!
//! Every SQL statement the tool runs is assembled here from typed parts,
//! never by ad-hoc string concatenation at the call sites. A statement is
//! a tagged variant (Select, Insert, Update, Delete) carrying its columns,
//! source and predicate; rendering produces the parameterized SQL text and
//! the ordered parameter list side by side, so values always travel as
//! bind parameters.
//!
//! The predicate rendering is shared by all four operations so that the
//! equality versus pattern-match decision lives in exactly one place.

/// Wrapper generated around hex-rendered columns
///
/// A `%`-prefixed column in a view projection selects this SQLite printf
/// expression; the result renderer strips it again from the header label.
pub const HEX_WRAPPER: &str = "printf('0x%x',";

/// Comparison operator of a predicate term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Exact equality, rendered as `col=?`
    Eq,
    /// Case-insensitive pattern match, rendered as `col LIKE ?`
    Like,
}

/// A conjunction of (column, operator, value) terms
///
/// Built incrementally by the resolver and the dispatcher, consumed
/// opaquely by the statement renderer. An empty predicate renders as no
/// WHERE clause at all.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    terms: Vec<(String, CompareOp)>,
    values: Vec<String>,
}

impl Predicate {
    pub fn new() -> Self {
        Predicate::default()
    }

    /// Append one term to the conjunction
    pub fn push(&mut self, column: impl Into<String>, op: CompareOp, value: impl Into<String>) {
        self.terms.push((column.into(), op));
        self.values.push(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The bind values, in term order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Render the conjunction as SQL, without the `WHERE` keyword
    ///
    /// This is the single spot deciding between `=?` and ` LIKE ?`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, (column, op)) in self.terms.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            out.push_str(column);
            out.push_str(match op {
                CompareOp::Eq => "=?",
                CompareOp::Like => " LIKE ?",
            });
        }
        out
    }
}

/// One database statement, ready to render
#[derive(Debug, Clone)]
pub enum Statement {
    Select {
        /// Qualified column names, `%`-prefixed entries become hex expressions
        what: Vec<String>,
        /// Table name or join expression
        from: String,
        predicate: Predicate,
        order_by: Option<String>,
        group_by: Option<String>,
    },
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<String>,
    },
    Update {
        table: String,
        columns: Vec<String>,
        values: Vec<String>,
        predicate: Predicate,
    },
    Delete {
        table: String,
        predicate: Predicate,
    },
}

impl Statement {
    /// Render the SQL text
    pub fn sql(&self) -> String {
        match self {
            Statement::Select {
                what,
                from,
                predicate,
                order_by,
                group_by,
            } => {
                let columns: Vec<String> = what.iter().map(|c| select_expr(c)).collect();
                let mut sql = format!("SELECT {} FROM {}", columns.join(","), from);
                if !predicate.is_empty() {
                    sql.push_str(" WHERE ");
                    sql.push_str(&predicate.render());
                }
                if let Some(group_by) = group_by {
                    sql.push_str(" GROUP BY ");
                    sql.push_str(group_by);
                }
                if let Some(order_by) = order_by {
                    sql.push_str(" ORDER BY ");
                    sql.push_str(order_by);
                }
                sql
            }
            Statement::Insert { table, columns, .. } => {
                let columns: Vec<&str> = columns.iter().map(|c| base_column(c)).collect();
                let placeholders = vec!["?"; columns.len()].join(",");
                format!(
                    "INSERT INTO {}({}) VALUES({})",
                    table,
                    columns.join(","),
                    placeholders
                )
            }
            Statement::Update {
                table,
                columns,
                predicate,
                ..
            } => {
                // Qualifiers are unambiguous in a single-table SET clause,
                // strip them.
                let assignments: Vec<String> = columns
                    .iter()
                    .map(|c| format!("{}=?", base_column(c)))
                    .collect();
                format!(
                    "UPDATE {} SET {} WHERE {}",
                    table,
                    assignments.join(","),
                    predicate.render()
                )
            }
            Statement::Delete { table, predicate } => {
                format!("DELETE FROM {} WHERE {}", table, predicate.render())
            }
        }
    }

    /// The bind parameters matching [`Statement::sql`], in order
    pub fn params(&self) -> Vec<&str> {
        match self {
            Statement::Select { predicate, .. } | Statement::Delete { predicate, .. } => {
                predicate.values().iter().map(String::as_str).collect()
            }
            Statement::Insert { values, .. } => values.iter().map(String::as_str).collect(),
            Statement::Update {
                values, predicate, ..
            } => values
                .iter()
                .chain(predicate.values())
                .map(String::as_str)
                .collect(),
        }
    }
}

/// Strip the `table.` qualifier and the `%` hex marker from a column name
pub fn base_column(column: &str) -> &str {
    let column = column.strip_prefix('%').unwrap_or(column);
    match column.rfind('.') {
        Some(pos) => &column[pos + 1..],
        None => column,
    }
}

/// Expand a projection column into its SELECT expression
///
/// `%revision` becomes `printf('0x%x',revision)`; other columns pass
/// through unchanged.
pub fn select_expr(column: &str) -> String {
    match column.strip_prefix('%') {
        Some(bare) => format!("{HEX_WRAPPER}{bare})"),
        None => column.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_without_predicate() {
        let stmt = Statement::Select {
            what: vec!["arch.id".into(), "arch.name".into()],
            from: "arch".into(),
            predicate: Predicate::new(),
            order_by: None,
            group_by: None,
        };
        assert_eq!(stmt.sql(), "SELECT arch.id,arch.name FROM arch");
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn select_with_predicate_order_and_group() {
        let mut predicate = Predicate::new();
        predicate.push("pin_name.name", CompareOp::Like, "%tx%");
        predicate.push("pin.pin_type_id", CompareOp::Eq, "0");

        let stmt = Statement::Select {
            what: vec!["pin.id".into()],
            from: "pin INNER JOIN pin_has_name ON pin.id=pin_has_name.pin_id".into(),
            predicate,
            order_by: Some("pin_name.name".into()),
            group_by: Some("pin.id".into()),
        };
        assert_eq!(
            stmt.sql(),
            "SELECT pin.id FROM pin INNER JOIN pin_has_name ON pin.id=pin_has_name.pin_id \
             WHERE pin_name.name LIKE ? AND pin.pin_type_id=? GROUP BY pin.id ORDER BY pin_name.name"
        );
        assert_eq!(stmt.params(), vec!["%tx%", "0"]);
    }

    #[test]
    fn select_expands_hex_columns() {
        let stmt = Statement::Select {
            what: vec!["%revision".into(), "board.name".into()],
            from: "revision".into(),
            predicate: Predicate::new(),
            order_by: None,
            group_by: None,
        };
        assert_eq!(
            stmt.sql(),
            "SELECT printf('0x%x',revision),board.name FROM revision"
        );
    }

    #[test]
    fn insert_uses_placeholders() {
        let stmt = Statement::Insert {
            table: "manufacturer".into(),
            columns: vec!["name".into()],
            values: vec!["Acme".into()],
        };
        assert_eq!(stmt.sql(), "INSERT INTO manufacturer(name) VALUES(?)");
        assert_eq!(stmt.params(), vec!["Acme"]);
    }

    #[test]
    fn update_strips_qualifiers_in_set_clause() {
        let mut predicate = Predicate::new();
        predicate.push("id", CompareOp::Eq, "5");

        let stmt = Statement::Update {
            table: "gpio".into(),
            columns: vec!["gpio.name".into(), "gpio.board_family_id".into()],
            values: vec!["rpi".into(), "1".into()],
            predicate,
        };
        assert_eq!(
            stmt.sql(),
            "UPDATE gpio SET name=?,board_family_id=? WHERE id=?"
        );
        assert_eq!(stmt.params(), vec!["rpi", "1", "5"]);
    }

    #[test]
    fn delete_renders_like_predicate() {
        let mut predicate = Predicate::new();
        predicate.push("name", CompareOp::Like, "%acme%");

        let stmt = Statement::Delete {
            table: "manufacturer".into(),
            predicate,
        };
        assert_eq!(stmt.sql(), "DELETE FROM manufacturer WHERE name LIKE ?");
        assert_eq!(stmt.params(), vec!["%acme%"]);
    }

    #[test]
    fn base_column_strips_qualifier_and_marker() {
        assert_eq!(base_column("board.name"), "name");
        assert_eq!(base_column("%revision"), "revision");
        assert_eq!(base_column("ram"), "ram");
    }
}
