//! Result rendering module for pidbm
//!
//! Query results are printed as a bordered ASCII table. Column widths are
//! not computed by buffering the result set twice: a companion aggregate
//! query asks the database for `MAX(LENGTH(col))` per projected column,
//! and the header labels only widen a column beyond that.
//!
//! Header labels default to the bare storage column name. When the same
//! bare name is projected from two different joined tables the fully
//! qualified `table.column` form is used instead, so `pin_type.id` and
//! `pin_mode.id` stay distinguishable. Hex-rendered columns lose their
//! `printf('0x%x',` wrapper before display.

use crate::db::Database;
use crate::error::PidbmResult;
use crate::query::{self, Predicate, Statement};

/// Run a select and print the result table with a record-count footer
///
/// Returns the number of matched rows. Zero rows prints the explicit
/// `No record found.` message instead of an empty grid.
pub fn print_records(
    db: &Database,
    what: &[String],
    from: &str,
    predicate: &Predicate,
    order_by: Option<&str>,
    group_by: Option<&str>,
) -> PidbmResult<usize> {
    let stmt = Statement::Select {
        what: what.to_vec(),
        from: from.to_string(),
        predicate: predicate.clone(),
        order_by: order_by.map(str::to_string),
        group_by: group_by.map(str::to_string),
    };
    let rows = db.query_rows(&stmt.sql(), &stmt.params())?;

    if rows.is_empty() {
        println!("No record found.");
        return Ok(0);
    }

    let labels = column_labels(what);
    let maxlens = column_value_widths(db, what, from, predicate)?;
    let widths = column_widths(&labels, &maxlens);

    print!("{}", format_table(&labels, &widths, &rows));
    println!("{} records found.", rows.len());
    Ok(rows.len())
}

/// Ask the database for the widest cell of every projected column
///
/// Builds `SELECT MAX(LENGTH(col)),... FROM <source> [WHERE ...]` with the
/// same predicate as the data query. The `%` hex marker is stripped, the
/// measured width is that of the stored value.
fn column_value_widths(
    db: &Database,
    what: &[String],
    from: &str,
    predicate: &Predicate,
) -> PidbmResult<Vec<usize>> {
    let columns: Vec<String> = what
        .iter()
        .map(|c| format!("MAX(LENGTH({}))", c.strip_prefix('%').unwrap_or(c)))
        .collect();

    let stmt = Statement::Select {
        what: columns,
        from: from.to_string(),
        predicate: predicate.clone(),
        order_by: None,
        group_by: None,
    };
    let rows = db.query_rows(&stmt.sql(), &stmt.params())?;

    Ok(match rows.first() {
        Some(row) => row.iter().map(|v| v.parse().unwrap_or(0)).collect(),
        None => vec![0; what.len()],
    })
}

/// Derive the display label of every projected column
///
/// Bare name unless that bare name occurs more than once in the
/// projection, in which case the qualified form disambiguates.
pub fn column_labels(what: &[String]) -> Vec<String> {
    what.iter()
        .map(|column| {
            let bare = query::base_column(column);
            let count = what
                .iter()
                .filter(|other| query::base_column(other) == bare)
                .count();
            if count > 1 {
                cleanup_column_name(column.strip_prefix('%').unwrap_or(column))
            } else {
                cleanup_column_name(bare)
            }
        })
        .collect()
}

/// Final column widths: widest of header label and cell values
pub fn column_widths(labels: &[String], value_widths: &[usize]) -> Vec<usize> {
    labels
        .iter()
        .zip(value_widths)
        .map(|(label, w)| label.len().max(*w))
        .collect()
}

/// Strip the hex expression wrapper from a computed column name
///
/// `printf('0x%x',revision)` displays as `revision`; anything else passes
/// through unchanged.
pub fn cleanup_column_name(name: &str) -> String {
    match name.strip_prefix(query::HEX_WRAPPER) {
        Some(rest) => rest.strip_suffix(')').unwrap_or(rest).to_string(),
        None => name.to_string(),
    }
}

/// Format the bordered table: separator, header, separator, rows, separator
pub fn format_table(labels: &[String], widths: &[usize], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let line = table_line(widths);

    out.push_str(&line);
    for (label, width) in labels.iter().zip(widths.iter().copied()) {
        out.push_str(&format!("| {label:<width$} "));
    }
    out.push_str("|\n");
    out.push_str(&line);

    for row in rows {
        for (value, width) in row.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("| {value:<width$} "));
        }
        out.push_str("|\n");
    }
    out.push_str(&line);
    out
}

/// One `+----+----+` separator line
fn table_line(widths: &[usize]) -> String {
    let mut out = String::new();
    for width in widths {
        out.push('+');
        out.push_str(&"-".repeat(width + 2));
    }
    out.push_str("+\n");
    out
}
