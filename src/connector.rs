//! Connector entity module for pidbm
//!
//! A connector owns a rows-by-columns grid of pin references stored in
//! `connector_has_pin`. Grid cell (row, column) maps to the linear pin
//! number `(row-1)*columns + column`, 1-based, which is the number
//! printed on the board silkscreen. The column count is not stored on the
//! connector row itself, it follows from the connector family (`h1x`
//! single-row headers have one column, `h2x` dual-row headers two).

use std::fmt;

use crate::db::Database;
use crate::error::{PidbmError, PidbmResult};
use crate::pin::Pin;
use crate::render;

/// One populated grid cell
#[derive(Debug, Clone)]
pub struct GridCell {
    pub row: i64,
    pub column: i64,
    pub pin: Pin,
}

/// Connector aggregate with its pin grid
#[derive(Debug, Clone)]
pub struct Connector {
    id: i64,
    name: String,
    rows: i64,
    columns: i64,
    family_id: i64,
    family_name: String,
    cells: Vec<GridCell>,
}

impl Connector {
    /// Load a connector and its grid by id
    pub fn load(db: &Database, id: i64) -> PidbmResult<Connector> {
        let rows = db.query_rows(
            "SELECT name,rows,connector_family_id FROM connector WHERE id=?",
            &[&id.to_string()],
        )?;
        let row = rows
            .first()
            .ok_or_else(|| PidbmError::not_found("connector", &id.to_string()))?;

        let name = row[0].clone();
        let nrows: i64 = row[1].parse().unwrap_or(0);
        let family_id: i64 = row[2].parse().unwrap_or(-1);

        let family = db.query_rows(
            "SELECT name FROM connector_family WHERE id=?",
            &[&family_id.to_string()],
        )?;
        let family_name = family
            .first()
            .map(|r| r[0].clone())
            .ok_or_else(|| PidbmError::not_found("connector_family", &family_id.to_string()))?;
        let columns = family_columns(&family_name);

        let mut cells = Vec::new();
        for r in db.query_rows(
            "SELECT \"row\",\"column\",pin_id FROM connector_has_pin \
             WHERE connector_id=? ORDER BY \"row\",\"column\"",
            &[&id.to_string()],
        )? {
            cells.push(GridCell {
                row: r[0].parse().unwrap_or(0),
                column: r[1].parse().unwrap_or(0),
                pin: Pin::load(db, r[2].parse().unwrap_or(-1))?,
            });
        }

        Ok(Connector {
            id,
            name,
            rows: nrows,
            columns,
            family_id,
            family_name,
            cells,
        })
    }

    /// Duplicate a connector under a new name
    ///
    /// Inserts a new `connector` row and copies every grid cell for the
    /// new id. Independent statements, no transaction.
    pub fn copy(src: &Connector, db: &Database, name: &str) -> PidbmResult<Connector> {
        db.execute(
            "INSERT INTO connector(connector_family_id,name,rows) VALUES(?,?,?)",
            &[&src.family_id.to_string(), name, &src.rows.to_string()],
        )?;
        let id = db.last_insert_id();

        for cell in &src.cells {
            db.execute(
                "INSERT INTO connector_has_pin(connector_id,pin_id,\"row\",\"column\") \
                 VALUES(?,?,?,?)",
                &[
                    &id.to_string(),
                    &cell.pin.id().to_string(),
                    &cell.row.to_string(),
                    &cell.column.to_string(),
                ],
            )?;
        }
        Connector::load(db, id)
    }

    /// Linear pin number of a grid cell, 1-based
    pub fn pin_number(&self, row: i64, column: i64) -> i64 {
        (row - 1) * self.columns + column
    }

    /// Write or overwrite one grid cell
    ///
    /// The in-memory grid is not refreshed; callers reload the connector
    /// when they want to render the updated grid.
    pub fn update_pin(&self, db: &Database, row: i64, column: i64, pin_id: i64) -> PidbmResult<()> {
        if row < 1 || row > self.rows || column < 1 || column > self.columns {
            return Err(PidbmError::invalid(format!(
                "position {row}.{column} outside the {}x{} grid of connector '{}'",
                self.rows, self.columns, self.name
            )));
        }

        let affected = db.execute(
            "UPDATE connector_has_pin SET pin_id=? WHERE connector_id=? AND \"row\"=? AND \"column\"=?",
            &[
                &pin_id.to_string(),
                &self.id.to_string(),
                &row.to_string(),
                &column.to_string(),
            ],
        )?;
        if affected == 0 {
            db.execute(
                "INSERT INTO connector_has_pin(connector_id,pin_id,\"row\",\"column\") \
                 VALUES(?,?,?,?)",
                &[
                    &self.id.to_string(),
                    &pin_id.to_string(),
                    &row.to_string(),
                    &column.to_string(),
                ],
            )?;
        }
        Ok(())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> i64 {
        self.rows
    }

    pub fn columns(&self) -> i64 {
        self.columns
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn cell(&self, row: i64, column: i64) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
    }
}

/// Column count of a connector family
///
/// Family names encode the header geometry as `h<columns>x`, so `h1x` is
/// a single-column header and `h2x` a dual-column one. Families without
/// the marker (edge connectors and the like) count one column.
pub fn family_columns(family_name: &str) -> i64 {
    let lower = family_name.to_lowercase();
    if let Some(rest) = lower.strip_prefix('h') {
        if let Some(end) = rest.find('x') {
            if let Ok(n) = rest[..end].parse::<i64>() {
                if n > 0 {
                    return n;
                }
            }
        }
    }
    1
}

impl fmt::Display for Connector {
    /// Render the grid with linear pin numbers and input-mode pin names
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} connector (id:{}, {}x{}, {})",
            self.name, self.id, self.rows, self.columns, self.family_name
        )?;

        let mut labels = Vec::new();
        for _ in 0..self.columns {
            labels.push("#".to_string());
            labels.push("name".to_string());
        }

        let mut rows = Vec::new();
        for row in 1..=self.rows {
            let mut cells = Vec::new();
            for column in 1..=self.columns {
                cells.push(self.pin_number(row, column).to_string());
                cells.push(
                    self.cell(row, column)
                        .map_or_else(String::new, |c| c.pin.display_name().to_string()),
                );
            }
            rows.push(cells);
        }

        let mut widths: Vec<usize> = labels.iter().map(String::len).collect();
        for row in &rows {
            for (value, width) in row.iter().zip(widths.iter_mut()) {
                *width = (*width).max(value.len());
            }
        }

        write!(f, "{}", render::format_table(&labels, &widths, &rows))
    }
}
