//! GPIO entity module for pidbm
//!
//! A gpio row ties a board family to a set of connectors through
//! `gpio_has_connector`. The aggregate loads its connectors in connector
//! number order and renders them one below the other, which is what
//! `show gpio` prints.

use std::fmt;

use crate::connector::Connector;
use crate::db::Database;
use crate::error::{PidbmError, PidbmResult};

/// GPIO aggregate with its ordered connectors
#[derive(Debug, Clone)]
pub struct Gpio {
    id: i64,
    name: String,
    board_family_id: i64,
    /// (connector number, connector), ordered by number
    connectors: Vec<(i64, Connector)>,
}

impl Gpio {
    /// Load a gpio and its connectors by id
    pub fn load(db: &Database, id: i64) -> PidbmResult<Gpio> {
        let rows = db.query_rows(
            "SELECT name,board_family_id FROM gpio WHERE id=?",
            &[&id.to_string()],
        )?;
        let row = rows
            .first()
            .ok_or_else(|| PidbmError::not_found("gpio", &id.to_string()))?;

        let name = row[0].clone();
        let board_family_id: i64 = row[1].parse().unwrap_or(-1);

        let mut connectors = Vec::new();
        for link in db.query_rows(
            "SELECT num,connector_id FROM gpio_has_connector WHERE gpio_id=? ORDER BY num",
            &[&id.to_string()],
        )? {
            let num: i64 = link[0].parse().unwrap_or(0);
            let connector_id: i64 = link[1].parse().unwrap_or(-1);
            connectors.push((num, Connector::load(db, connector_id)?));
        }

        Ok(Gpio {
            id,
            name,
            board_family_id,
            connectors,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board_family_id(&self) -> i64 {
        self.board_family_id
    }

    pub fn connectors(&self) -> &[(i64, Connector)] {
        &self.connectors
    }
}

impl fmt::Display for Gpio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} gpio (id:{}, {} connectors)",
            self.name,
            self.id,
            self.connectors.len()
        )?;
        for (num, connector) in &self.connectors {
            writeln!(f, "connector #{num}:")?;
            write!(f, "{connector}")?;
        }
        Ok(())
    }
}
