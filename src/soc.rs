//! SoC entity module for pidbm
//!
//! Thin aggregates over the `arch`, `manufacturer`, `soc_family` and
//! `soc` tables. Each one hydrates itself from a single-row lookup by id
//! and lives for one command. The `Soc` copy constructor duplicates a
//! source SoC under a new name, including its `soc_has_pin` join rows, so
//! a pin-compatible SoC variant can be registered in one command.

use crate::db::Database;
use crate::error::{PidbmError, PidbmResult};

/// Processor architecture row
#[derive(Debug, Clone)]
pub struct Arch {
    id: i64,
    name: String,
}

impl Arch {
    pub fn load(db: &Database, id: i64) -> PidbmResult<Arch> {
        let rows = db.query_rows("SELECT name FROM arch WHERE id=?", &[&id.to_string()])?;
        let row = rows
            .first()
            .ok_or_else(|| PidbmError::not_found("arch", &id.to_string()))?;
        Ok(Arch {
            id,
            name: row[0].clone(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Manufacturer row
#[derive(Debug, Clone)]
pub struct Manufacturer {
    id: i64,
    name: String,
}

impl Manufacturer {
    pub fn load(db: &Database, id: i64) -> PidbmResult<Manufacturer> {
        let rows = db.query_rows(
            "SELECT name FROM manufacturer WHERE id=?",
            &[&id.to_string()],
        )?;
        let row = rows
            .first()
            .ok_or_else(|| PidbmError::not_found("manufacturer", &id.to_string()))?;
        Ok(Manufacturer {
            id,
            name: row[0].clone(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// SoC family row, carries its architecture
#[derive(Debug, Clone)]
pub struct SocFamily {
    id: i64,
    name: String,
    arch: Arch,
}

impl SocFamily {
    pub fn load(db: &Database, id: i64) -> PidbmResult<SocFamily> {
        let rows = db.query_rows(
            "SELECT name,arch_id FROM soc_family WHERE id=?",
            &[&id.to_string()],
        )?;
        let row = rows
            .first()
            .ok_or_else(|| PidbmError::not_found("soc_family", &id.to_string()))?;
        let arch_id: i64 = row[1].parse().unwrap_or(-1);

        Ok(SocFamily {
            id,
            name: row[0].clone(),
            arch: Arch::load(db, arch_id)?,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arch(&self) -> &Arch {
        &self.arch
    }
}

/// System-on-chip aggregate
#[derive(Debug, Clone)]
pub struct Soc {
    id: i64,
    name: String,
    family: SocFamily,
    manufacturer: Manufacturer,
    i2c_count: i64,
    spi_count: i64,
    uart_count: i64,
}

impl Soc {
    pub fn load(db: &Database, id: i64) -> PidbmResult<Soc> {
        let rows = db.query_rows(
            "SELECT name,soc_family_id,manufacturer_id,i2c_count,spi_count,uart_count \
             FROM soc WHERE id=?",
            &[&id.to_string()],
        )?;
        let row = rows
            .first()
            .ok_or_else(|| PidbmError::not_found("soc", &id.to_string()))?;

        let family_id: i64 = row[1].parse().unwrap_or(-1);
        let manufacturer_id: i64 = row[2].parse().unwrap_or(-1);

        Ok(Soc {
            id,
            name: row[0].clone(),
            family: SocFamily::load(db, family_id)?,
            manufacturer: Manufacturer::load(db, manufacturer_id)?,
            i2c_count: row[3].parse().unwrap_or(0),
            spi_count: row[4].parse().unwrap_or(0),
            uart_count: row[5].parse().unwrap_or(0),
        })
    }

    /// Duplicate a SoC under a new name
    ///
    /// Inserts a new `soc` row sharing the source's family, manufacturer
    /// and bus counts, then duplicates every `soc_has_pin` row for the new
    /// id. The statements are independent; an interruption between them
    /// leaves a SoC without its pin map.
    pub fn copy(src: &Soc, db: &Database, name: &str) -> PidbmResult<Soc> {
        db.execute(
            "INSERT INTO soc(name,soc_family_id,manufacturer_id,i2c_count,spi_count,uart_count) \
             VALUES(?,?,?,?,?,?)",
            &[
                name,
                &src.family.id().to_string(),
                &src.manufacturer.id().to_string(),
                &src.i2c_count.to_string(),
                &src.spi_count.to_string(),
                &src.uart_count.to_string(),
            ],
        )?;
        let id = db.last_insert_id();

        let pins = db.query_rows(
            "SELECT pin_id FROM soc_has_pin WHERE soc_id=?",
            &[&src.id.to_string()],
        )?;
        for pin in &pins {
            db.execute(
                "INSERT INTO soc_has_pin(soc_id,pin_id) VALUES(?,?)",
                &[&id.to_string(), &pin[0]],
            )?;
        }

        Ok(Soc {
            id,
            name: name.to_string(),
            family: src.family.clone(),
            manufacturer: src.manufacturer.clone(),
            i2c_count: src.i2c_count,
            spi_count: src.spi_count,
            uart_count: src.uart_count,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &SocFamily {
        &self.family
    }

    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }

    pub fn i2c_count(&self) -> i64 {
        self.i2c_count
    }

    pub fn spi_count(&self) -> i64 {
        self.spi_count
    }

    pub fn uart_count(&self) -> i64 {
        self.uart_count
    }
}
