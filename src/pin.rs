//! Pin entity module for pidbm
//!
//! A pin row only stores its type; everything else hangs off join tables
//! (names per mode in `pin_has_name`, SoC/system numbers in `pin_number`,
//! per-GPIO ino numbers in `gpio_has_pin`). This module provides the pin
//! type table and a thin aggregate that hydrates one pin for display and
//! type checks.

use crate::db::Database;
use crate::error::{PidbmError, PidbmResult};

/// Fixed id of the `input` pin mode, the mode bare pin names refer to
pub const INPUT_MODE_ID: i64 = 0;

/// Physical kind of a pin, mirroring the fixed `pin_type` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinType {
    Gpio,
    Power,
    Usb,
    Audio,
    Video,
    NotConnected,
    Net,
}

impl PinType {
    /// Database id of this pin type
    pub fn id(self) -> i64 {
        match self {
            PinType::Gpio => 0,
            PinType::Power => 1,
            PinType::Usb => 2,
            PinType::Audio => 3,
            PinType::Video => 4,
            PinType::NotConnected => 5,
            PinType::Net => 6,
        }
    }

    /// Pin type for a database id
    pub fn from_id(id: i64) -> Option<PinType> {
        match id {
            0 => Some(PinType::Gpio),
            1 => Some(PinType::Power),
            2 => Some(PinType::Usb),
            3 => Some(PinType::Audio),
            4 => Some(PinType::Video),
            5 => Some(PinType::NotConnected),
            6 => Some(PinType::Net),
            _ => None,
        }
    }

    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            PinType::Gpio => "Gpio",
            PinType::Power => "Pwr",
            PinType::Usb => "Usb",
            PinType::Audio => "Snd",
            PinType::Video => "Vdo",
            PinType::NotConnected => "NC",
            PinType::Net => "Net",
        }
    }
}

/// One hydrated pin
///
/// Loaded on demand for grid rendering and type checks; discarded at
/// command end.
#[derive(Debug, Clone)]
pub struct Pin {
    id: i64,
    pin_type: Option<PinType>,
    name: Option<String>,
}

impl Pin {
    /// Load a pin by id
    pub fn load(db: &Database, id: i64) -> PidbmResult<Pin> {
        let rows = db.query_rows(
            "SELECT pin_type_id FROM pin WHERE id=?",
            &[&id.to_string()],
        )?;
        let row = rows
            .first()
            .ok_or_else(|| PidbmError::not_found("pin", &id.to_string()))?;
        let pin_type = row[0].parse().ok().and_then(PinType::from_id);

        let name = Self::name_for_mode(db, id, INPUT_MODE_ID)?;
        Ok(Pin { id, pin_type, name })
    }

    /// The pin's name in a given mode, when one is defined
    pub fn name_for_mode(db: &Database, id: i64, mode_id: i64) -> PidbmResult<Option<String>> {
        let rows = db.query_rows(
            "SELECT name FROM pin_name \
             INNER JOIN pin_has_name ON pin_name_id=pin_name.id \
             WHERE pin_id=? AND pin_mode_id=?",
            &[&id.to_string(), &mode_id.to_string()],
        )?;
        Ok(rows.first().map(|r| r[0].clone()))
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn pin_type(&self) -> Option<PinType> {
        self.pin_type
    }

    /// Input-mode name, when one is recorded
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Short label of the pin's type, `Unk` for an unknown id
    pub fn type_label(&self) -> &'static str {
        self.pin_type.map_or("Unk", PinType::label)
    }

    /// Text shown in a connector grid cell
    ///
    /// Unnamed pins (power rails, NC) fall back to their type label.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.type_label())
    }
}
