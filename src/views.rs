//! Logical view definitions for pidbm
//!
//! The WhatMap: a static mapping from each logical view name to its
//! ordered list of qualified column names. The order is load-bearing, it
//! fixes both the SELECT projection order and the rendered column order,
//! and the `mod` sub-command assigns replacement values to columns in this
//! order (skipping the leading id).
//!
//! A column spelled with a leading `%` is rendered in hexadecimal: the
//! query builder expands it to a `printf('0x%x',col)` expression and the
//! result renderer strips the wrapper again for the header label.

/// Ordered column projection for every logical view
///
/// Composite views (`pin`, `pin_gpio`, `pin_soc`) are only meaningful on
/// top of the join expressions assembled by the dispatcher; the plain
/// views map one-to-one onto their physical table.
const WHAT_MAP: &[(&str, &[&str])] = &[
    ("arch", &["arch.id", "arch.name"]),
    (
        "board_family",
        &[
            "board_family.id",
            "board_family.name",
            "board_family.i2c_syspath",
            "board_family.spi_syspath",
            "board_family.uart_syspath",
        ],
    ),
    ("board_model", &["id", "name", "board_family_id", "soc_id"]),
    (
        "board",
        &[
            "board.id",
            "board.name",
            "board.board_model_id",
            "board.gpio_id",
            "board.manufacturer_id",
            "board.ram",
            "board.pcb_revision",
            "board.default_i2c_id",
            "board.default_spi_id",
            "board.default_uart_id",
        ],
    ),
    ("gpio", &["gpio.id", "gpio.name", "gpio.board_family_id"]),
    ("connector_family", &["connector_family.id", "connector_family.name"]),
    (
        "connector",
        &[
            "connector.id",
            "connector.name",
            "connector.rows",
            "connector.connector_family_id",
        ],
    ),
    ("manufacturer", &["manufacturer.id", "manufacturer.name"]),
    ("pin_type", &["pin_type.id", "pin_type.name"]),
    ("pin_mode", &["pin_mode.id", "pin_mode.name"]),
    ("pin_name", &["pin_name.id", "pin_name.name"]),
    (
        "pin_number",
        &["pin_number.pin_id", "pin_number.soc_pin_num", "pin_number.sys_pin_num"],
    ),
    (
        "pin",
        &[
            "pin.id",
            "pin_type.id",
            "pin_type.name",
            "pin_mode.id",
            "pin_mode.name",
            "pin_name.id",
            "pin_name.name",
        ],
    ),
    (
        "pin_gpio",
        &[
            "gpio_has_pin.gpio_id",
            "pin_type.id",
            "pin_type.name",
            "pin_mode.id",
            "pin_mode.name",
            "pin_name.id",
            "pin_name.name",
            "pin.id",
            "gpio_has_pin.ino_pin_num",
            "pin_number.soc_pin_num",
            "pin_number.sys_pin_num",
        ],
    ),
    (
        "pin_soc",
        &[
            "pin.id",
            "soc.id",
            "soc.name",
            "pin_type.id",
            "pin_type.name",
            "pin_mode.id",
            "pin_mode.name",
            "pin_name.id",
            "pin_name.name",
            "pin_number.soc_pin_num",
            "pin_number.sys_pin_num",
        ],
    ),
    ("soc_family", &["soc_family.id", "soc_family.name", "soc_family.arch_id"]),
    (
        "soc",
        &[
            "soc.id",
            "soc.name",
            "soc.soc_family_id",
            "soc.manufacturer_id",
            "soc.i2c_count",
            "soc.spi_count",
            "soc.uart_count",
        ],
    ),
];

/// Look up the column projection for a view
pub fn what(view: &str) -> Option<&'static [&'static str]> {
    WHAT_MAP
        .iter()
        .find(|(name, _)| *name == view)
        .map(|(_, columns)| *columns)
}

/// Whether `view` names a known logical view
pub fn is_view(view: &str) -> bool {
    what(view).is_some()
}
