//! Shared test fixtures for the pidbm test suites
//!
//! Builds a temporary Piduino database with the full schema and a small
//! seeded hardware catalog (one Raspberry Pi style board, one NanoPi
//! style board, a couple of GPIO pins on a 2x2 connector) that the
//! end-to-end and engine tests poke at.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

/// The full Piduino schema, as the tool expects to find it
pub const SCHEMA: &str = r#"
CREATE TABLE schema_version (
    major INTEGER NOT NULL,
    minor INTEGER NOT NULL,
    valid_from TEXT,
    valid_to TEXT
);
CREATE TABLE arch (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE manufacturer (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE board_family (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    i2c_syspath TEXT,
    spi_syspath TEXT,
    uart_syspath TEXT
);
CREATE TABLE soc_family (id INTEGER PRIMARY KEY, name TEXT NOT NULL, arch_id INTEGER);
CREATE TABLE soc (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    soc_family_id INTEGER,
    manufacturer_id INTEGER,
    i2c_count INTEGER DEFAULT 0,
    spi_count INTEGER DEFAULT 0,
    uart_count INTEGER DEFAULT 0
);
CREATE TABLE board_model (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    board_family_id INTEGER,
    soc_id INTEGER
);
CREATE TABLE gpio (id INTEGER PRIMARY KEY, name TEXT NOT NULL, board_family_id INTEGER);
CREATE TABLE board (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    board_model_id INTEGER,
    gpio_id INTEGER,
    manufacturer_id INTEGER,
    ram INTEGER,
    pcb_revision TEXT,
    default_i2c_id INTEGER,
    default_spi_id INTEGER,
    default_uart_id INTEGER
);
CREATE TABLE revision (board_id INTEGER, revision INTEGER);
CREATE TABLE tag (board_id INTEGER, tag TEXT);
CREATE TABLE connector_family (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE connector (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    rows INTEGER,
    connector_family_id INTEGER
);
CREATE TABLE connector_has_pin (
    connector_id INTEGER,
    pin_id INTEGER,
    "row" INTEGER,
    "column" INTEGER
);
CREATE TABLE pin_type (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE pin_mode (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE pin_name (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE pin (id INTEGER PRIMARY KEY, pin_type_id INTEGER);
CREATE TABLE pin_has_name (pin_id INTEGER, pin_name_id INTEGER, pin_mode_id INTEGER);
CREATE TABLE pin_number (pin_id INTEGER, soc_pin_num INTEGER, sys_pin_num INTEGER);
CREATE TABLE gpio_has_pin (gpio_id INTEGER, pin_id INTEGER, ino_pin_num INTEGER);
CREATE TABLE gpio_has_connector (gpio_id INTEGER, num INTEGER, connector_id INTEGER);
CREATE TABLE soc_has_pin (soc_id INTEGER, pin_id INTEGER);
"#;

/// Seed catalog shared by the tests
pub const SEED: &str = r#"
INSERT INTO schema_version(major,minor,valid_from,valid_to) VALUES(1,0,'2020-01-01',NULL);

INSERT INTO pin_mode(id,name) VALUES
    (0,'input'),(1,'output'),(2,'alt0'),(3,'alt1'),(4,'alt2'),
    (5,'alt3'),(6,'alt4'),(7,'alt5');
INSERT INTO pin_type(id,name) VALUES
    (0,'gpio'),(1,'power'),(2,'usb'),(3,'audio'),(4,'video'),(5,'nc'),(6,'net');

INSERT INTO arch(id,name) VALUES(1,'arm');
INSERT INTO manufacturer(id,name) VALUES(1,'Broadcom'),(2,'Allwinner');
INSERT INTO soc_family(id,name,arch_id) VALUES(1,'bcm2835',1),(2,'allwinner-h',1);
INSERT INTO soc(id,name,soc_family_id,manufacturer_id,i2c_count,spi_count,uart_count)
    VALUES(1,'bcm2709',1,1,1,1,1),(2,'h3',2,2,2,1,4),(3,'h5',2,2,2,1,4);

INSERT INTO board_family(id,name,i2c_syspath,spi_syspath,uart_syspath)
    VALUES(1,'raspberrypi','/dev/i2c-%d','/dev/spidev%d.%d','/dev/ttyAMA%d'),
          (2,'nanopi','/dev/i2c-%d','/dev/spidev%d.%d','/dev/ttyS%d');
INSERT INTO gpio(id,name,board_family_id) VALUES(1,'raspberrypi-gpio',1),(2,'nanopineo-gpio',2);
INSERT INTO board_model(id,name,board_family_id,soc_id)
    VALUES(1,'RaspberryPi 2',1,1),(2,'NanoPi Neo',2,2);
INSERT INTO board(id,name,board_model_id,gpio_id,manufacturer_id,ram,pcb_revision,
                  default_i2c_id,default_spi_id,default_uart_id)
    VALUES(1,'RaspberryPi 2 (0xa01041)',1,1,1,1024,'1.1',1,0,0),
          (2,'NanoPi Neo',2,2,2,512,NULL,0,0,0);
INSERT INTO revision(board_id,revision) VALUES(1,10489921);
INSERT INTO tag(board_id,tag) VALUES(2,'nanopineo');

INSERT INTO connector_family(id,name) VALUES(1,'h1x'),(2,'h2x');
INSERT INTO connector(id,name,rows,connector_family_id) VALUES(1,'j1',2,2),(2,'inner',2,1);

INSERT INTO pin(id,pin_type_id) VALUES(1,0),(2,0),(3,1),(4,1);
INSERT INTO pin_name(id,name) VALUES(1,'GPIO2'),(2,'GPIO3'),(3,'3.3V'),(4,'5V'),(5,'SDA1');
INSERT INTO pin_has_name(pin_id,pin_name_id,pin_mode_id)
    VALUES(1,1,0),(2,2,0),(3,3,0),(4,4,0),(1,5,2);
INSERT INTO pin_number(pin_id,soc_pin_num,sys_pin_num) VALUES(1,2,2),(2,3,3);
INSERT INTO gpio_has_pin(gpio_id,pin_id,ino_pin_num) VALUES(1,1,3),(1,2,5);
INSERT INTO soc_has_pin(soc_id,pin_id) VALUES(1,1),(1,2),(2,1),(2,2);
INSERT INTO connector_has_pin(connector_id,pin_id,"row","column")
    VALUES(1,3,1,1),(1,1,1,2),(1,4,2,1),(1,2,2,2);
INSERT INTO gpio_has_connector(gpio_id,num,connector_id) VALUES(1,1,1);
"#;

/// Create a seeded database file under `dir` and return its path
pub fn create_test_db(dir: &Path) -> PathBuf {
    let path = dir.join("piduino.db");
    let conn = Connection::open(&path).expect("Failed to create test database");
    conn.execute_batch(SCHEMA).expect("Failed to create schema");
    conn.execute_batch(SEED).expect("Failed to seed database");
    path
}

/// Connection info string for a database file, historical form
pub fn conninfo(path: &Path) -> String {
    format!("sqlite3:db={}", path.display())
}

/// Open a seeded database through the library session wrapper
#[allow(dead_code)]
pub fn open_database(dir: &Path) -> pidbm::db::Database {
    let path = create_test_db(dir);
    pidbm::db::Database::open(&conninfo(&path)).expect("Failed to open test database")
}

/// Count the rows of a table
#[allow(dead_code)]
pub fn row_count(db: &pidbm::db::Database, table: &str) -> i64 {
    db.query_first_id(&format!("SELECT COUNT(*) FROM {table}"), &[])
        .unwrap()
        .unwrap()
}
