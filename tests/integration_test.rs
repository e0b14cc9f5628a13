//! Integration tests for pidbm
//!
//! End-to-end tests driving the compiled binary against a seeded
//! temporary database, the way an operator would.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command pointed at a database through the -c flag
fn pidbm(conninfo: &str) -> Command {
    let mut cmd = Command::cargo_bin("pidbm").unwrap();
    cmd.arg("-c").arg(conninfo);
    cmd
}

#[test]
fn version_flag_prints_banner_without_a_database() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pidbm")?;
    cmd.arg("-v");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Piduino pidbm version"));
    Ok(())
}

#[test]
fn warranty_flag_prints_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pidbm")?;
    cmd.arg("-w");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("without warranty of any kind"));
    Ok(())
}

#[test]
fn missing_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no command provided"));
    Ok(())
}

#[test]
fn unknown_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid command: frobnicate"));
    Ok(())
}

#[test]
fn add_manufacturer_then_list_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());
    let cinfo = common::conninfo(&db);

    pidbm(&cinfo)
        .args(["add", "manufacturer", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 record added to manufacturer"));

    pidbm(&cinfo)
        .args(["list", "manufacturer", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}

#[test]
fn list_uses_substring_name_match() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    // "WINN" is a fragment of Allwinner, case-insensitively
    pidbm(&common::conninfo(&db))
        .args(["list", "manufacturer", "WINN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Allwinner"))
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}

#[test]
fn list_by_numeric_id_matches_exactly() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["list", "soc", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("h3"))
        .stdout(predicate::str::contains("h5").not());
    Ok(())
}

#[test]
fn list_board_revision_renders_hex() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["list", "board", "revision"])
        .assert()
        .success()
        .stdout(predicate::str::contains("revision"))
        .stdout(predicate::str::contains("0xa01041"));

    // the revision value is matched numerically, hex input included
    pidbm(&common::conninfo(&db))
        .args(["list", "board", "revision", "0xa01041"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}

#[test]
fn list_board_tag_matches_the_tag_column() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["list", "board", "tag", "nanopi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NanoPi Neo"))
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}

#[test]
fn list_pin_narrows_by_type_and_soc() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["list", "pin", "gpio", "soc", "h3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GPIO2"))
        .stdout(predicate::str::contains("GPIO3"))
        .stdout(predicate::str::contains("3.3V").not());
    Ok(())
}

#[test]
fn list_pin_mode_filter_hides_other_modes() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    // pin 1 carries SDA1 in alt0; the input filter hides it
    pidbm(&common::conninfo(&db))
        .args(["-Minput", "list", "pin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GPIO2"))
        .stdout(predicate::str::contains("SDA1").not());

    pidbm(&common::conninfo(&db))
        .args(["-Malt0", "list", "pin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SDA1"));
    Ok(())
}

#[test]
fn list_gpio_pin_shows_the_full_pin_map() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["-Minput", "list", "gpio", "pin", "raspberrypi-gpio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ino_pin_num"))
        .stdout(predicate::str::contains("GPIO2"))
        .stdout(predicate::str::contains("GPIO3"));
    Ok(())
}

#[test]
fn list_connector_gpio_composite() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["list", "connector", "gpio", "raspberrypi-gpio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("j1"))
        .stdout(predicate::str::contains("inner").not());
    Ok(())
}

#[test]
fn list_unknown_view_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["list", "sprocket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid table sprocket"));
    Ok(())
}

#[test]
fn empty_result_prints_no_record_found() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["list", "manufacturer", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No record found."));
    Ok(())
}

#[test]
fn add_pin_reports_ids_and_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());
    let cinfo = common::conninfo(&db);

    pidbm(&cinfo)
        .args(["add", "pin", "video", "CVBS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pin_name 'CVBS' added"))
        .stdout(predicate::str::contains("pin 'CVBS' added"));

    pidbm(&cinfo)
        .args(["add", "pin", "video", "CVBS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pin_name 'CVBS' found"))
        .stdout(predicate::str::contains("nothing to add."));
    Ok(())
}

#[test]
fn rm_declined_on_stdin_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());
    let cinfo = common::conninfo(&db);

    pidbm(&cinfo)
        .args(["rm", "manufacturer", "Broadcom"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("confirm the deletion"));

    pidbm(&cinfo)
        .args(["list", "manufacturer", "Broadcom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}

#[test]
fn rm_confirmed_on_stdin_deletes() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());
    let cinfo = common::conninfo(&db);

    pidbm(&cinfo)
        .args(["rm", "manufacturer", "Allwinner"])
        .write_stdin("y\n")
        .assert()
        .success();

    pidbm(&cinfo)
        .args(["list", "manufacturer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}

#[test]
fn quiet_mode_suppresses_the_confirmation_prompt() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());
    let cinfo = common::conninfo(&db);

    // no stdin provided; -q must not block or prompt
    pidbm(&cinfo)
        .args(["-q", "rm", "manufacturer", "Allwinner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confirm").not());

    pidbm(&cinfo)
        .args(["list", "manufacturer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}

#[test]
fn show_connector_renders_the_grid() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["show", "connector", "j1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("j1 connector (id:1, 2x2, h2x)"))
        .stdout(predicate::str::contains("GPIO2"))
        .stdout(predicate::str::contains("3.3V"));
    Ok(())
}

#[test]
fn show_gpio_renders_its_connectors() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["show", "gpio", "raspberrypi-gpio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("raspberrypi-gpio gpio (id:1"))
        .stdout(predicate::str::contains("j1 connector"));
    Ok(())
}

#[test]
fn interactive_pin2gpio_reads_until_quit() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());
    let cinfo = common::conninfo(&db);

    pidbm(&cinfo)
        .args(["add", "pin2gpio", "nanopineo-gpio", "0"])
        .write_stdin("GPIO2\nGPIO3\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Adds pins to the nanopineo-gpio Gpio"));

    pidbm(&cinfo)
        .args(["-Minput", "list", "gpio", "pin", "nanopineo-gpio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records found."));
    Ok(())
}

#[test]
fn schema_version_mismatch_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    let conn = rusqlite::Connection::open(&db)?;
    conn.execute("UPDATE schema_version SET major=2", [])?;

    pidbm(&common::conninfo(&db))
        .args(["list", "manufacturer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema version"));
    Ok(())
}

#[test]
fn connection_info_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    let mut cmd = Command::cargo_bin("pidbm")?;
    cmd.env("PIDUINO_CONN_INFO", common::conninfo(&db))
        .args(["list", "manufacturer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Broadcom"));
    Ok(())
}

#[test]
fn missing_connection_info_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("pidbm")?;
    cmd.env_remove("PIDUINO_CONN_INFO")
        .env("HOME", temp_dir.path())
        .args(["list", "manufacturer"]);

    // no flag, no environment, no config file anywhere reachable
    if !std::path::Path::new("/etc/piduino.conf").exists() {
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("no connection info"));
    }
    Ok(())
}

#[test]
fn unresolved_reference_names_the_view_and_token() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());

    pidbm(&common::conninfo(&db))
        .args(["add", "gpio", "newgpio", "nosuchfamily"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid board_family 'nosuchfamily'"))
        .stderr(predicate::str::contains("list board_family"));
    Ok(())
}

#[test]
fn mod_renames_a_row_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());
    let cinfo = common::conninfo(&db);

    pidbm(&cinfo)
        .args(["mod", "manufacturer", "2", "FriendlyElec"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 record updated to manufacturer."));

    pidbm(&cinfo)
        .args(["list", "manufacturer", "FriendlyElec"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}

#[test]
fn cp_soc_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = common::create_test_db(temp_dir.path());
    let cinfo = common::conninfo(&db);

    pidbm(&cinfo)
        .args(["cp", "soc", "h3", "h3-v2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("h3 soc (id:2) copied to h3-v2 soc"));

    pidbm(&cinfo)
        .args(["list", "soc", "h3-v2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records found."));
    Ok(())
}
