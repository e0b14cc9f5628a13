//! Connection-string discovery for pidbm
//!
//! The database location is resolved from the first non-empty source in
//! priority order:
//!
//! 1. the explicit `-c/--connection` option
//! 2. the `PIDUINO_CONN_INFO` environment variable
//! 3. the per-user configuration file `$HOME/.config/piduino.conf`
//! 4. the system-wide configuration file `/etc/piduino.conf`
//!
//! Configuration files use a minimal `key = value` format; the relevant key
//! is `connection_info`. Connection strings keep the historical
//! `sqlite3:db=<path>` form, but a bare filesystem path is accepted too.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PidbmError, PidbmResult};

/// System-wide configuration file consulted last
const SYSTEM_CONF: &str = "/etc/piduino.conf";

/// Environment variable holding the connection info
const CONN_ENV: &str = "PIDUINO_CONN_INFO";

/// Resolve the connection info string
///
/// `explicit` is the value of the `-c` option when given. Returns
/// [`PidbmError::NoConnectionInfo`] when every source comes up empty.
pub fn find(explicit: Option<&str>) -> PidbmResult<String> {
    if let Some(cinfo) = explicit {
        if !cinfo.is_empty() {
            return Ok(cinfo.to_string());
        }
    }

    if let Ok(cinfo) = env::var(CONN_ENV) {
        if !cinfo.is_empty() {
            return Ok(cinfo);
        }
    }

    for file in [user_conf_path(), Some(PathBuf::from(SYSTEM_CONF))]
        .into_iter()
        .flatten()
    {
        if file.exists() {
            if let Some(cinfo) = read_conf_value(&file, "connection_info")? {
                if !cinfo.is_empty() {
                    return Ok(cinfo);
                }
            }
        }
    }

    Err(PidbmError::NoConnectionInfo)
}

/// Extract the database path from a connection info string
///
/// `sqlite3:db=/path/to/piduino.db` yields `/path/to/piduino.db`. A string
/// without a `db=` parameter is treated as a plain path.
pub fn database_path(cinfo: &str) -> String {
    let tail = match cinfo.split_once(':') {
        Some((_, rest)) => rest,
        None => cinfo,
    };
    for part in tail.split(';') {
        if let Some(path) = part.trim().strip_prefix("db=") {
            return path.trim().trim_matches('"').to_string();
        }
    }
    cinfo.to_string()
}

/// Per-user configuration file, `$HOME/.config/piduino.conf`
fn user_conf_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok()?;
    if home.is_empty() {
        return None;
    }
    Some(Path::new(&home).join(".config").join("piduino.conf"))
}

/// Read a single `key = value` entry from a configuration file
///
/// Lines starting with `#` are comments. Values may be quoted; quotes are
/// stripped. Returns `None` when the key is absent.
fn read_conf_value(path: &Path, key: &str) -> PidbmResult<Option<String>> {
    let text = fs::read_to_string(path)?;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            if k.trim() == key {
                return Ok(Some(v.trim().trim_matches('"').to_string()));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_option_wins() {
        let cinfo = find(Some("sqlite3:db=/tmp/x.db")).unwrap();
        assert_eq!(cinfo, "sqlite3:db=/tmp/x.db");
    }

    #[test]
    fn database_path_strips_driver_prefix() {
        assert_eq!(database_path("sqlite3:db=/var/lib/piduino.db"), "/var/lib/piduino.db");
        assert_eq!(database_path("sqlite3:db=\"/var/lib/pi duino.db\""), "/var/lib/pi duino.db");
        assert_eq!(database_path("/plain/path.db"), "/plain/path.db");
    }

    #[test]
    fn conf_file_value_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# piduino configuration").unwrap();
        writeln!(file, "connection_info = \"sqlite3:db=/opt/test.db\"").unwrap();

        let value = read_conf_value(file.path(), "connection_info").unwrap();
        assert_eq!(value.as_deref(), Some("sqlite3:db=/opt/test.db"));
    }

    #[test]
    fn missing_key_yields_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "other_key = 1").unwrap();

        let value = read_conf_value(file.path(), "connection_info").unwrap();
        assert!(value.is_none());
    }
}
