//! Path resolution for workdesk directories.
//!
//! Provides XDG-compliant path resolution for the default database file.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "workdesk";
const DB_FILE: &str = "workdesk.db";

/// Resolve the data directory from explicit XDG_DATA_HOME / HOME values.
///
/// Empty values are treated as unset. Returns `None` when neither is usable.
pub fn resolve_data_dir(xdg_data_home: Option<&str>, home: Option<&str>) -> Option<PathBuf> {
    let data_home = match xdg_data_home.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.filter(|v| !v.is_empty())?).join(".local/share"),
    };
    Some(data_home.join(APP_DIR))
}

/// Get XDG-compliant data directory for workdesk.
///
/// # Returns
/// `$XDG_DATA_HOME/workdesk/`, falling back to `~/.local/share/workdesk/`,
/// or `None` if neither variable is set.
pub fn get_data_dir() -> Option<PathBuf> {
    let xdg = env::var("XDG_DATA_HOME").ok();
    let home = env::var("HOME").ok();
    resolve_data_dir(xdg.as_deref(), home.as_deref())
}

/// Get database file path (data_dir/workdesk.db).
pub fn get_db_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join(DB_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_xdg_data_home_wins() {
        let path = resolve_data_dir(Some("/data"), Some("/home/ada"));
        assert_eq!(path, Some(PathBuf::from("/data/workdesk")));
    }

    #[test]
    fn test_falls_back_to_home_local_share() {
        let path = resolve_data_dir(None, Some("/home/ada"));
        assert_eq!(path, Some(PathBuf::from("/home/ada/.local/share/workdesk")));

        let empty_xdg = resolve_data_dir(Some(""), Some("/home/ada"));
        assert_eq!(empty_xdg, path);
    }

    #[test]
    fn test_no_home_resolves_to_none() {
        assert_eq!(resolve_data_dir(None, None), None);
        assert_eq!(resolve_data_dir(Some(""), Some("")), None);
    }

    #[test]
    #[serial]
    fn test_get_db_path_reads_environment() {
        let previous = env::var("XDG_DATA_HOME").ok();
        // SAFETY: serialized with every other test touching the environment.
        unsafe { env::set_var("XDG_DATA_HOME", "/tmp/xdg-data") };

        let path = get_db_path();

        match previous {
            Some(value) => unsafe { env::set_var("XDG_DATA_HOME", value) },
            None => unsafe { env::remove_var("XDG_DATA_HOME") },
        }
        assert_eq!(path, Some(PathBuf::from("/tmp/xdg-data/workdesk/workdesk.db")));
    }
}
