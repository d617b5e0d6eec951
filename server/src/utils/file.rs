//! Path helpers for configured database files

use std::path::PathBuf;

/// Expand a configured path to an absolute path.
///
/// `~` and `~/...` resolve against the home directory; relative paths
/// resolve against the current directory; absolute paths pass through.
///
/// ```text
/// expand_path("~/sensors/air.db") // -> /home/pi/sensors/air.db
/// expand_path("data/solar.db")    // -> /current/dir/data/solar.db
/// expand_path("/var/lib/sky.db")  // -> /var/lib/sky.db
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}
