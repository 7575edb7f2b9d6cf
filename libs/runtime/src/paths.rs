use std::io;
use std::path::{Path, PathBuf};

/// Resolve the server home directory.
///
/// - `Some(path)`: `~` and `~/...` are expanded against the user's home,
///   relative paths are joined onto the current directory.
/// - `None`: `<platform home>/<default_subdir>`.
///
/// When `create` is set the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> io::Result<PathBuf> {
    let resolved = match configured {
        Some(raw) => expand_user_path(raw.trim())?,
        None => user_home()?.join(default_subdir),
    };

    let absolute = if resolved.is_absolute() {
        resolved
    } else {
        std::env::current_dir()?.join(resolved)
    };

    if create {
        std::fs::create_dir_all(&absolute)?;
    }
    Ok(absolute)
}

fn expand_user_path(raw: &str) -> io::Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => Ok(user_home()?.join(rest)),
        None => Ok(Path::new(raw).to_path_buf()),
    }
}

fn user_home() -> io::Result<PathBuf> {
    // APPDATA on Windows, HOME elsewhere
    #[cfg(target_os = "windows")]
    let home = dirs::data_dir();
    #[cfg(not(target_os = "windows"))]
    let home = dirs::home_dir();

    home.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot determine home directory"))
}
