//! Console helpers: colored message prefixes and display paths.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are on unless `NO_COLOR` is set.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if colors_enabled() {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.cyan().bold().to_string())
}

/// Path relative to the working directory when possible, for display only.
pub fn rel_to_wd(p: &Path) -> String {
    let shown = std::env::current_dir()
        .ok()
        .filter(|_| p.is_absolute())
        .and_then(|wd| pathdiff::diff_paths(p, wd))
        .filter(|rel| !rel.starts_with(".."));
    shown
        .as_deref()
        .unwrap_or(p)
        .to_string_lossy()
        .to_string()
}
