use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::model::LauncherItem;

/// Represents a parsed XDG .desktop application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopApp {
    pub name: String,
    pub exec: String,
    pub desktop_file: PathBuf,
}

impl From<DesktopApp> for LauncherItem {
    fn from(app: DesktopApp) -> Self {
        LauncherItem::application(app.name, app.exec, Some(app.desktop_file))
    }
}

/// XDG application directories (in priority order)
fn application_dirs() -> Vec<PathBuf> {
    let home = directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_default();

    vec![
        // User directories (higher priority)
        home.join(".local/share/applications"),
        // Flatpak user apps
        home.join(".local/share/flatpak/exports/share/applications"),
        // System directories
        PathBuf::from("/usr/local/share/applications"),
        PathBuf::from("/usr/share/applications"),
        // Snap apps
        PathBuf::from("/var/lib/snapd/desktop/applications"),
    ]
}

/// Scan all XDG application directories for .desktop files
pub fn scan_desktop_apps() -> Vec<DesktopApp> {
    let apps = scan_dirs(&application_dirs());
    info!("Found {} desktop applications", apps.len());
    apps
}

pub fn scan_dirs(dirs: &[PathBuf]) -> Vec<DesktopApp> {
    let paths: Vec<PathBuf> = dirs
        .iter()
        .filter(|dir| dir.exists())
        .flat_map(|dir| desktop_files(dir))
        .collect();

    // Parsing preserves order, so user-level entries stay ahead of system ones.
    let mut apps: Vec<DesktopApp> = paths
        .par_iter()
        .filter_map(|path| parse_desktop_file(path))
        .collect();

    // Stable sort keeps the first occurrence of each name in front.
    // Names are compared case-insensitively, so "VLC" and "vlc" collapse.
    apps.sort_by_key(|app| app.name.to_lowercase());
    apps.dedup_by_key(|app| app.name.to_lowercase());

    apps
}

fn desktop_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(err) => {
            debug!("Skipping {}: {}", dir.display(), err);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "desktop"))
        .collect();
    files.sort();
    files
}

fn parse_desktop_file(path: &Path) -> Option<DesktopApp> {
    let content = fs::read_to_string(path).ok()?;
    parse_desktop_entry(&content, path)
}

fn parse_desktop_entry(content: &str, path: &Path) -> Option<DesktopApp> {
    // Parse INI-like format
    let mut in_desktop_entry = false;
    let mut fields: HashMap<&str, &str> = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Section header
        if line.starts_with('[') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }

        if !in_desktop_entry {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            // First occurrence wins, localized keys (Name[de]) are distinct
            fields.entry(key.trim()).or_insert(value.trim());
        }
    }

    if fields.get("Type").is_some_and(|t| *t != "Application") {
        return None;
    }
    if fields.get("NoDisplay").is_some_and(|v| *v == "true") {
        return None;
    }
    if fields.get("Hidden").is_some_and(|v| *v == "true") {
        return None;
    }

    let name = fields.get("Name")?.to_string();
    let exec = clean_exec_command(fields.get("Exec")?);
    if name.is_empty() || exec.is_empty() {
        return None;
    }

    Some(DesktopApp {
        name,
        exec,
        desktop_file: path.to_path_buf(),
    })
}

/// Remove .desktop field codes; `%%` stands for a literal percent sign.
///
/// Quoting is left in place so paths with spaces survive until launch.
fn clean_exec_command(exec: &str) -> String {
    let mut result = String::new();
    let mut chars = exec.chars();

    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some('%') = chars.next() {
                result.push('%');
            }
        } else {
            result.push(c);
        }
    }

    result.trim().to_string()
}
