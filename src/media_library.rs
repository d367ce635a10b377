use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::model::LauncherItem;

const VIDEO_EXTENSIONS: [&str; 9] = [
    "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v", "3gp",
];

/// Candidate video folders, the configured one first.
pub fn video_dirs(configured: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![
        configured.to_path_buf(),
        PathBuf::from("/Wideo"),
        PathBuf::from("/wideo"),
    ];

    if let Some(user_dirs) = UserDirs::new() {
        let home = user_dirs.home_dir();
        dirs.push(home.join("Wideo"));
        dirs.push(home.join("wideo"));
        dirs.push(
            user_dirs
                .video_dir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| home.join("Videos")),
        );
        dirs.push(home.join("videos"));
    }

    let mut seen = Vec::new();
    dirs.retain(|dir| {
        if seen.contains(dir) {
            false
        } else {
            seen.push(dir.clone());
            true
        }
    });
    dirs
}

/// Items for the movies row: videos from the first folder that has any, or
/// placeholders explaining that nothing was found.
pub fn load_movies(configured: &Path) -> Vec<LauncherItem> {
    for dir in video_dirs(configured) {
        if !dir.is_dir() {
            continue;
        }

        info!("Searching for videos in: {}", dir.display());
        let videos = scan_video_directory(&dir);
        if !videos.is_empty() {
            info!("Found {} videos in {}", videos.len(), dir.display());
            return videos;
        }
    }

    placeholders()
}

fn placeholders() -> Vec<LauncherItem> {
    vec![
        LauncherItem::placeholder("No videos found"),
        LauncherItem::placeholder("Add videos to video folder"),
    ]
}

pub fn scan_video_directory(dir: &Path) -> Vec<LauncherItem> {
    let mut videos = Vec::new();
    walk(dir, &mut videos);
    videos.sort_by(|a, b| a.name.cmp(&b.name));
    videos
}

fn walk(dir: &Path, videos: &mut Vec<LauncherItem>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(err) => {
            warn!("Error scanning directory {}: {}", dir.display(), err);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            walk(&path, videos);
        } else if is_video(&path) {
            if let Some(stem) = path.file_stem() {
                let name = stem.to_string_lossy().to_string();
                debug!("Found video: {}", name);
                videos.push(LauncherItem::file(name, path.clone()));
            }
        }
    }
}

fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LauncherAction;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_is_video_is_case_insensitive() {
        assert!(is_video(Path::new("/m/Film.MKV")));
        assert!(is_video(Path::new("/m/clip.3gp")));
        assert!(!is_video(Path::new("/m/song.mp3")));
        assert!(!is_video(Path::new("/m/README")));
    }

    #[test]
    fn test_scan_walks_recursively_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Zorro.mp4"));
        touch(&dir.path().join("series/season1/Breaking Bad.mkv"));
        touch(&dir.path().join("series/cover.jpg"));
        touch(&dir.path().join("Alien.AVI"));

        let videos = scan_video_directory(dir.path());
        let names: Vec<_> = videos.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Alien", "Breaking Bad", "Zorro"]);
        assert_eq!(
            videos[1].action,
            LauncherAction::FilePath {
                path: dir.path().join("series/season1/Breaking Bad.mkv")
            }
        );
    }

    #[test]
    fn test_configured_folder_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Heat.webm"));

        let movies = load_movies(dir.path());
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].name, "Heat");
    }

    #[test]
    fn test_placeholders_are_inert() {
        for item in placeholders() {
            assert_eq!(item.action, LauncherAction::Empty);
        }
    }

    #[test]
    fn test_video_dirs_start_with_configured_and_are_unique() {
        let dirs = video_dirs(Path::new("/Wideo"));
        assert_eq!(dirs[0], PathBuf::from("/Wideo"));
        assert_eq!(dirs.iter().filter(|d| **d == PathBuf::from("/Wideo")).count(), 1);
    }
}
