use std::fs;
use std::path::Path;

/// Best-effort removal of leftover web-view caches.
///
/// Scans the parent of `cache_dir` and removes every entry whose name
/// contains "webview" (case-insensitive). Failures are absorbed; the caller
/// gets no report.
pub fn clear_webview_dirs(cache_dir: &Path) {
    let Some(app_dir) = cache_dir.parent() else {
        return;
    };
    let Ok(entries) = fs::read_dir(app_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.to_lowercase().contains("webview") {
            tracing::debug!("Removing web cache entry {:?}", entry.path());
            if !remove_tree(&entry.path()) {
                tracing::warn!("Could not fully remove {:?}", entry.path());
            }
        }
    }
}

/// Depth-first removal. A directory is deleted only once every child
/// reports success; the first failure abandons the whole branch, leaving
/// the ancestor chain in place.
pub fn remove_tree(path: &Path) -> bool {
    if path.is_dir() {
        let Ok(entries) = fs::read_dir(path) else {
            return false;
        };
        for entry in entries.flatten() {
            if !remove_tree(&entry.path()) {
                return false;
            }
        }
        // The directory is now empty
        fs::remove_dir(path).is_ok()
    } else {
        fs::remove_file(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_tree_deletes_nested_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("tree");
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/file.txt"), "x").unwrap();
        fs::write(root.join("a/b/file.txt"), "y").unwrap();

        assert!(remove_tree(&root));
        assert!(!root.exists());
    }

    #[test]
    fn test_remove_tree_on_plain_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("stray.bin");
        fs::write(&file, "x").unwrap();

        assert!(remove_tree(&file));
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_tree_missing_path_reports_failure() {
        let dir = TempDir::new().unwrap();
        assert!(!remove_tree(&dir.path().join("does-not-exist")));
    }
}
