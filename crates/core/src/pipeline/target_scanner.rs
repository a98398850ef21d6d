use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;

/// Enumerate target images in `dir`, one accepted extension at a time.
///
/// Results are concatenated in the fixed [`IMAGE_EXTENSIONS`] order and
/// sorted lexicographically by filename within each extension group, so
/// batch order is deterministic regardless of filesystem enumeration
/// order. Extension matching is case-sensitive: `photo.JPG` is skipped.
pub fn scan_targets(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut targets = Vec::new();
    for ext in IMAGE_EXTENSIONS {
        let mut group: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e == *ext)
            })
            .collect();
        group.sort();
        targets.extend(group);
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let targets = scan_targets(dir.path()).unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn test_missing_directory_is_error() {
        assert!(scan_targets(Path::new("/nonexistent/targets")).is_err());
    }

    #[test]
    fn test_groups_by_extension_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "b.jpg");
        touch(dir.path(), "c.webp");
        touch(dir.path(), "d.jpeg");

        let targets = scan_targets(dir.path()).unwrap();
        // jpg, jpeg, png, webp — not globally sorted by name
        assert_eq!(names(&targets), vec!["b.jpg", "d.jpeg", "a.png", "c.webp"]);
    }

    #[test]
    fn test_sorted_within_extension_group() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zebra.jpg");
        touch(dir.path(), "apple.jpg");
        touch(dir.path(), "mango.jpg");

        let targets = scan_targets(dir.path()).unwrap();
        assert_eq!(names(&targets), vec!["apple.jpg", "mango.jpg", "zebra.jpg"]);
    }

    #[test]
    fn test_uppercase_extensions_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "kept.jpg");
        touch(dir.path(), "skipped.JPG");
        touch(dir.path(), "also_skipped.Png");

        let targets = scan_targets(dir.path()).unwrap();
        assert_eq!(names(&targets), vec!["kept.jpg"]);
    }

    #[test]
    fn test_unrelated_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "image.jpg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "archive.tar.gz");
        touch(dir.path(), "no_extension");

        let targets = scan_targets(dir.path()).unwrap();
        assert_eq!(names(&targets), vec!["image.jpg"]);
    }

    #[test]
    fn test_subdirectories_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "image.png");
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let targets = scan_targets(dir.path()).unwrap();
        assert_eq!(names(&targets), vec!["image.png"]);
    }

    #[test]
    fn test_repeated_scans_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "c.jpg");
        touch(dir.path(), "a.png");
        touch(dir.path(), "b.jpg");

        let first = scan_targets(dir.path()).unwrap();
        let second = scan_targets(dir.path()).unwrap();
        assert_eq!(first, second);
    }
}
