use std::path::{Component, Path, PathBuf};

const SEPARATORS: &[char] = &['/', '\\'];

/// Trims whitespace and leading/trailing path separators from a folder name.
/// `"/movies/"` becomes `"movies"`; an empty result means the default location.
pub fn sanitize_folder(raw: &str) -> String {
    raw.trim().trim_matches(SEPARATORS).trim().to_string()
}

/// Folder as an optional destination: `None` when nothing is left after
/// sanitizing.
pub fn destination_folder(raw: &str) -> Option<String> {
    let folder = sanitize_folder(raw);
    if folder.is_empty() {
        None
    } else {
        Some(folder)
    }
}

/// A file name that cannot climb out of its directory or hide a path.
pub fn safe_file_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if SEPARATORS.contains(&c) || c.is_control() { '_' } else { c })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => None,
        _ => Some(cleaned),
    }
}

/// Joins `folder` under `root`, dropping any `..`, root or prefix components
/// so the result always stays inside `root`.
pub fn contained_path(root: &Path, folder: Option<&str>) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(folder) = folder {
        for component in Path::new(folder).components() {
            if let Component::Normal(part) = component {
                path.push(part);
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_folder_trims_separators() {
        assert_eq!(sanitize_folder("/movies/"), "movies");
        assert_eq!(sanitize_folder("  \\clips\\2024\\ "), "clips\\2024");
        assert_eq!(sanitize_folder("a/b/"), "a/b");
        assert_eq!(sanitize_folder("///"), "");
    }

    #[test]
    fn test_destination_folder_empty_is_default() {
        assert_eq!(destination_folder("   "), None);
        assert_eq!(destination_folder("/x/"), Some("x".to_string()));
    }

    #[test]
    fn test_safe_file_name() {
        assert_eq!(safe_file_name("clip.mp4"), Some("clip.mp4".into()));
        assert_eq!(safe_file_name("../etc/passwd"), Some(".._etc_passwd".into()));
        assert_eq!(safe_file_name(".."), None);
        assert_eq!(safe_file_name("  "), None);
    }

    #[test]
    fn test_contained_path_drops_parent_components() {
        let root = Path::new("/downloads");
        assert_eq!(contained_path(root, None), PathBuf::from("/downloads"));
        assert_eq!(
            contained_path(root, Some("movies/2024")),
            PathBuf::from("/downloads/movies/2024")
        );
        assert_eq!(
            contained_path(root, Some("../../etc")),
            PathBuf::from("/downloads/etc")
        );
    }
}
