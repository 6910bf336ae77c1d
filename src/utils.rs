// src/utils.rs
use std::path::Path;

/// Media type reported for a file name, empty when unknown
pub fn media_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default()
}

/// Display name for a picked file: its last path component
pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Strip surrounding quotes that terminals add when a path is dragged in
pub fn clean_path_input(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for("resume.pdf"), "application/pdf");
        assert_eq!(media_type_for("notes.txt"), "text/plain");
        assert_eq!(media_type_for("no_extension"), "");
    }

    #[test]
    fn test_display_file_name() {
        assert_eq!(
            display_file_name(Path::new("/home/me/cv/resume.pdf")),
            "resume.pdf"
        );
    }

    #[test]
    fn test_clean_path_input() {
        assert_eq!(clean_path_input("  '/tmp/my cv.pdf' \n"), "/tmp/my cv.pdf");
        assert_eq!(clean_path_input("\"/tmp/cv.pdf\""), "/tmp/cv.pdf");
        assert_eq!(clean_path_input("/tmp/cv.pdf"), "/tmp/cv.pdf");
    }
}
