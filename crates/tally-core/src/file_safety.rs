//! Filename handling for client uploads.
//!
//! Client-supplied names are never trusted as paths: they are reduced to a
//! single safe component before anything touches the filesystem.

use std::path::Path;

use crate::defaults::{FALLBACK_FILENAME, FILENAME_MAX_LENGTH};

/// Reduce a client-supplied filename to a single safe path component.
pub fn sanitize_filename(filename: &str) -> String {
    // Remove path components
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    // Replace dangerous characters
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let sanitized = sanitized.trim();
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        return FALLBACK_FILENAME.to_string();
    }

    // Truncate if too long (preserve extension)
    if sanitized.len() > FILENAME_MAX_LENGTH {
        let cut = |s: &str, max: usize| {
            let mut end = max.min(s.len());
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            s[..end].to_string()
        };
        if let Some(dot_pos) = sanitized.rfind('.') {
            let ext = &sanitized[dot_pos..];
            if ext.len() < FILENAME_MAX_LENGTH {
                let stem = cut(&sanitized[..dot_pos], FILENAME_MAX_LENGTH - ext.len());
                return format!("{}{}", stem, ext);
            }
        }
        return cut(sanitized, FILENAME_MAX_LENGTH);
    }

    sanitized.to_string()
}

/// Lowercase extension of `path` without the dot, or `""` when there is none.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\data\\scores.csv"), "scores.csv");
    }

    #[test]
    fn test_sanitize_replaces_reserved_characters() {
        assert_eq!(sanitize_filename("a<b>c?.csv"), "a_b_c_.csv");
    }

    #[test]
    fn test_sanitize_empty_and_dot_names() {
        assert_eq!(sanitize_filename(""), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("   "), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename(".."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("dir/"), FALLBACK_FILENAME);
    }

    #[test]
    fn test_sanitize_truncates_but_keeps_extension() {
        let long = format!("{}.zip", "x".repeat(400));
        let out = sanitize_filename(&long);
        assert_eq!(out.len(), FILENAME_MAX_LENGTH);
        assert!(out.ends_with(".zip"));
    }

    #[test]
    fn test_sanitize_keeps_ordinary_names() {
        assert_eq!(sanitize_filename("q1 data.CSV"), "q1 data.CSV");
    }

    #[test]
    fn test_file_extension_is_lowercased() {
        assert_eq!(file_extension(Path::new("DATA.ZIP")), "zip");
        assert_eq!(file_extension(Path::new("uploads/x/table.Csv")), "csv");
    }

    #[test]
    fn test_file_extension_missing() {
        assert_eq!(file_extension(Path::new("README")), "");
        assert_eq!(file_extension(Path::new(".hidden")), "");
    }
}
