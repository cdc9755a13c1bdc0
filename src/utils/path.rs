//! Path utilities for user-supplied file arguments.

use std::path::PathBuf;

/// Expand a leading `~/` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `expand_tilde` as an owned string, for APIs that take `&str` paths.
pub fn expand_tilde_str(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_leading_tilde_is_expanded() {
        assert_eq!(expand_tilde("/tmp/a.jpg"), PathBuf::from("/tmp/a.jpg"));
        assert_eq!(expand_tilde("a~/b"), PathBuf::from("a~/b"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/photo.jpg"), home.join("photo.jpg"));
        }
    }
}
