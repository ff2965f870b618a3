//! Storage key generation and original-name recovery.
//!
//! Keys look like `<millis><9 random digits>-<original name>`. The prefix
//! never contains `-`, so the first `-` always ends it and names that
//! contain `-` themselves come back intact.

use chrono::Utc;
use rand::Rng;

pub const SEPARATOR: char = '-';
pub const UNNAMED: &str = "unnamed";

/// Reduce an uploader-supplied name to its last path component.
pub fn sanitize_original_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let base: String = base.chars().filter(|c| *c != '\0').collect();
    match base.as_str() {
        "" | "." | ".." => UNNAMED.to_string(),
        _ => base,
    }
}

/// Build a new storage key for an (already sanitized) original name.
pub fn generate_storage_key(original_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{millis}{nonce:09}{SEPARATOR}{original_name}")
}

/// Everything after the first separator; the whole key if there is none.
pub fn original_name_of(storage_key: &str) -> &str {
    storage_key
        .split_once(SEPARATOR)
        .map(|(_, name)| name)
        .unwrap_or(storage_key)
}

/// A key must name exactly one entry directly inside the store directory.
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_recovers_name() {
        for name in ["report.txt", "my-report-2024.pdf", "-leading.bin", "无标题.md"] {
            let key = generate_storage_key(name);
            assert_eq!(original_name_of(&key), name);
            assert!(is_valid_storage_key(&key));
        }
    }

    #[test]
    fn prefix_is_digits_only() {
        let key = generate_storage_key("a");
        let (prefix, _) = key.split_once(SEPARATOR).unwrap();
        assert!(prefix.len() >= 13 + 9);
        assert!(prefix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn keys_for_same_name_differ() {
        let a = generate_storage_key("same.txt");
        let b = generate_storage_key("same.txt");
        assert_ne!(a, b);
    }

    #[test]
    fn key_without_separator_is_its_own_name() {
        assert_eq!(original_name_of("README"), "README");
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_original_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_original_name("C:\\Users\\me\\photo.png"), "photo.png");
        assert_eq!(sanitize_original_name("dir/"), UNNAMED);
        assert_eq!(sanitize_original_name(".."), UNNAMED);
        assert_eq!(sanitize_original_name(""), UNNAMED);
        assert_eq!(sanitize_original_name("plain name.txt"), "plain name.txt");
    }

    #[test]
    fn invalid_keys_rejected() {
        for key in ["", ".", "..", "a/b", "..\\x", "nul\0"] {
            assert!(!is_valid_storage_key(key), "{key:?} should be invalid");
        }
    }
}
