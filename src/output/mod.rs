// Output formatting: terminal display and report writing.

pub mod terminal;

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like accented or Greek letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Write any serializable value as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("\u{3b1}\u{3c1}\u{3b5}\u{3c4}\u{3ae}", 3), "\u{3b1}\u{3c1}\u{3b5}...");
        assert_eq!(truncate_chars("good", 10), "good");
    }
}
