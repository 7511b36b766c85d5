// file: src/ssh/authorized_keys.rs
// version: 1.0.0
// guid: 3c4d5e6f-7f80-491a-2b3c-c3d4e5f60718

//! OpenSSH `authorized_keys` reading and editing
//!
//! A `#` line names the key on the next non-blank line. Blank lines between
//! the two do not break the pairing; a key consumes the pending name.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedKeyEntry {
    pub key: String,
    pub name: String,
}

/// Parse key entries in file order
pub fn parse(content: &str) -> Vec<AuthorizedKeyEntry> {
    let mut entries = Vec::new();
    let mut pending_comment = String::new();

    for line in content.split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        let left = line.trim_start();
        if left.starts_with('#') {
            pending_comment = left.trim_start_matches('#').trim().to_string();
            continue;
        }

        entries.push(AuthorizedKeyEntry {
            key: line.trim().to_string(),
            name: std::mem::take(&mut pending_comment),
        });
    }

    entries
}

/// Normalize a comment into its `# ...` line, or `None` if it is blank
pub fn comment_line(comment: &str) -> Option<String> {
    if comment.trim().is_empty() {
        return None;
    }

    let prefixed = if comment.trim_start().starts_with('#') {
        comment.to_string()
    } else {
        format!("# {}", comment)
    };

    Some(prefixed.replace('\n', " ").trim().to_string())
}

/// Append a key, preceded by two blank lines and its optional comment
pub fn append(content: &str, key: &str, comment: Option<&str>) -> String {
    let mut out = String::with_capacity(content.len() + key.len() + 64);
    out.push_str(content);
    out.push_str("\n\n");

    if let Some(line) = comment.and_then(comment_line) {
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str(key.trim());
    out.push('\n');
    out
}

/// Delete every occurrence of `key`.
///
/// Matching is a plain substring search, not line-aware: the key is also cut
/// out of comments or longer keys that contain it. The comment that named the
/// key is left in place. Returns `None` when the key does not occur.
pub fn remove(content: &str, key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() || !content.contains(key) {
        return None;
    }
    Some(content.replace(key, ""))
}
