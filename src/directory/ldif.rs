// file: src/directory/ldif.rs
// version: 1.0.0
// guid: c4d5e6f7-0819-42a3-b4b5-c6d7e8f90a12

//! Minimal LDIF reader and modify-record writer

use super::{Attributes, DirectoryEntry};
use crate::error::AdminError;
use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Parse the content records of an LDIF document
pub fn parse(input: &str) -> Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();
    let mut logical: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.is_empty() {
            if let Some(entry) = build_entry(&logical)? {
                entries.push(entry);
            }
            logical.clear();
        } else if let Some(rest) = line.strip_prefix(' ') {
            // Folded line
            match logical.last_mut() {
                Some(prev) => prev.push_str(rest),
                None => return Err(AdminError::directory("LDIF continuation without a record")),
            }
        } else if !line.starts_with('#') {
            logical.push(line.to_string());
        }
    }

    if let Some(entry) = build_entry(&logical)? {
        entries.push(entry);
    }

    Ok(entries)
}

fn build_entry(lines: &[String]) -> Result<Option<DirectoryEntry>> {
    let mut entry = DirectoryEntry::default();
    let mut attributes = Attributes::new();

    for line in lines {
        let (name, value) = parse_attr_line(line)?;
        if name.eq_ignore_ascii_case("version") && entry.dn.is_empty() {
            continue;
        }
        if name.eq_ignore_ascii_case("dn") {
            entry.dn = value;
        } else {
            attributes.entry(name).or_default().push(value);
        }
    }

    if entry.dn.is_empty() {
        if attributes.is_empty() {
            return Ok(None);
        }
        return Err(AdminError::directory("LDIF record without a dn"));
    }

    entry.attributes = attributes;
    Ok(Some(entry))
}

fn parse_attr_line(line: &str) -> Result<(String, String)> {
    let (name, rest) = line
        .split_once(':')
        .ok_or_else(|| AdminError::directory(format!("Malformed LDIF line: {}", line)))?;

    let value = if let Some(encoded) = rest.strip_prefix(':') {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AdminError::directory(format!("Invalid base64 for {}: {}", name, e)))?;
        String::from_utf8_lossy(&bytes).to_string()
    } else {
        rest.trim_start().to_string()
    };

    Ok((name.to_string(), value))
}

/// Render a `changetype: modify` record replacing each attribute
pub fn modify_replace(dn: &str, changes: &Attributes) -> String {
    let mut out = attr_line("dn", dn);
    out.push_str("changetype: modify\n");
    for (name, values) in changes {
        out.push_str(&format!("replace: {}\n", name));
        for value in values {
            out.push_str(&attr_line(name, value));
        }
        out.push_str("-\n");
    }
    out
}

fn attr_line(name: &str, value: &str) -> String {
    if is_safe_string(value) {
        format!("{}: {}\n", name, value)
    } else {
        format!("{}:: {}\n", name, STANDARD.encode(value))
    }
}

fn is_safe_string(value: &str) -> bool {
    if value.starts_with([' ', ':', '<']) || value.ends_with(' ') {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii() && c != '\n' && c != '\r' && c != '\0')
}
