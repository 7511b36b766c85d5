// file: src/directory/mod.rs
// version: 1.0.0
// guid: b3c4d5e6-f708-4192-a3a4-b5c6d7e8f901

//! Directory service access for non-system accounts

pub mod ldap;
pub mod ldif;

pub use ldap::LdapCliDirectory;

use crate::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Attribute name to values, as returned by a directory search
pub type Attributes = BTreeMap<String, Vec<String>>;

/// One record returned by a directory search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attributes: Attributes,
}

impl DirectoryEntry {
    /// First value of an attribute, matched case-insensitively
    pub fn first(&self, attr: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(attr))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}

#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Replace the given attributes on the record `dn`
    async fn update(&self, dn: &str, changes: &Attributes) -> Result<()>;

    /// Search below `base_dn`; an empty `attrs` slice requests every attribute
    async fn search(&self, base_dn: &str, filter: &str, attrs: &[&str]) -> Result<Vec<DirectoryEntry>>;
}

/// Escape a value for use inside an LDAP search filter (RFC 4515)
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\\' => escaped.push_str("\\5c"),
            '\0' => escaped.push_str("\\00"),
            _ => escaped.push(c),
        }
    }
    escaped
}
