// file: src/module/record.rs
// version: 1.0.0
// guid: f7081a2b-3b4c-45d6-e7e8-f90a1b2c3d45

//! Module record structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a module's log lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    #[default]
    File,
    Systemd,
}

/// A single value or a list of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(String::from).collect())
    }
}

impl From<LogType> for OneOrMany<LogType> {
    fn from(value: LogType) -> Self {
        OneOrMany::One(value)
    }
}

impl From<Vec<LogType>> for OneOrMany<LogType> {
    fn from(values: Vec<LogType>) -> Self {
        OneOrMany::Many(values)
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<OneOrMany<T>> = Option::deserialize(deserializer)?;
    Ok(value.map(OneOrMany::into_vec))
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One stored entry of the module registry.
///
/// Keys this crate does not know about are kept in `extra` so rewriting the
/// registry never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "one_or_many")]
    pub log: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "one_or_many")]
    pub log_type: Option<Vec<LogType>>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub need_lock: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_exposed_ports: Option<Vec<u16>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_conf: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_status: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Arguments of a module registration
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSpec {
    pub name: String,
    pub description: Option<String>,
    pub log: Option<OneOrMany<String>>,
    pub log_type: OneOrMany<LogType>,
    pub need_lock: bool,
    pub test_status: Option<String>,
    pub test_conf: Option<String>,
    pub needs_exposed_ports: Vec<u16>,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            log: None,
            log_type: OneOrMany::One(LogType::default()),
            need_lock: false,
            test_status: None,
            test_conf: None,
            needs_exposed_ports: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn log(mut self, log: impl Into<OneOrMany<String>>) -> Self {
        self.log = Some(log.into());
        self
    }

    pub fn log_type(mut self, log_type: impl Into<OneOrMany<LogType>>) -> Self {
        self.log_type = log_type.into();
        self
    }

    pub fn need_lock(mut self, need_lock: bool) -> Self {
        self.need_lock = need_lock;
        self
    }

    pub fn test_status(mut self, command: impl Into<String>) -> Self {
        self.test_status = Some(command.into());
        self
    }

    pub fn test_conf(mut self, command: impl Into<String>) -> Self {
        self.test_conf = Some(command.into());
        self
    }

    pub fn needs_exposed_ports(mut self, ports: Vec<u16>) -> Self {
        self.needs_exposed_ports = ports;
        self
    }
}

/// Pad `log_type` to the length of `log` by repeating its last element.
///
/// Returns `None` when the lengths cannot be reconciled: an empty `log_type`
/// or one longer than `log`.
pub fn pad_log_types(log_len: usize, mut log_type: Vec<LogType>) -> Option<Vec<LogType>> {
    if log_type.len() < log_len {
        let last = *log_type.last()?;
        log_type.resize(log_len, last);
    }

    (log_type.len() == log_len).then_some(log_type)
}
