// file: src/system/systemd.rs
// version: 1.0.0
// guid: 7f8091a2-b3c4-4d5e-8f60-718293a4b5c6

use super::command;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ServiceManager: Send + Sync {
    /// Declared description of a unit. Units without one report
    /// `<name>.service`, which callers treat as "no description".
    async fn unit_description(&self, name: &str) -> Result<String>;
}

pub struct SystemctlServiceManager {
    systemctl: String,
}

impl SystemctlServiceManager {
    pub fn new(systemctl: impl Into<String>) -> Self {
        Self {
            systemctl: systemctl.into(),
        }
    }
}

#[async_trait]
impl ServiceManager for SystemctlServiceManager {
    async fn unit_description(&self, name: &str) -> Result<String> {
        let args = vec![
            "show".to_string(),
            name.to_string(),
            "--property=Description".to_string(),
        ];
        let out = command::run(&self.systemctl, &args, None).await?;
        Ok(parse_description(&out))
    }
}

fn parse_description(output: &str) -> String {
    output
        .lines()
        .find_map(|line| line.strip_prefix("Description="))
        .unwrap_or_default()
        .trim()
        .to_string()
}
