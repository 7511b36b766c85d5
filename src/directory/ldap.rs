// file: src/directory/ldap.rs
// version: 1.0.0
// guid: d5e6f708-192a-43b4-c5c6-d7e8f90a1b23

//! Directory client backed by the OpenLDAP command line tools

use super::{ldif, Attributes, DirectoryEntry, DirectoryService};
use crate::config::{CommandsConfig, DirectoryConfig};
use crate::system::command;
use crate::Result;
use async_trait::async_trait;
use tracing::debug;

pub struct LdapCliDirectory {
    config: DirectoryConfig,
    ldapsearch: String,
    ldapmodify: String,
}

impl LdapCliDirectory {
    pub fn new(config: DirectoryConfig, commands: &CommandsConfig) -> Self {
        Self {
            config,
            ldapsearch: commands.ldapsearch.clone(),
            ldapmodify: commands.ldapmodify.clone(),
        }
    }

    /// Complete a DN relative to the configured base
    pub fn absolute_dn(&self, dn: &str) -> String {
        let base = self.config.base_dn.to_ascii_lowercase();
        if dn.to_ascii_lowercase().ends_with(&base) {
            dn.to_string()
        } else {
            format!("{},{}", dn, self.config.base_dn)
        }
    }

    fn common_args(&self) -> Vec<String> {
        let mut args = vec!["-H".to_string(), self.config.uri.clone()];
        args.extend(self.config.bind_args.iter().cloned());
        args
    }

    fn search_args(&self, base_dn: &str, filter: &str, attrs: &[&str]) -> Vec<String> {
        let mut args = vec!["-LLL".to_string()];
        args.extend(self.common_args());
        args.push("-b".to_string());
        args.push(self.absolute_dn(base_dn));
        args.push(filter.to_string());
        args.extend(attrs.iter().map(|a| a.to_string()));
        args
    }
}

#[async_trait]
impl DirectoryService for LdapCliDirectory {
    async fn update(&self, dn: &str, changes: &Attributes) -> Result<()> {
        let dn = self.absolute_dn(dn);
        let record = ldif::modify_replace(&dn, changes);
        debug!("Updating directory record {}", dn);

        command::run(&self.ldapmodify, &self.common_args(), Some(&record)).await?;
        Ok(())
    }

    async fn search(&self, base_dn: &str, filter: &str, attrs: &[&str]) -> Result<Vec<DirectoryEntry>> {
        let args = self.search_args(base_dn, filter, attrs);
        debug!("Searching directory: {:?}", args);

        let out = command::run(&self.ldapsearch, &args, None).await?;
        ldif::parse(&out)
    }
}
