// file: src/cli/commands.rs
// version: 1.0.0
// guid: b4c5d6e7-f708-4192-a3b4-4b5c6d7e8f96

//! Command implementations for the CLI

use super::args::{ModuleAddArgs, ModuleCommand, SshCommand};
use crate::{
    config::AdminConfig,
    directory::LdapCliDirectory,
    logging::logger::with_async_operation_span,
    messages,
    module::{LogType, ModuleRegistry, ModuleSpec, OneOrMany},
    ssh::SshAccessManager,
    system::{NscdCache, SystemAccounts, SystemctlServiceManager},
    Result,
};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

/// Wires the managers to the real host collaborators
pub struct AppContext {
    config: Arc<AdminConfig>,
}

impl AppContext {
    pub fn new(config: AdminConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn registry(&self) -> ModuleRegistry {
        let services = SystemctlServiceManager::new(self.config.commands.systemctl.clone());
        ModuleRegistry::new(self.config.paths.modules_file.clone(), Arc::new(services))
    }

    pub fn ssh_manager(&self) -> SshAccessManager {
        let directory = LdapCliDirectory::new(self.config.directory.clone(), &self.config.commands);
        SshAccessManager::new(
            Arc::new(SystemAccounts),
            Arc::new(directory),
            Arc::new(NscdCache::new(self.config.commands.nscd.clone())),
            self.config.clone(),
        )
    }
}

/// Run a `module` subcommand
pub async fn module_command(ctx: &AppContext, command: ModuleCommand) -> Result<()> {
    let registry = ctx.registry();

    match command {
        ModuleCommand::Add(args) => {
            let name = args.name.clone();
            with_async_operation_span("module add", || module_add_command(&registry, args)).await?;
            print_success("module_added", &[("module", name.as_str())]);
            Ok(())
        }
        ModuleCommand::Remove { name } => {
            with_async_operation_span("module remove", || registry.remove(&name)).await?;
            print_success("module_removed", &[("module", name.as_str())]);
            Ok(())
        }
        ModuleCommand::List { json } => module_list_command(&registry, json).await,
        ModuleCommand::Info { name } => {
            let record = registry.get(&name).await?;
            println!("{}", serde_yaml::to_string(&record)?);
            Ok(())
        }
    }
}

async fn module_add_command(registry: &ModuleRegistry, args: ModuleAddArgs) -> Result<()> {
    if args.status.is_some() {
        messages::notice_warning("module_status_deprecated", &[("module", args.name.as_str())]);
    }

    let log_type: Vec<LogType> = args.log_type.into_iter().map(Into::into).collect();
    let spec = ModuleSpec {
        name: args.name,
        description: args.description,
        log: args.log.map(OneOrMany::Many),
        log_type: OneOrMany::Many(log_type),
        need_lock: args.need_lock,
        test_status: args.test_status,
        test_conf: args.test_conf,
        needs_exposed_ports: args.needs_exposed_ports,
    };

    registry.add(spec).await
}

async fn module_list_command(registry: &ModuleRegistry, json_output: bool) -> Result<()> {
    let modules = registry.list().await;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }

    if modules.is_empty() {
        info!("No custom modules registered");
        return Ok(());
    }

    println!("{}", format!("{:<24} {:<10} {}", "NAME", "LOCK", "DESCRIPTION").bold());
    for (name, record) in &modules {
        println!(
            "{:<24} {:<10} {}",
            name,
            if record.need_lock { "yes" } else { "no" },
            record.description.as_deref().unwrap_or("-")
        );
    }

    info!("Found {} modules", modules.len());
    Ok(())
}

/// Run an `ssh` subcommand
pub async fn ssh_command(ctx: &AppContext, command: SshCommand) -> Result<()> {
    let manager = ctx.ssh_manager();

    match command {
        SshCommand::Allow { username } => {
            with_async_operation_span("ssh allow", || manager.allow(&username)).await?;
            print_success("ssh_allowed", &[("user", username.as_str())]);
            Ok(())
        }
        SshCommand::Disallow { username } => {
            with_async_operation_span("ssh disallow", || manager.disallow(&username)).await?;
            print_success("ssh_disallowed", &[("user", username.as_str())]);
            Ok(())
        }
        SshCommand::Info { username, json } => {
            let user = manager.user(&username).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                let access = if user.ssh_allowed {
                    "allowed".green()
                } else {
                    "disallowed".red()
                };
                println!("{:<10} {}", "username".bold(), user.username);
                println!("{:<10} {}", "fullname".bold(), user.fullname);
                println!("{:<10} {}", "mail".bold(), user.mail);
                println!("{:<10} {}", "shell".bold(), user.shell);
                println!("{:<10} {}", "home".bold(), user.home_path);
                println!("{:<10} {}", "ssh".bold(), access);
            }
            Ok(())
        }
        SshCommand::ListKeys { username, json } => {
            let list = manager.list_keys(&username).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for entry in &list.keys {
                    let name = if entry.name.is_empty() { "-" } else { entry.name.as_str() };
                    println!("{} {}", name.bold(), entry.key);
                }
                info!("Found {} keys for {}", list.keys.len(), username);
            }
            Ok(())
        }
        SshCommand::AddKey {
            username,
            key,
            comment,
        } => {
            with_async_operation_span("ssh add-key", || {
                manager.add_key(&username, &key, comment.as_deref())
            })
            .await?;
            print_success("ssh_key_added", &[("user", username.as_str())]);
            Ok(())
        }
        SshCommand::RemoveKey { username, key } => {
            with_async_operation_span("ssh remove-key", || manager.remove_key(&username, &key))
                .await?;
            print_success("ssh_key_removed", &[("user", username.as_str())]);
            Ok(())
        }
    }
}

/// Print the notice of a completed change on stdout
fn print_success(key: &str, params: &[(&str, &str)]) {
    println!("{}", messages::render(key, params).green());
}
