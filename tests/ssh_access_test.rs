// file: tests/ssh_access_test.rs
// version: 1.0.0
// guid: e7f8091a-2a3b-44c5-d6e7-7e8f901a2b39

//! Integration tests for SSH access management

mod common;

use common::{current_uid, TestHost};
use host_admin_agent::{ssh::AuthorizedKeyEntry, AdminError, Result};
use std::os::unix::fs::{MetadataExt, PermissionsExt};

const KEY_A: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGx1Y2t5IGtleSBvbmU alice@laptop";
const KEY_B: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGx1Y2t5IGtleSB0d28 alice@desktop";

#[tokio::test]
async fn test_unknown_user_is_rejected() {
    let host = TestHost::new("");

    let result = host.manager.list_keys("mallory").await;

    assert!(matches!(result, Err(AdminError::UserUnknown { ref user }) if user == "mallory"));
}

#[tokio::test]
async fn test_directory_user_without_home_cannot_get_keys() {
    let host = TestHost::new("");
    host.directory
        .add_entry("bob", &[("loginShell", "/bin/bash"), ("uidNumber", "1002")]);
    let cwd_keys = std::env::current_dir()
        .unwrap()
        .join(".ssh")
        .join("authorized_keys");
    let existed_before = cwd_keys.exists();

    let result = host.manager.add_key("bob", KEY_A, None).await;

    assert!(matches!(result, Err(AdminError::Directory(_))));
    assert!(matches!(
        host.manager.list_keys("bob").await,
        Err(AdminError::Directory(_))
    ));
    assert_eq!(cwd_keys.exists(), existed_before);
}

#[tokio::test]
async fn test_list_keys_without_file_is_empty() -> Result<()> {
    let host = TestHost::new("");

    let list = host.manager.list_keys("alice").await?;

    assert!(list.keys.is_empty());
    assert!(!host.authorized_keys("alice").exists());
    Ok(())
}

#[tokio::test]
async fn test_add_key_creates_private_file() -> Result<()> {
    let host = TestHost::new("");

    host.manager
        .add_key("alice", &format!("  {}  ", KEY_A), Some("laptop"))
        .await?;

    let path = host.authorized_keys("alice");
    let meta = std::fs::metadata(&path)?;
    assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    assert_eq!(meta.uid(), current_uid());
    assert!(path.parent().unwrap().is_dir());

    let list = host.manager.list_keys("alice").await?;
    assert_eq!(
        list.keys,
        vec![AuthorizedKeyEntry {
            key: KEY_A.to_string(),
            name: "laptop".to_string(),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_keys_listed_in_file_order() -> Result<()> {
    let host = TestHost::new("");

    host.manager.add_key("alice", KEY_A, Some("# laptop")).await?;
    host.manager.add_key("alice", KEY_B, Some("desktop\nat home")).await?;

    let list = host.manager.list_keys("alice").await?;

    assert_eq!(list.keys.len(), 2);
    assert_eq!(list.keys[0].key, KEY_A);
    assert_eq!(list.keys[0].name, "laptop");
    assert_eq!(list.keys[1].key, KEY_B);
    assert_eq!(list.keys[1].name, "desktop at home");
    Ok(())
}

#[tokio::test]
async fn test_add_key_keeps_existing_content() -> Result<()> {
    let host = TestHost::new("");
    let path = host.authorized_keys("alice");
    std::fs::create_dir_all(path.parent().unwrap())?;
    std::fs::write(&path, format!("# managed elsewhere\n{}\n", KEY_B))?;

    host.manager.add_key("alice", KEY_A, None).await?;

    let content = std::fs::read_to_string(&path)?;
    assert_eq!(
        content,
        format!("# managed elsewhere\n{}\n\n\n{}\n", KEY_B, KEY_A)
    );
    Ok(())
}

#[tokio::test]
async fn test_remove_key_leaves_orphaned_comment() -> Result<()> {
    let host = TestHost::new("");
    host.manager.add_key("alice", KEY_A, Some("laptop")).await?;
    host.manager.add_key("alice", KEY_B, Some("desktop")).await?;

    host.manager.remove_key("alice", KEY_A).await?;

    let list = host.manager.list_keys("alice").await?;
    assert_eq!(list.keys.len(), 1);
    assert_eq!(list.keys[0].key, KEY_B);
    // The orphaned "laptop" comment is overridden by "desktop"
    assert_eq!(list.keys[0].name, "desktop");

    let raw = std::fs::read_to_string(host.authorized_keys("alice"))?;
    assert!(raw.contains("# laptop"));
    assert!(!raw.contains(KEY_A));
    Ok(())
}

#[tokio::test]
async fn test_remove_key_without_file() {
    let host = TestHost::new("");

    let result = host.manager.remove_key("alice", KEY_A).await;

    assert!(matches!(result, Err(AdminError::FileNotFound(_))));
}

#[tokio::test]
async fn test_remove_absent_key() -> Result<()> {
    let host = TestHost::new("");
    host.manager.add_key("alice", KEY_A, None).await?;
    let before = std::fs::read(host.authorized_keys("alice"))?;

    let result = host.manager.remove_key("alice", KEY_B).await;

    assert!(matches!(result, Err(AdminError::KeyNotFound { .. })));
    assert_eq!(std::fs::read(host.authorized_keys("alice"))?, before);
    Ok(())
}

#[tokio::test]
async fn test_root_keys_live_in_root_home() -> Result<()> {
    let host = TestHost::new("");

    host.manager.add_key("root", KEY_A, None).await?;

    assert!(host.authorized_keys("root").exists());
    assert_eq!(host.manager.list_keys("root").await?.keys.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_root_ssh_allowed_follows_sshd_config() -> Result<()> {
    for (config, expected) in [
        ("Port 22\nPermitRootLogin no\n", false),
        ("   PermitRootLogin    forced-commands-only   \n", false),
        ("Port 22\n", true),
        ("PermitRootLogin yes\n", true),
    ] {
        let host = TestHost::new(config);
        let root = host.manager.user("root").await?;
        assert_eq!(root.ssh_allowed, expected, "config: {:?}", config);
        assert_eq!(root.shell, "/bin/bash");
    }
    Ok(())
}

#[tokio::test]
async fn test_admin_ssh_allowed_follows_shell() -> Result<()> {
    let host = TestHost::new("");

    let admin = host.manager.user("admin").await?;

    assert!(!admin.ssh_allowed);
    assert_eq!(admin.fullname, "");
    Ok(())
}

#[tokio::test]
async fn test_directory_user_profile() -> Result<()> {
    let host = TestHost::new("");

    let alice = host.manager.user("alice").await?;

    assert_eq!(alice.username, "alice");
    assert_eq!(alice.mail, "alice@example.org");
    assert!(!alice.ssh_allowed);

    let searches = host.directory.searches.lock().unwrap();
    assert_eq!(
        searches[0],
        (
            "ou=users,dc=yunohost,dc=org".to_string(),
            "(&(objectclass=person)(uid=alice))".to_string()
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_username_is_escaped_in_filter() {
    let host = TestHost::new("");

    let result = host.manager.user("*").await;

    assert!(matches!(result, Err(AdminError::UserUnknown { .. })));
    let searches = host.directory.searches.lock().unwrap();
    assert_eq!(searches[0].1, "(&(objectclass=person)(uid=\\2a))");
}

#[tokio::test]
async fn test_allow_sets_shell_and_invalidates_cache() -> Result<()> {
    let host = TestHost::new("");

    host.manager.allow("alice").await?;
    host.manager.disallow("alice").await?;

    let updates = host.directory.updates.lock().unwrap();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].0, "uid=alice,ou=users");
    assert_eq!(updates[0].1["loginShell"], vec!["/bin/bash".to_string()]);
    assert_eq!(updates[1].1["loginShell"], vec!["/bin/false".to_string()]);

    let invalidated = host.cache.invalidated.lock().unwrap();
    assert_eq!(*invalidated, vec!["passwd".to_string(), "passwd".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_disallow_unknown_user_changes_nothing() {
    let host = TestHost::new("");

    let result = host.manager.disallow("mallory").await;

    assert!(matches!(result, Err(AdminError::UserUnknown { .. })));
    assert!(host.directory.updates.lock().unwrap().is_empty());
    assert!(host.cache.invalidated.lock().unwrap().is_empty());
}

#[tokio::test]
#[should_panic(expected = "accounts with uid")]
async fn test_duplicate_directory_accounts_are_fatal() {
    let host = TestHost::new("");
    host.directory
        .add_person("alice", &host.home("alice-twin"), "/bin/bash");

    let _ = host.manager.user("alice").await;
}
