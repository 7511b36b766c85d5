// file: src/messages.rs
// version: 1.0.0
// guid: 8f2d4a61-0c3e-4b7f-9a15-6e7d8c9b0a21

//! User-facing notices keyed by message id
//!
//! Operations report success through [`notice_success`] with a message id and
//! substitution parameters. The catalog below holds the English templates;
//! unknown ids are rendered as the bare id so a missing translation never
//! hides the event.

use tracing::{info, warn};

/// Look up the template for a message id
pub fn template(key: &str) -> Option<&'static str> {
    let text = match key {
        "module_added" => "The module '{module}' has been added",
        "module_removed" => "The module '{module}' has been removed",
        "module_add_failed" => "Unable to add module '{module}'",
        "module_remove_failed" => "Unable to remove module '{module}'",
        "module_unknown" => "Unknown module '{module}'",
        "module_description_missing" => {
            "/!\\ Packager ! You added a custom system module without specifying a description. \
             Please add a proper Description in the systemd configuration, or use --description \
             to explain what the module does in a similar fashion to existing modules."
        }
        "module_status_deprecated" => {
            "The 'status' option of module '{module}' is deprecated and ignored, use test_status instead"
        }
        "user_unknown" => "Unknown user: {user}",
        "ssh_allowed" => "SSH login is now allowed for '{user}'",
        "ssh_disallowed" => "SSH login is now disallowed for '{user}'",
        "ssh_key_added" => "SSH key added for '{user}'",
        "ssh_key_removed" => "SSH key removed for '{user}'",
        "ssh_key_not_found" => "Key '{key}' is not present in authorized_keys",
        _ => return None,
    };
    Some(text)
}

/// Render a message id with `{name}` placeholders substituted
pub fn render(key: &str, params: &[(&str, &str)]) -> String {
    let mut text = template(key).unwrap_or(key).to_string();
    for (name, value) in params {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}

/// Emit a success notice
pub fn notice_success(key: &str, params: &[(&str, &str)]) {
    let text = render(key, params);
    info!(message_id = key, "{}", text);
}

/// Emit a warning notice
pub fn notice_warning(key: &str, params: &[(&str, &str)]) {
    let text = render(key, params);
    warn!(message_id = key, "{}", text);
}
