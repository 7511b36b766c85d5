// file: src/error.rs
// version: 1.0.0
// guid: 3c7e1f20-5b9a-4d61-8e0f-2a4b6c8d0e13

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AdminError>;

/// Error types for the host administration agent
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Failed to add module '{module}'")]
    ModuleAddFailed { module: String },

    #[error("Failed to remove module '{module}'")]
    ModuleRemoveFailed { module: String },

    #[error("Unknown module '{module}'")]
    ModuleUnknown { module: String },

    #[error("Unknown user '{user}'")]
    UserUnknown { user: String },

    #[error("Key '{key}' is not present in authorized_keys")]
    KeyNotFound { key: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Process '{command}' failed (exit code {exit_code:?}): {stderr}")]
    Process {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Directory service error: {0}")]
    Directory(String),

    #[error("System error: {0}")]
    System(String),
}

impl AdminError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new process error
    pub fn process(command: impl Into<String>, exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a new directory service error
    pub fn directory(msg: impl Into<String>) -> Self {
        Self::Directory(msg.into())
    }

    /// Create a new system error
    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// Create a new file not found error
    pub fn file_not_found(msg: impl Into<String>) -> Self {
        Self::FileNotFound(msg.into())
    }

    pub fn user_unknown(user: impl Into<String>) -> Self {
        Self::UserUnknown { user: user.into() }
    }

    /// Message id used by the notice catalog for user-facing failures
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::ModuleAddFailed { .. } => "module_add_failed",
            Self::ModuleRemoveFailed { .. } => "module_remove_failed",
            Self::ModuleUnknown { .. } => "module_unknown",
            Self::UserUnknown { .. } => "user_unknown",
            Self::KeyNotFound { .. } => "ssh_key_not_found",
            Self::FileNotFound(_) => "file_not_found",
            Self::Io(_) | Self::System(_) => "system_error",
            Self::Yaml(_) | Self::Serialization(_) => "serialization_error",
            Self::Config(_) => "config_error",
            Self::Process { .. } => "process_error",
            Self::Directory(_) => "directory_error",
        }
    }
}
