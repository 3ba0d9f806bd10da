use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse settings file '{path}': {message}")]
    TomlParseError { path: String, message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl KeyConfigError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            KeyConfigError::IoError(e) => format!("無法讀取設定檔: {}", e),
            KeyConfigError::TomlParseError { path, .. } => {
                format!("設定檔 '{}' 不是有效的 TOML", path)
            }
            KeyConfigError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值 '{}' 無效: {}", field, reason)
            }
            KeyConfigError::MissingConfigError { field } => format!("缺少設定值 '{}'", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            KeyConfigError::IoError(_) => "Check that the settings file exists and is readable",
            KeyConfigError::TomlParseError { .. } => {
                "Use KEY = \"value\" lines, for example WAYFARER_AMAP_API_KEY = \"...\""
            }
            KeyConfigError::InvalidConfigValueError { .. } => {
                "Fix the value via --base-url, WAYFARER_API_BASE_URL or the settings file"
            }
            KeyConfigError::MissingConfigError { .. } => {
                "Set WAYFARER_AMAP_API_KEY in the environment or in local.toml"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, KeyConfigError>;
