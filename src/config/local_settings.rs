use crate::domain::ports::VarSource;
use crate::utils::error::{KeyConfigError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_LOCAL_FILE: &str = "local.toml";

/// Developer-local settings, kept out of version control.
///
/// ```toml
/// WAYFARER_AMAP_API_KEY = "${AMAP_KEY_FROM_VAULT}"
/// WAYFARER_API_BASE_URL = "http://192.168.1.20:8000"
///
/// [presence]
/// placeholders = ["CHANGE_ME"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSettings {
    #[serde(rename = "WAYFARER_AMAP_API_KEY")]
    pub amap_api_key: Option<String>,
    #[serde(rename = "WAYFARER_API_BASE_URL")]
    pub api_base_url: Option<String>,
    pub presence: Option<PresenceSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSettings {
    #[serde(default)]
    pub placeholders: Vec<String>,
}

impl LocalSettings {
    /// 從 TOML 檔案載入設定；只有檔案不存在時回傳空設定
    pub fn load_optional<P: AsRef<Path>>(path: P, vars: &dyn VarSource) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(_) => Self::from_file(path, vars),
            // 懸空的符號連結也回報 NotFound，但不能當成沒有設定
            Err(e)
                if e.kind() == ErrorKind::NotFound && std::fs::symlink_metadata(path).is_err() =>
            {
                tracing::debug!("No local settings at {}, skipping", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(KeyConfigError::IoError(e)),
        }
    }

    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P, vars: &dyn VarSource) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::parse(&content, vars).map_err(|e| match e {
            KeyConfigError::TomlParseError { message, .. } => KeyConfigError::TomlParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        tracing::debug!("Loaded local settings from {}", path.display());
        Ok(settings)
    }

    /// 從 TOML 字串解析設定，再替換字串欄位中的 ${VAR}
    pub fn parse(content: &str, vars: &dyn VarSource) -> Result<Self> {
        let mut settings: Self =
            toml::from_str(content).map_err(|e| KeyConfigError::TomlParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        // 解析後才替換，變數值不經過 TOML 跳脫處理
        let re = var_pattern()?;
        for field in [&mut settings.amap_api_key, &mut settings.api_base_url]
            .into_iter()
            .flatten()
        {
            *field = substitute_vars(&re, field, vars);
        }
        if let Some(presence) = settings.presence.as_mut() {
            for placeholder in presence.placeholders.iter_mut() {
                *placeholder = substitute_vars(&re, placeholder, vars);
            }
        }

        Ok(settings)
    }

    pub fn placeholders(&self) -> &[String] {
        self.presence
            .as_ref()
            .map(|p| p.placeholders.as_slice())
            .unwrap_or(&[])
    }
}

impl Validate for LocalSettings {
    fn validate(&self) -> Result<()> {
        for placeholder in self.placeholders() {
            validate_non_empty_string("presence.placeholders", placeholder)?;
        }
        Ok(())
    }
}

fn var_pattern() -> Result<Regex> {
    Regex::new(r"\$\{([^}]+)\}").map_err(|e| KeyConfigError::InvalidConfigValueError {
        field: "substitution_pattern".to_string(),
        value: String::new(),
        reason: e.to_string(),
    })
}

/// 替換 ${VAR_NAME}；未定義的變數保留原樣
fn substitute_vars(re: &Regex, value: &str, vars: &dyn VarSource) -> String {
    re.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps[1];
        vars.var(var_name)
            .unwrap_or_else(|| format!("${{{}}}", var_name))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_vars() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_parse_flat_keys() {
        let content = r#"
WAYFARER_AMAP_API_KEY = "abc123"
WAYFARER_API_BASE_URL = "https://api.example.com"
"#;
        let settings = LocalSettings::parse(content, &no_vars()).unwrap();
        assert_eq!(settings.amap_api_key.as_deref(), Some("abc123"));
        assert_eq!(settings.api_base_url.as_deref(), Some("https://api.example.com"));
        assert!(settings.placeholders().is_empty());
    }

    #[test]
    fn test_var_substitution() {
        let mut vars = no_vars();
        vars.insert("VAULT_KEY".to_string(), "from-vault".to_string());

        let content = r#"
WAYFARER_AMAP_API_KEY = "${VAULT_KEY}"
WAYFARER_API_BASE_URL = "${UNSET_URL}"
"#;
        let settings = LocalSettings::parse(content, &vars).unwrap();
        assert_eq!(settings.amap_api_key.as_deref(), Some("from-vault"));
        assert_eq!(settings.api_base_url.as_deref(), Some("${UNSET_URL}"));
    }

    #[test]
    fn test_substituted_values_are_taken_verbatim() {
        let mut vars = no_vars();
        vars.insert("QUOTED".to_string(), r#"ab"cd"#.to_string());
        vars.insert("ESCAPED".to_string(), r"ab\tcd".to_string());
        vars.insert("MARKER".to_string(), "TODO_\\KEY".to_string());

        let content = r#"
WAYFARER_AMAP_API_KEY = "${QUOTED}"
WAYFARER_API_BASE_URL = "${ESCAPED}"

[presence]
placeholders = ["${MARKER}"]
"#;
        let settings = LocalSettings::parse(content, &vars).unwrap();
        assert_eq!(settings.amap_api_key.as_deref(), Some(r#"ab"cd"#));
        assert_eq!(settings.api_base_url.as_deref(), Some(r"ab\tcd"));
        assert_eq!(settings.placeholders(), &[r"TODO_\KEY".to_string()]);
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = LocalSettings::from_file(dir.path(), &no_vars()).unwrap_err();
        assert!(matches!(err, KeyConfigError::IoError(_)));

        let err = LocalSettings::load_optional(dir.path(), &no_vars()).unwrap_err();
        assert!(matches!(err, KeyConfigError::IoError(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("local.toml");
        std::os::unix::fs::symlink(dir.path().join("gone.toml"), &link).unwrap();

        let err = LocalSettings::load_optional(&link, &no_vars()).unwrap_err();
        assert!(matches!(err, KeyConfigError::IoError(_)));
    }

    #[test]
    fn test_blank_placeholder_fails_validation() {
        let content = r#"
[presence]
placeholders = ["CHANGE_ME", "  "]
"#;
        let settings = LocalSettings::parse(content, &no_vars()).unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"WAYFARER_AMAP_API_KEY = abc").unwrap();

        let err = LocalSettings::from_file(temp_file.path(), &no_vars()).unwrap_err();
        match err {
            KeyConfigError::TomlParseError { path, .. } => {
                assert_eq!(path, temp_file.path().display().to_string());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings =
            LocalSettings::load_optional(dir.path().join("local.toml"), &no_vars()).unwrap();
        assert_eq!(settings, LocalSettings::default());
    }
}
