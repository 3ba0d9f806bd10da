use crate::config::local_settings::LocalSettings;
use crate::domain::key_presence::{PlaceholderSet, MISSING_AMAP_KEY_SENTINEL};
use crate::domain::model::{mask_key, BuildProfile, KeySource, KeyStatus, ResolvedConfig};
use crate::domain::ports::VarSource;
use crate::utils::error::{KeyConfigError, Result};
use crate::utils::validation::validate_url;

pub const AMAP_KEY_VAR: &str = "WAYFARER_AMAP_API_KEY";
pub const BASE_URL_VAR: &str = "WAYFARER_API_BASE_URL";

/// Resolves the AMap key and the API base URL.
///
/// Each value is taken from the first non-blank of: explicit override,
/// variable source, local settings file. The key then falls back to the
/// `MISSING_*` sentinel and the base URL to the profile default.
pub struct KeyResolver<'a> {
    vars: &'a dyn VarSource,
    local: LocalSettings,
    placeholders: PlaceholderSet,
    profile: BuildProfile,
    key_override: Option<String>,
    base_url_override: Option<String>,
}

impl<'a> KeyResolver<'a> {
    pub fn new(vars: &'a dyn VarSource) -> Self {
        Self {
            vars,
            local: LocalSettings::default(),
            placeholders: PlaceholderSet::default(),
            profile: BuildProfile::default(),
            key_override: None,
            base_url_override: None,
        }
    }

    /// Placeholders listed in the settings file are added to the current set.
    pub fn with_local_settings(mut self, local: LocalSettings) -> Self {
        self.placeholders = self.placeholders.with_extra(local.placeholders());
        self.local = local;
        self
    }

    pub fn with_placeholders(mut self, placeholders: PlaceholderSet) -> Self {
        self.placeholders = placeholders.with_extra(self.local.placeholders());
        self
    }

    pub fn with_profile(mut self, profile: BuildProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_key_override(mut self, key: Option<String>) -> Self {
        self.key_override = key;
        self
    }

    pub fn with_base_url_override(mut self, url: Option<String>) -> Self {
        self.base_url_override = url;
        self
    }

    /// Never fails: a key nobody supplied resolves to the sentinel and reports absent.
    pub fn resolve_key(&self) -> (String, KeySource) {
        self.first_non_blank(
            self.key_override.as_deref(),
            AMAP_KEY_VAR,
            self.local.amap_api_key.as_deref(),
        )
        .unwrap_or_else(|| (MISSING_AMAP_KEY_SENTINEL.to_string(), KeySource::Default))
    }

    pub fn key_status(&self) -> KeyStatus {
        let (value, source) = self.resolve_key();
        let present = self.placeholders.is_present(Some(&value));
        if !present {
            tracing::warn!("AMap key is not configured (resolved from {})", source);
        } else {
            tracing::debug!("AMap key {} resolved from {}", mask_key(&value), source);
        }
        KeyStatus {
            source,
            present,
            masked: if present { mask_key(&value) } else { String::new() },
        }
    }

    pub fn resolve_base_url(&self) -> Result<(String, KeySource)> {
        let (url, source) = self
            .first_non_blank(
                self.base_url_override.as_deref(),
                BASE_URL_VAR,
                self.local.api_base_url.as_deref(),
            )
            .unwrap_or_else(|| (self.profile.default_base_url().to_string(), KeySource::Default));

        validate_url(BASE_URL_VAR, &url)?;
        tracing::debug!("API base URL {} resolved from {}", url, source);
        Ok((url, source))
    }

    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let (base_url, base_url_source) = self.resolve_base_url()?;
        Ok(ResolvedConfig {
            profile: self.profile,
            amap_key: self.key_status(),
            base_url,
            base_url_source,
        })
    }

    fn first_non_blank(
        &self,
        explicit: Option<&str>,
        var_name: &str,
        local: Option<&str>,
    ) -> Option<(String, KeySource)> {
        let from_var = self.vars.var(var_name);
        let found = [
            (explicit, KeySource::Override),
            (from_var.as_deref(), KeySource::Environment),
            (local, KeySource::LocalFile),
        ]
        .into_iter()
        .find_map(|(value, source)| {
            let trimmed = value?.trim();
            (!trimmed.is_empty()).then(|| (trimmed.to_string(), source))
        });
        found
    }
}

impl ResolvedConfig {
    /// The key status as an error when no usable key was found.
    pub fn require_key(&self) -> Result<&KeyStatus> {
        if self.amap_key.present {
            Ok(&self.amap_key)
        } else {
            Err(KeyConfigError::MissingConfigError {
                field: AMAP_KEY_VAR.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_sentinel_when_nothing_configured() {
        let vars: HashMap<String, String> = HashMap::new();
        let resolver = KeyResolver::new(&vars);
        assert_eq!(
            resolver.resolve_key(),
            (MISSING_AMAP_KEY_SENTINEL.to_string(), KeySource::Default)
        );
        assert!(!resolver.key_status().present);
    }

    #[test]
    fn test_blank_override_falls_through() {
        let vars = HashMap::from([(AMAP_KEY_VAR.to_string(), " env-key ".to_string())]);
        let resolver = KeyResolver::new(&vars).with_key_override(Some("   ".to_string()));
        assert_eq!(
            resolver.resolve_key(),
            ("env-key".to_string(), KeySource::Environment)
        );
    }

    #[test]
    fn test_file_value_used_when_var_unset() {
        let vars: HashMap<String, String> = HashMap::new();
        let local = LocalSettings {
            api_base_url: Some(" https://api.example.com ".to_string()),
            ..LocalSettings::default()
        };
        let resolver = KeyResolver::new(&vars).with_local_settings(local);
        assert_eq!(
            resolver.resolve_base_url().unwrap(),
            ("https://api.example.com".to_string(), KeySource::LocalFile)
        );
    }

    #[test]
    fn test_require_key() {
        let vars: HashMap<String, String> = HashMap::new();
        let resolved = KeyResolver::new(&vars).resolve().unwrap();
        assert!(matches!(
            resolved.require_key(),
            Err(KeyConfigError::MissingConfigError { .. })
        ));
    }
}
