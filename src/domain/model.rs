use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a resolved value came from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    Override,
    Environment,
    LocalFile,
    Default,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeySource::Override => "command line",
            KeySource::Environment => "environment",
            KeySource::LocalFile => "local settings file",
            KeySource::Default => "built-in default",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum BuildProfile {
    #[default]
    Debug,
    Release,
    Benchmark,
}

impl BuildProfile {
    /// Debug talks to the host machine from the emulator.
    pub fn default_base_url(self) -> &'static str {
        match self {
            BuildProfile::Debug => "http://10.0.2.2:8000",
            BuildProfile::Release | BuildProfile::Benchmark => "https://waf.pscly.cc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStatus {
    pub source: KeySource,
    pub present: bool,
    pub masked: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub profile: BuildProfile,
    pub amap_key: KeyStatus,
    pub base_url: String,
    pub base_url_source: KeySource,
}

/// Shows at most four leading characters, and never more than half the key.
pub fn mask_key(value: &str) -> String {
    let trimmed = value.trim();
    let count = trimmed.chars().count();
    let shown = (count / 2).min(4);
    let head: String = trimmed.chars().take(shown).collect();
    format!("{}{}", head, "*".repeat(count - shown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abc"), "a**");
        assert_eq!(mask_key("abcde"), "ab***");
        assert_eq!(mask_key("x"), "*");
        assert_eq!(mask_key("  abcdef12 "), "abcd****");
        assert_eq!(mask_key(""), "");
    }

    #[test]
    fn test_profile_defaults() {
        assert_eq!(BuildProfile::default(), BuildProfile::Debug);
        assert_eq!(BuildProfile::Release.default_base_url(), "https://waf.pscly.cc");
        assert_eq!(
            BuildProfile::Benchmark.default_base_url(),
            BuildProfile::Release.default_base_url()
        );
    }
}
