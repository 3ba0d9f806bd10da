//! Presence check for the AMap credential.
//!
//! A key counts as present only when it looks like something a user actually
//! supplied: not blank, not a `MISSING_*` sentinel written by the build, and
//! not one of the known template placeholders.

/// Prefix of sentinels written when no key was configured. Matched case-sensitively.
pub const MISSING_SENTINEL_PREFIX: &str = "MISSING_";

/// Sentinel used when every source for the AMap key is blank.
pub const MISSING_AMAP_KEY_SENTINEL: &str = "MISSING_WAYFARER_AMAP_API_KEY";

/// Placeholders recognised without any extra configuration.
pub const DEFAULT_PLACEHOLDERS: &[&str] = &["YOUR_AMAP_API_KEY"];

/// Known template placeholders, compared case-insensitively per character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSet {
    entries: Vec<String>,
}

impl Default for PlaceholderSet {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PLACEHOLDERS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl PlaceholderSet {
    /// Adds entries on top of the current set. Blank entries are ignored.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in extra {
            let entry = entry.as_ref().trim();
            if entry.is_empty() || self.contains(entry) {
                continue;
            }
            self.entries.push(entry.to_string());
        }
        self
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|p| eq_ignore_case(p, value))
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_present(&self, value: Option<&str>) -> bool {
        candidate(value).is_some_and(|trimmed| !self.contains(trimmed))
    }
}

/// Trimmed value, or `None` when it is blank or a `MISSING_*` sentinel.
fn candidate(value: Option<&str>) -> Option<&str> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed.starts_with(MISSING_SENTINEL_PREFIX) {
        return None;
    }
    Some(trimmed)
}

/// Char-by-char comparison where two chars match if equal, equal after
/// uppercasing, or equal after uppercasing then lowercasing. Covers chars
/// such as the dotless `ı` and the Kelvin sign that ASCII folding misses.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            x == y
                || x.to_uppercase().eq(y.to_uppercase())
                || x
                    .to_uppercase()
                    .flat_map(char::to_lowercase)
                    .eq(y.to_uppercase().flat_map(char::to_lowercase))
        })
}

/// Checks `value` against the default placeholder set.
pub fn is_present(value: Option<&str>) -> bool {
    candidate(value).is_some_and(|trimmed| {
        !DEFAULT_PLACEHOLDERS
            .iter()
            .any(|p| eq_ignore_case(p, trimmed))
    })
}
