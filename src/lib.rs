#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::local_settings::LocalSettings;
pub use config::resolver::KeyResolver;
pub use domain::key_presence::{is_present, PlaceholderSet};
pub use domain::model::{BuildProfile, KeySource, KeyStatus, ResolvedConfig};
pub use utils::error::{KeyConfigError, Result};
