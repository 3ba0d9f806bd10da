pub mod local_settings;
pub mod resolver;

#[cfg(feature = "cli")]
use crate::domain::model::BuildProfile;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "wayfarer-keys")]
#[command(about = "Checks whether the Wayfarer AMap key and API base URL are configured")]
pub struct CliConfig {
    /// AMap key; takes priority over WAYFARER_AMAP_API_KEY and the settings file
    #[arg(long)]
    pub amap_key: Option<String>,

    /// API base URL; takes priority over WAYFARER_API_BASE_URL and the settings file
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, value_enum, default_value = "debug")]
    pub profile: BuildProfile,

    /// Local settings file (TOML)
    #[arg(long, default_value = local_settings::DEFAULT_LOCAL_FILE)]
    pub local_file: String,

    /// Extra placeholder treated as "no key" (case-insensitive), repeatable
    #[arg(long = "placeholder")]
    pub placeholders: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 when no usable key is configured
    #[arg(long)]
    pub strict: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
