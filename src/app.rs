use crate::config::local_settings::LocalSettings;
use crate::config::resolver::KeyResolver;
use crate::config::CliConfig;
use crate::domain::key_presence::PlaceholderSet;
use crate::domain::model::ResolvedConfig;
use crate::domain::ports::VarSource;
use crate::utils::error::{KeyConfigError, Result};
use crate::utils::validation::Validate;
use std::io::Write;

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 1;
pub const EXIT_KEY_MISSING: i32 = 2;

/// Resolves, writes the report to `out` and returns the process exit code.
pub fn run(config: &CliConfig, vars: &dyn VarSource, out: &mut dyn Write) -> i32 {
    let resolved = match load_and_resolve(config, vars) {
        Ok(resolved) => resolved,
        Err(e) => {
            report_error("Configuration failed", &e);
            return EXIT_CONFIG_ERROR;
        }
    };

    if let Err(e) = write_report(config, &resolved, out) {
        tracing::error!("❌ Failed to write report: {}", e);
        return EXIT_CONFIG_ERROR;
    }

    // --strict: 缺少金鑰時以狀態碼 2 結束
    if config.strict {
        if let Err(e) = resolved.require_key() {
            report_error("No usable AMap key", &e);
            return EXIT_KEY_MISSING;
        }
    }

    EXIT_OK
}

pub fn load_and_resolve(config: &CliConfig, vars: &dyn VarSource) -> Result<ResolvedConfig> {
    let local = LocalSettings::load_optional(&config.local_file, vars)?;
    local.validate()?;

    KeyResolver::new(vars)
        .with_local_settings(local)
        .with_placeholders(PlaceholderSet::default().with_extra(&config.placeholders))
        .with_profile(config.profile)
        .with_key_override(config.amap_key.clone())
        .with_base_url_override(config.base_url.clone())
        .resolve()
}

fn write_report(
    config: &CliConfig,
    resolved: &ResolvedConfig,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if config.json {
        writeln!(out, "{}", serde_json::to_string_pretty(resolved)?)?;
        return Ok(());
    }

    if resolved.amap_key.present {
        writeln!(
            out,
            "✅ AMap key: {} (from {})",
            resolved.amap_key.masked, resolved.amap_key.source
        )?;
    } else {
        writeln!(out, "⚠️  AMap key: not configured, map view stays disabled")?;
    }
    writeln!(
        out,
        "🌐 API base URL [{:?}]: {} (from {})",
        resolved.profile, resolved.base_url, resolved.base_url_source
    )?;
    Ok(())
}

fn report_error(context: &str, e: &KeyConfigError) {
    tracing::error!("❌ {}: {}", context, e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
}
