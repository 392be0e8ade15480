use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::Utc;
use log::LevelFilter;
use once_cell::sync::OnceCell;

static INSTALLED: OnceCell<LevelFilter> = OnceCell::new();

/// Install the process-wide logger described by `config`.
///
/// A disabled config installs nothing. Only the first successful call takes effect;
/// later calls return `Ok` and keep the original level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let level = INSTALLED.get_or_try_init(|| install(config))?;
    log::debug!("Logging enabled at {}", level);
    Ok(())
}

fn install(config: &LoggingConfig) -> Result<LevelFilter> {
    let level = parse_level(&config.level)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Utc::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("Failed to install logger")?;

    Ok(level)
}

/// The level installed by [`init`], if any.
pub fn installed_level() -> Option<LevelFilter> {
    INSTALLED.get().copied()
}

/// Parse a level name such as `debug` (case-insensitive).
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .with_context(|| format!("Unknown log level '{}'", level))
}
