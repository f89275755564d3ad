use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to load, parse, or validate the settings
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use link_census::config::load_settings;
///
/// let settings = load_settings(Path::new("census.toml")).unwrap();
/// println!("Max pages: {}", settings.crawler.max_pages);
/// ```
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Parses a numeric limit given on the command line
///
/// Missing values use `fallback` silently. Values that are not integers, or
/// fall below `min`, log a warning and use `fallback`. Never fails.
pub fn parse_limit(raw: Option<&str>, fallback: usize, min: usize, name: &str) -> usize {
    let Some(raw) = raw else {
        return fallback;
    };

    match raw.trim().parse::<usize>() {
        Ok(value) if value >= min => value,
        _ => {
            tracing::warn!(
                "invalid {} limit '{}', using default value of {}",
                name,
                raw,
                fallback
            );
            fallback
        }
    }
}
