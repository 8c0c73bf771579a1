//! INI parsing for `ConfigFile`.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("endpoints")) {
        if let Some(v) = non_empty(section.get("restrictions_url")) {
            config.endpoints.restrictions_url = v.to_string();
        }
        if let Some(v) = non_empty(section.get("speed_control_url")) {
            config.endpoints.speed_control_url = v.to_string();
        }
    }

    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = non_empty(section.get("timeout")) {
            config.download.timeout_secs = match v.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(invalid("download", "timeout", v, "expected a positive number of seconds")),
            };
        }
        if let Some(v) = non_empty(section.get("page_size")) {
            config.download.page_size = match v.parse::<usize>() {
                Ok(size) if size > 0 => Some(size),
                _ => return Err(invalid("download", "page_size", v, "expected a positive integer")),
            };
        }
    }

    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = non_empty(section.get("directory")) {
            config.output.directory = expand_tilde(v);
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(text).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_is_default() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            "[endpoints]\nspeed_control_url = http://localhost/MapServer/0\n\
             [download]\ntimeout = 5\npage_size = 250\n\
             [output]\ndirectory = /tmp/gpx\n",
        )
        .unwrap();

        assert_eq!(config.endpoints.speed_control_url, "http://localhost/MapServer/0");
        assert_eq!(
            config.endpoints.restrictions_url,
            crate::provider::DEFAULT_RESTRICTIONS_URL
        );
        assert_eq!(config.download.timeout_secs, 5);
        assert_eq!(config.download.page_size, Some(250));
        assert_eq!(config.output.directory, PathBuf::from("/tmp/gpx"));
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = parse("[download]\npage_size =\ntimeout = \n").unwrap();
        assert_eq!(config.download, Default::default());
    }

    #[test]
    fn test_invalid_numbers() {
        let err = parse("[download]\ntimeout = soon\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "timeout"));

        let err = parse("[download]\npage_size = 0\n").unwrap_err();
        assert!(err.to_string().contains("download.page_size"));
    }
}
