use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use client_core::ClientSettings;

/// Builds client settings from defaults, then the settings file, then
/// environment, then command-line overrides.
pub fn load_client_settings(
    config_path: &Path,
    api_base_url: Option<String>,
    greeting_delay_ms: Option<u64>,
) -> Result<ClientSettings> {
    let mut settings = match fs::read_to_string(config_path) {
        Ok(raw) => toml::from_str::<ClientSettings>(&raw)
            .with_context(|| format!("invalid client settings in '{}'", config_path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => ClientSettings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read '{}'", config_path.display()))
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    if let Some(v) = api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = greeting_delay_ms {
        settings.greeting_delay_ms = v;
    }

    Ok(settings)
}

fn apply_env_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__GREETING_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.greeting_delay_ms = parsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_file(label: &str, contents: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("hello_status_client_{label}_{suffix}.toml"));
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn reads_camel_case_key_from_file() {
        let path = temp_file("camel", "apiBaseUrl = \"http://backend.test:8000\"\n");
        let settings = load_client_settings(&path, None, None).expect("settings");
        fs::remove_file(&path).expect("cleanup");

        assert_eq!(settings.api_base_url, "http://backend.test:8000");
    }

    #[test]
    fn cli_flags_override_file_values() {
        let path = temp_file("flags", "api_base_url = \"http://file.test\"\ngreeting_delay_ms = 5\n");
        let settings =
            load_client_settings(&path, Some("http://flag.test".to_string()), Some(10))
                .expect("settings");
        fs::remove_file(&path).expect("cleanup");

        assert_eq!(settings.api_base_url, "http://flag.test");
        assert_eq!(settings.greeting_delay_ms, 10);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_file("malformed", "api_base_url = [");
        let result = load_client_settings(&path, None, None);
        fs::remove_file(&path).expect("cleanup");

        assert!(result.is_err());
    }

    #[test]
    fn env_overrides_apply_and_ignore_bad_numbers() {
        let mut settings = ClientSettings::default();
        apply_env_overrides(&mut settings, |key| match key {
            "APP__API_BASE_URL" => Some("http://env.test".to_string()),
            "APP__GREETING_DELAY_MS" => Some("soon".to_string()),
            _ => None,
        });

        assert_eq!(settings.api_base_url, "http://env.test");
        assert_eq!(settings.greeting_delay_ms, 1000);
    }
}
