use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::protocol::DEFAULT_PAGE_SIZE;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_url: String,
    pub page_size: u32,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".into(),
            page_size: DEFAULT_PAGE_SIZE,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// An environment value that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub key: &'static str,
    pub value: String,
}

/// Settings plus the overrides that were skipped while building them.
///
/// Loading happens before logging is configured, so rejections are returned
/// instead of logged; call [`LoadedSettings::log_rejected`] once a subscriber
/// is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: ClientSettings,
    pub rejected: Vec<RejectedOverride>,
}

impl LoadedSettings {
    pub fn log_rejected(&self) {
        for rejected in &self.rejected {
            warn!(
                key = rejected.key,
                value = %rejected.value,
                "config: ignoring invalid page size override"
            );
        }
    }
}

/// Defaults, then the settings file, then the process environment.
///
/// An explicit `path` must exist; without one, `catalog.toml` in the working
/// directory is read when present.
pub fn load_settings(path: Option<&Path>) -> Result<LoadedSettings, SettingsError> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                read_settings_file(default_path)?
            } else {
                ClientSettings::default()
            }
        }
    };
    let rejected = apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(LoadedSettings { settings, rejected })
}

fn read_settings_file(path: &Path) -> Result<ClientSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_settings(raw: &str) -> Result<ClientSettings, toml::de::Error> {
    toml::from_str(raw)
}

/// Later keys win: `APP__*` overrides the `CATALOG_*` spelling. Returns the
/// values that were skipped.
pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<RejectedOverride> {
    let mut rejected = Vec::new();
    for key in ["CATALOG_API_URL", "APP__API_URL"] {
        if let Some(v) = lookup(key) {
            settings.api_url = v;
        }
    }

    for key in ["CATALOG_PAGE_SIZE", "APP__PAGE_SIZE"] {
        if let Some(v) = lookup(key) {
            match v.trim().parse::<u32>() {
                Ok(parsed) if parsed > 0 => settings.page_size = parsed,
                _ => rejected.push(RejectedOverride { key, value: v }),
            }
        }
    }

    for key in ["CATALOG_LOG", "APP__LOG"] {
        if let Some(v) = lookup(key) {
            settings.log_filter = v;
        }
    }
    rejected
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env, io,
        sync::{Arc, Mutex},
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = parse_settings("api_url = \"https://catalog.example\"").expect("parse");
        assert_eq!(settings.api_url, "https://catalog.example");
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn app_prefixed_env_wins_over_catalog_prefix() {
        let mut settings = ClientSettings::default();
        apply_env_overrides(
            &mut settings,
            lookup_from(&[
                ("CATALOG_API_URL", "http://one"),
                ("APP__API_URL", "http://two"),
                ("CATALOG_LOG", "debug"),
            ]),
        );
        assert_eq!(settings.api_url, "http://two");
        assert_eq!(settings.log_filter, "debug");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().expect("log buffer").clone()).expect("utf8")
        }
    }

    #[test]
    fn invalid_page_size_override_is_ignored() {
        let mut settings = ClientSettings::default();
        let rejected = apply_env_overrides(
            &mut settings,
            lookup_from(&[("CATALOG_PAGE_SIZE", "zero"), ("APP__PAGE_SIZE", "0")]),
        );
        assert_eq!(settings.page_size, 10);
        assert_eq!(
            rejected,
            vec![
                RejectedOverride {
                    key: "CATALOG_PAGE_SIZE",
                    value: "zero".to_string(),
                },
                RejectedOverride {
                    key: "APP__PAGE_SIZE",
                    value: "0".to_string(),
                },
            ]
        );

        let rejected = apply_env_overrides(&mut settings, lookup_from(&[("APP__PAGE_SIZE", "25")]));
        assert_eq!(settings.page_size, 25);
        assert!(rejected.is_empty());
    }

    #[test]
    fn rejected_override_is_logged_once_a_subscriber_exists() {
        let mut settings = ClientSettings::default();
        let rejected =
            apply_env_overrides(&mut settings, lookup_from(&[("CATALOG_PAGE_SIZE", "zero")]));
        let loaded = LoadedSettings { settings, rejected };

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || loaded.log_rejected());

        let text = logs.text();
        assert!(text.contains("WARN"));
        assert!(text.contains("config: ignoring invalid page size override"));
        assert!(text.contains("CATALOG_PAGE_SIZE"));
        assert!(text.contains("zero"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("catalog_settings_missing_{suffix}.toml"));
        let err = load_settings(Some(&path)).expect_err("missing file");
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn reads_explicit_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("catalog_settings_{suffix}.toml"));
        fs::write(&path, "page_size = 5\nlog_filter = \"warn\"\n").expect("write");

        let settings = read_settings_file(&path).expect("read");
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.log_filter, "warn");

        fs::remove_file(path).expect("cleanup");
    }
}
