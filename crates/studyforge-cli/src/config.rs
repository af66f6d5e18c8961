use config::{Config as ConfigLoader, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use studyforge_assistant::AssistantConfig;

const DEFAULTS: &str = include_str!("../config/default.toml");

/// Environment variables and the config keys they override
const ENV_OVERRIDES: [(&str, &str); 9] = [
    ("ASSISTANT_MODEL", "assistant.model"),
    ("ASSISTANT_BASE_URL", "assistant.base_url"),
    ("ASSISTANT_TIP_TEMPERATURE", "assistant.tip_temperature"),
    ("STORAGE_BACKEND", "storage.backend"),
    ("STORAGE_DATA_DIR", "storage.data_dir"),
    ("TIMER_WORK_MINUTES", "timer.work_minutes"),
    ("TIMER_BREAK_MINUTES", "timer.break_minutes"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
    pub storage: StorageConfig,
    pub timer: TimerConfig,
    pub logging: LoggingConfig,

    // Secret (from ENV only)
    #[serde(default)]
    pub gemini_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured directory, or the platform data directory
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("studyforge")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimerConfig {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. built-in defaults (config/default.toml)
    /// 2. config/{ENV}.toml (if present)
    /// 3. the file given with `--config`
    /// 4. ASSISTANT_, STORAGE_, TIMER_ and LOG_ environment variables
    /// 5. `--data-dir`
    pub fn load(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = Self::load_with(config_path, data_dir, |name| std::env::var(name).ok())?;

        cfg.gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(cfg)
    }

    /// Same layering with an injectable environment lookup
    pub fn load_with(
        config_path: Option<&Path>,
        data_dir: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let profile = env("ENV").unwrap_or_else(|| "dev".to_string());

        let mut builder = ConfigLoader::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::with_name(&format!("config/{}", profile)).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, env(var))?;
        }

        builder = builder.set_override_option(
            "storage.data_dir",
            data_dir.map(|d| d.to_string_lossy().into_owned()),
        )?;

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_with(None, None, no_env).unwrap();
        assert_eq!(config.assistant.model, "gemini-2.5-flash");
        assert_eq!(config.assistant.tip_temperature, 0.8);
        assert_eq!(config.storage.backend, "file");
        assert_eq!(config.timer.work_minutes, 25);
        assert_eq!(config.timer.break_minutes, 5);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_env_and_flags_override_files() {
        let env: HashMap<&str, &str> = [
            ("TIMER_WORK_MINUTES", "50"),
            ("STORAGE_BACKEND", "memory"),
            ("LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let dir = std::env::temp_dir().join("studyforge-config-test");
        let config = Config::load_with(None, Some(dir.as_path()), |name| {
            env.get(name).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.timer.work_minutes, 50);
        assert_eq!(config.timer.break_minutes, 5);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.storage.resolved_data_dir(), Some(dir));
    }

    #[test]
    fn test_config_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[assistant]\nmodel = \"gemini-2.5-pro\"\n\n[timer]\nbreak_minutes = 10\n",
        )
        .unwrap();

        let config = Config::load_with(Some(path.as_path()), None, no_env).unwrap();
        assert_eq!(config.assistant.model, "gemini-2.5-pro");
        assert_eq!(config.timer.break_minutes, 10);
        assert_eq!(config.timer.work_minutes, 25);
    }
}
