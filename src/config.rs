use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Preferred theme name to apply. A trailing "dark"/"light" token pins the
    /// variant (e.g., "default dark"); otherwise the detected terminal mode picks it.
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    /// Path to a specific theme file or directory to scan (e.g., "./themes" or
    /// "./themes/default.json").
    #[serde(default = "default_theme_file")]
    pub theme_file: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Where this config was loaded from, if anywhere. Not part of the file.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level ("trace".."error"); RUST_LOG overrides the whole filter.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for rotating log files. Defaults to "logs" when unset.
    #[serde(default)]
    pub log_directory: Option<String>,
    /// Per-module level overrides, e.g. { "tui_greeting::config": "debug" }.
    #[serde(default)]
    pub module_levels: HashMap<String, String>,
    /// Emit draw-timing logs in debug builds.
    #[serde(default)]
    pub enable_performance_metrics: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default)]
    pub padding: PaddingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PaddingConfig {
    #[serde(default = "default_padding_horizontal")]
    pub horizontal: u16,
    #[serde(default)]
    pub vertical: u16,
}

fn default_theme_name() -> String {
    "default".to_string()
}

fn default_theme_file() -> String {
    "./themes".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_padding_horizontal() -> u16 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme_name: default_theme_name(),
            theme_file: default_theme_file(),
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
            source: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_directory: None,
            module_levels: HashMap::new(),
            enable_performance_metrics: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            padding: PaddingConfig::default(),
        }
    }
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            horizontal: default_padding_horizontal(),
            vertical: 0,
        }
    }
}

#[allow(dead_code)]
impl AppConfig {
    pub fn load() -> Self {
        // Look for config.ron in the current directory, next to the executable,
        // or under the platform config directory.
        let mut candidates = Vec::new();

        // 1. Current working directory
        candidates.push(PathBuf::from("config.ron"));

        // 2. Next to executable
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        // 3. Platform config directory
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("tui-greeting").join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(mut config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        config.source = Some(path);
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    pub fn save(&self) {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => PathBuf::from("config.ron"),
        };
        self.save_to(path);
    }

    pub fn save_to(&self, path: PathBuf) {
        // Try to read existing config to preserve comments
        let existing_content = fs::read_to_string(&path).unwrap_or_default();

        if existing_content.is_empty() {
            // Fallback to standard serialization if file doesn't exist or is empty
            let pretty = ron::ser::PrettyConfig::default()
                .depth_limit(2)
                .separate_tuple_members(true)
                .enumerate_arrays(true);

            match ron::ser::to_string_pretty(self, pretty) {
                Ok(content) => {
                    if let Err(e) = fs::write(&path, content) {
                        tracing::error!("Failed to write config to {}: {}", path.display(), e);
                    } else {
                        tracing::info!("Saved config to {}", path.display());
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize config: {}", e);
                }
            }
            return;
        }

        // Rewrite `key: "value"` pairs in place so comments and layout survive.
        let mut new_content = existing_content.clone();

        let replace_str = |content: &mut String, key: &str, value: &str| {
            let re = RegexBuilder::new(&format!(r#"(\s*{}\s*:\s*)"[^"]*""#, regex::escape(key)))
                .build()
                .unwrap();
            *content = re
                .replace_all(content, format!(r#"${{1}}"{}""#, value))
                .to_string();
        };

        replace_str(&mut new_content, "theme_name", &self.theme_name);
        replace_str(&mut new_content, "theme_file", &self.theme_file);

        if let Err(e) = fs::write(&path, new_content) {
            tracing::error!("Failed to update config at {}: {}", path.display(), e);
        } else {
            tracing::info!("Updated config at {} (preserving comments)", path.display());
        }
    }
}
