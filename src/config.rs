use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::ConfigError;

/// GitHub API設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// OAuthアプリのClient ID
    #[serde(default)]
    pub client_id: String,

    /// OAuthアプリのClient Secret
    #[serde(default)]
    pub client_secret: String,

    /// APIベースURL（省略可、デフォルト: https://api.github.com）
    #[serde(default = "default_github_api_url")]
    pub api_base_url: String,

    /// OAuthベースURL（省略可、デフォルト: https://github.com）
    #[serde(default = "default_github_oauth_url")]
    pub oauth_base_url: String,

    /// リクエストタイムアウト（秒）
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_github_oauth_url() -> String {
    "https://github.com".to_string()
}

fn default_timeout_sec() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_base_url: default_github_api_url(),
            oauth_base_url: default_github_oauth_url(),
            timeout_sec: default_timeout_sec(),
        }
    }
}

/// Markdownレンダリング設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// レンダリングAPIのベースURL
    #[serde(default = "default_render_base_url")]
    pub base_url: String,

    /// リクエストタイムアウト（秒）
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

fn default_render_base_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_url: default_render_base_url(),
            timeout_sec: default_timeout_sec(),
        }
    }
}

/// キャッシュ設定
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    /// キャッシュディレクトリ（省略時はOSのキャッシュディレクトリ下）
    #[serde(default)]
    pub root: Option<String>,
}

impl CacheConfig {
    /// キャッシュディレクトリの実パスを解決
    pub fn cache_dir(&self) -> PathBuf {
        match &self.root {
            Some(root) => PathBuf::from(root),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("gh-explorer")
                .join("cache"),
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// ログレベル（省略可、デフォルト: info）
    #[serde(default = "default_log_level")]
    pub level: String,

    /// ログファイルのパス（省略時は標準エラー出力）
    #[serde(default)]
    pub file_path: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
        }
    }
}

/// メイン設定構造体
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// GitHub API設定
    #[serde(default)]
    pub github: GitHubConfig,

    /// Markdownレンダリング設定
    #[serde(default)]
    pub render: RenderConfig,

    /// キャッシュ設定
    #[serde(default)]
    pub cache: CacheConfig,

    /// ログ設定
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    pub fn log_file_path(&self) -> &Option<String> {
        &self.logging.file_path
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache.cache_dir()
    }

    /// ベースURLが正しいことを検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("github.api_base_url", &self.github.api_base_url),
            ("github.oauth_base_url", &self.github.oauth_base_url),
            ("render.base_url", &self.render.base_url),
        ];
        for (name, value) in urls {
            Url::parse(value).map_err(|_| ConfigError::ValidationError {
                reason: format!("invalid URL for {}: {}", name, value),
            })?;
        }
        Ok(())
    }
}

/// 設定ファイルのデフォルトパスを取得
fn config_file_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
    path.push("gh-explorer");
    path.push("config.toml");
    path
}

/// 設定ファイルを読み込む（指定がなければデフォルトパス）
pub fn load_config_from(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => config_file_path(),
    };

    if config_path.exists() {
        let contents = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    } else {
        // ファイルが存在しない場合はデフォルト設定を返す
        Ok(Config::default())
    }
}

/// 設定ファイルを読み込む
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(None)
}

/// 設定ファイルを保存する
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    let config_path = config_file_path();

    if let Some(parent_dir) = config_path.parent()
        && !parent_dir.exists()
    {
        fs::create_dir_all(parent_dir).map_err(|e| ConfigError::WriteError { source: e })?;
    }

    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::ValidationError {
        reason: format!("failed to serialize config: {}", e),
    })?;
    fs::write(config_path, contents).map_err(|e| ConfigError::WriteError { source: e })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.github.oauth_base_url, "https://github.com");
        assert_eq!(config.github.client_id, "");
        assert_eq!(config.render.base_url, "https://api.github.com");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.log_file_path(), &None);
    }

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.github.api_base_url = "not a url".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_dir_from_config() {
        let mut config = Config::default();
        config.cache.root = Some("/tmp/gh-explorer-test/cache".to_string());

        assert_eq!(
            config.cache_dir(),
            PathBuf::from("/tmp/gh-explorer-test/cache")
        );
    }

    #[test]
    fn test_deserialize_config() {
        let toml_str = r#"
            [github]
            client_id = "abc123"
            client_secret = "shh"
            [logging]
            level = "debug"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.client_id, "abc123");
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let toml_str = r#"
            [render]
            base_url = "https://render.example.com"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.render.base_url, "https://render.example.com");
        assert_eq!(config.render.timeout_sec, 30);
        assert_eq!(config.log_level(), "info"); // デフォルト
    }

    #[test]
    fn test_config_serialization_deserialization() {
        let mut config = Config::default();
        config.github.client_id = "client".to_string();
        config.logging.level = "warn".to_string();

        let serialized = toml::to_string(&config).expect("Failed to serialize Config");
        assert!(serialized.contains("[github]"));
        assert!(serialized.contains("client_id = \"client\""));

        let deserialized: Config =
            toml::from_str(&serialized).expect("Failed to deserialize Config");
        assert_eq!(deserialized.github.client_id, "client");
        assert_eq!(deserialized.log_level(), "warn");
    }
}
