use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::{STATS_FILE_NAME, URL_FILE_NAME};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，示例：QL__SERVER__PORT=9999
pub const ENV_PREFIX: &str = "QL";

/// 静态配置（从 TOML 和环境变量加载，启动时使用）
///
/// - app: 应用名称与版本
/// - server: 监听地址、端口、调试模式
/// - storage: 数据目录
/// - logging: 日志配置
/// - cors: 跨域配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub app: AppInfoConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Unprefixed variables understood for compatibility with plain
/// `DEBUG=true PORT=8000` style deployments. They win over everything else.
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    pub debug: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub data_dir: Option<String>,
}

impl LegacyEnv {
    /// `DEBUG` 只有 `true`（不区分大小写）为真，其余任意值均为假
    pub fn debug_flag(&self) -> Option<bool> {
        self.debug
            .as_deref()
            .map(|d| d.eq_ignore_ascii_case("true"))
    }

    pub fn from_env() -> Self {
        Self {
            debug: std::env::var("DEBUG").ok(),
            host: std::env::var("HOST").ok(),
            port: std::env::var("PORT").ok(),
            data_dir: std::env::var("DATA_DIR").ok(),
        }
    }
}

impl StaticConfig {
    /// 从默认路径加载
    pub fn load() -> Self {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// 从 TOML 文件和环境变量加载配置，失败时使用默认值
    ///
    /// 优先级：DEBUG/HOST/PORT/DATA_DIR > QL__* > TOML > 默认值
    pub fn load_from(path: &str) -> Self {
        match Self::try_load(path, &LegacyEnv::from_env()) {
            Ok(config) => {
                if std::path::Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: &str, legacy: &LegacyEnv) -> Result<Self, config::ConfigError> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.debug", legacy.debug_flag())?
            .set_override_option("server.host", legacy.host.clone())?
            .set_override_option("server.port", legacy.port.clone())?
            .set_override_option("storage.data_dir", legacy.data_dir.clone())?
            .build()?;

        settings.try_deserialize::<StaticConfig>()
    }

    /// 日志级别，调试模式下默认提升到 debug
    pub fn effective_log_level(&self) -> &str {
        if self.server.debug && self.logging.level == default_log_level() {
            "debug"
        } else {
            &self.logging.level
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> crate::errors::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 应用信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfoConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_version")]
    pub version: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl StorageConfig {
    pub fn data_file(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(URL_FILE_NAME)
    }

    pub fn stats_file(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(STATS_FILE_NAME)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

/// CORS 配置
///
/// 含 `*` 的来源按通配符匹配，例如 `https://*.vercel.app`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_app_name() -> String {
    "URL Shortener".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
        "http://127.0.0.1:8000".to_string(),
        "https://*.vercel.app".to_string(),
    ]
}

fn default_allow_credentials() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for AppInfoConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            debug: false,
            workers: default_workers(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_credentials: default_allow_credentials(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_legacy() -> LegacyEnv {
        LegacyEnv::default()
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let config = StaticConfig::try_load(path.to_str().unwrap(), &no_legacy()).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.data_dir, "data");
        assert!(!config.server.debug);
        assert_eq!(config.cors.allowed_origins.len(), 4);
    }

    #[test]
    fn test_toml_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\n\n[storage]\ndata_dir = \"/var/lib/quicklink\"\n",
        )
        .unwrap();

        let config = StaticConfig::try_load(path.to_str().unwrap(), &no_legacy()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.storage.data_file(),
            PathBuf::from("/var/lib/quicklink").join("url_data.json")
        );
        assert_eq!(
            config.storage.stats_file(),
            PathBuf::from("/var/lib/quicklink").join("stats_data.json")
        );
    }

    #[test]
    fn test_legacy_env_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\nhost = \"127.0.0.1\"\n").unwrap();

        let legacy = LegacyEnv {
            debug: Some("True".into()),
            port: Some("8123".into()),
            data_dir: Some("elsewhere".into()),
            ..Default::default()
        };
        let config = StaticConfig::try_load(path.to_str().unwrap(), &legacy).unwrap();
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.server.debug);
        assert_eq!(config.storage.data_dir, "elsewhere");
        assert_eq!(config.effective_log_level(), "debug");
    }

    #[test]
    fn test_unrecognised_debug_value_is_false() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\ndebug = true\n").unwrap();

        for value in ["", "dev", "1", "yes"] {
            let legacy = LegacyEnv {
                debug: Some(value.into()),
                port: Some("8123".into()),
                data_dir: Some("elsewhere".into()),
                ..Default::default()
            };
            let config = StaticConfig::try_load(path.to_str().unwrap(), &legacy).unwrap();
            assert!(!config.server.debug, "DEBUG={:?}", value);
            assert_eq!(config.server.port, 8123);
            assert_eq!(config.storage.data_dir, "elsewhere");
        }

        let legacy = LegacyEnv {
            debug: Some("TRUE".into()),
            ..Default::default()
        };
        assert_eq!(legacy.debug_flag(), Some(true));
        assert_eq!(LegacyEnv::default().debug_flag(), None);
    }

    #[test]
    fn test_explicit_level_kept_in_debug() {
        let mut config = StaticConfig::default();
        config.server.debug = true;
        config.logging.level = "warn".into();
        assert_eq!(config.effective_log_level(), "warn");
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.port, 8000);
        assert_eq!(parsed.app.name, "URL Shortener");
    }
}
