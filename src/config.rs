//! 服务配置
//!
//! 配置在冷启动时读取一次：先加载 `USER_CRUD_CONFIG` 指向的 TOML 文件（可选），
//! 再用环境变量覆盖。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "USER_CRUD_CONFIG";

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("配置文件格式错误: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("无效的配置项 {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// 服务配置根结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub timeouts: TimeoutConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    /// 进程内存储，仅用于本地开发和测试
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                key: "store.backend",
                reason: format!("未知的存储后端 `{other}`"),
            }),
        }
    }
}

/// 文档存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// MongoDB 连接串
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub backend: StoreBackend,
    /// 建立连接与 ping 的超时时间（秒）
    pub connect_timeout_secs: u64,
}

/// 各操作的超时时间（秒）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub create_secs: u64,
    pub list_secs: u64,
    pub update_secs: u64,
    pub delete_secs: u64,
}

/// 本地 HTTP 服务配置（非 Lambda 环境）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind_address: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)，`RUST_LOG` 优先
    pub level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "serverless-crud".to_string(),
            collection: "users".to_string(),
            backend: StoreBackend::Mongo,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            create_secs: 5,
            list_secs: 5,
            update_secs: 10,
            delete_secs: 10,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl AppConfig {
    /// 按 文件 -> 环境变量 的顺序加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// 用环境变量覆盖配置项，`lookup` 便于在测试中替换环境
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(uri) = lookup("MONGODB_URI") {
            self.store.uri = uri;
        }
        if let Some(database) = lookup("MONGODB_DATABASE") {
            self.store.database = database;
        }
        if let Some(collection) = lookup("MONGODB_COLLECTION") {
            self.store.collection = collection;
        }
        if let Some(backend) = lookup("USER_CRUD_STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        if let Some(bind_address) = lookup("BIND_ADDRESS") {
            self.http.bind_address = bind_address;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("store.uri", &self.store.uri),
            ("store.database", &self.store.database),
            ("store.collection", &self.store.collection),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "不能为空".to_string(),
                });
            }
        }

        let timeouts = [
            ("store.connect_timeout_secs", self.store.connect_timeout_secs),
            ("timeouts.create_secs", self.timeouts.create_secs),
            ("timeouts.list_secs", self.timeouts.list_secs),
            ("timeouts.update_secs", self.timeouts.update_secs),
            ("timeouts.delete_secs", self.timeouts.delete_secs),
        ];
        for (key, secs) in timeouts {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "超时时间必须大于 0".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// 隐藏连接串中的密码，用于日志输出
pub fn redacted_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end + 3..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return uri.to_string();
    };
    match rest[..at].find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &uri[..scheme_end + 3],
            &rest[..colon],
            &rest[at..]
        ),
        None => uri.to_string(),
    }
}
