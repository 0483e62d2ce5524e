use pureadmin_shared::{DEFAULT_LOGIN_DAY, TOKEN_TTL_MS, USER_KEY};
use std::time::Duration;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，如果外部没有提供对应变量，则使用这些值
const DEFAULT_BASE_URL: &str = "/dev-api";
const DEFAULT_PAGE_SIZE: u32 = 10;

pub const ENV_BASE_URL: &str = "PUREADMIN_API_BASE";
pub const ENV_STORAGE_KEY: &str = "PUREADMIN_STORAGE_KEY";
pub const ENV_PAGE_SIZE: &str = "PUREADMIN_PAGE_SIZE";

/// 客户端配置
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API 根路径，所有接口路径都相对于它
    pub base_url: String,
    /// token 记录在本地存储中的键名
    pub storage_key: String,
    /// 登录后写入的 token 有效期，与后端返回的过期时间无关
    pub token_ttl: Duration,
    pub default_login_day: u32,
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_key: USER_KEY.to_string(),
            token_ttl: Duration::from_millis(TOKEN_TTL_MS as u64),
            default_login_day: DEFAULT_LOGIN_DAY,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// 通过查找函数读取配置，读不到（或解析失败）就用默认值
    ///
    /// 原生环境传入环境变量查找，浏览器构建传入编译期常量查找。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: lookup(ENV_BASE_URL)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            storage_key: lookup(ENV_STORAGE_KEY)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.storage_key),
            page_size: lookup(ENV_PAGE_SIZE)
                .and_then(|v| v.trim().parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.page_size),
            ..defaults
        }
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}
