//! 应用配置
//!
//! 浏览器端没有运行时环境变量，默认值可在构建时通过 `option_env!` 覆盖。

// =========================================================
// 默认值 (Defaults)
// =========================================================

/// API 基础路径，开发时由 dev server 代理到后端
const DEFAULT_API_BASE_URL: &str = "/api";
/// 会话快照的存储键
const DEFAULT_SESSION_STORAGE_KEY: &str = "auth-storage";
/// 原始令牌的存储键（HTTP 层读取）
const DEFAULT_TOKEN_STORAGE_KEY: &str = "accessToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_storage_key: String,
    pub token_storage_key: String,
}

impl AppConfig {
    /// 读取构建时配置，未设置的项使用默认值
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("SHOPPER_API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_storage_key: DEFAULT_SESSION_STORAGE_KEY.to_string(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
        }
    }
}
