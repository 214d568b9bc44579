//! 浏览器 API 封装模块
//!
//! - `http`: 请求传输（fetch）
//! - `storage`: 键值存储（LocalStorage）
//! - `route`: 路由定义（领域模型）
//! - `router`: 路由服务（核心引擎）

mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::{FetchHttpClient, HttpClient, HttpRequest, HttpResponse};
pub use storage::{KeyValueStore, LocalStorage};

#[cfg(test)]
pub use http::MockHttpClient;
#[cfg(test)]
pub use storage::MemoryStorage;
