//! API 客户端层
//!
//! 每个远端操作对应一个 async 方法，按资源分文件实现。
//! 所有方法都经过 `ApiClient::send`：附加令牌、编码请求体、拆开响应信封。

mod auth;
mod cart;
mod order;
mod product;
mod user;


use std::sync::Arc;

use leptos::prelude::*;
use serde::Deserialize;
use shopper_shared::protocol::ApiRequest;
use shopper_shared::{ApiResponse, BEARER_PREFIX, HEADER_AUTHORIZATION, Payload};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::web::{FetchHttpClient, HttpClient, HttpRequest, HttpResponse, KeyValueStore, LocalStorage};

/// 令牌失效时的回调
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// 浏览器中使用的客户端
pub type ShopApi = ApiClient<FetchHttpClient, LocalStorage>;

/// 错误响应只关心 `code` 和 `message`，`data` 的形状不确定
#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient<C: HttpClient, S: KeyValueStore> {
    base_url: String,
    token_key: String,
    http: C,
    storage: S,
    unauthorized: Option<UnauthorizedHandler>,
}

impl ShopApi {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.api_base_url,
            &config.token_storage_key,
            FetchHttpClient,
            LocalStorage,
        )
    }
}

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    pub fn new(base_url: &str, token_key: &str, http: C, storage: S) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_key: token_key.to_string(),
            http,
            storage,
            unauthorized: None,
        }
    }

    /// 服务端以 401 + 令牌类错误码拒绝请求时调用 `handler`
    pub fn with_unauthorized_handler(mut self, handler: UnauthorizedHandler) -> Self {
        self.unauthorized = Some(handler);
        self
    }

    #[cfg(test)]
    pub fn http(&self) -> &C {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送强类型请求并返回信封中的 `data`
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let mut http_req = HttpRequest::new(&self.url(&path), R::METHOD);

        for (key, value) in req.query() {
            http_req = http_req.with_query(key, &value);
        }

        // 令牌每次都从存储中读取，登录/登出后立即生效
        if let Some(token) = self.storage.get(&self.token_key) {
            http_req = http_req.with_header(HEADER_AUTHORIZATION, &format!("{}{}", BEARER_PREFIX, token));
        }

        if let Some(body) = req.body() {
            let json = serde_json_wasm::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
            http_req = http_req
                .with_header("Content-Type", "application/json")
                .with_body(json);
        }

        let response = self.http.send(http_req).await.inspect_err(|e| {
            log_error!("[Api] {} {} failed: {}", R::METHOD.as_str(), path, e);
        })?;

        let result = unwrap_envelope::<R::Response>(&path, response);
        if let Err(e) = &result {
            log_warn!("[Api] {} {} rejected: {:?}", R::METHOD.as_str(), path, e);
            if e.is_token_invalid() {
                if let Some(handler) = &self.unauthorized {
                    handler();
                }
            }
        }
        result
    }
}

/// 拆开响应信封
///
/// 非 2xx 或 `success=false` 都转为 `ApiError::Server`；
/// 非 JSON 的错误响应（如网关错误页）没有错误码，消息为状态码。
fn unwrap_envelope<T: Payload>(path: &str, response: HttpResponse) -> ApiResult<T> {
    if !response.is_success() {
        let status = response.status;
        return Err(match serde_json_wasm::from_str::<ErrorEnvelope>(&response.body) {
            Ok(envelope) => ApiError::Server {
                status,
                code: envelope.code,
                message: envelope.message,
            },
            Err(_) => ApiError::Server {
                status,
                code: None,
                message: format!("request failed with status {}", status),
            },
        });
    }

    let envelope: ApiResponse<T> =
        serde_json_wasm::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(ApiError::Server {
            status: response.status,
            code: envelope.code,
            message: envelope.message,
        });
    }

    envelope
        .data
        .or_else(T::absent)
        .ok_or_else(|| ApiError::MissingData {
            path: path.to_string(),
        })
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ShopApi {
    use_context::<ShopApi>().expect("ShopApi should be provided")
}
