//! HTTP 传输层
//!
//! `HttpClient` 把"发一个请求、拿回状态码和响应体"抽象出来，
//! 浏览器中由 `gloo-net` 的 fetch 实现，测试中由 `MockHttpClient` 替代。

use std::collections::HashMap;

use gloo_net::http::Request;
use shopper_shared::protocol::HttpMethod;

use crate::error::{ApiError, ApiResult};

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// 不含查询串的完整 URL
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// 只有请求未送达时才返回错误，任何 HTTP 状态码都作为响应返回
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 实现层: 浏览器 fetch 客户端
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Patch => Request::patch(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        if !req.query.is_empty() {
            builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD URL", (Status, Response Body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 按发送顺序记录的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses.borrow_mut().insert(
            format!("{} {}", method.as_str(), url),
            (status, body.to_string()),
        );
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let key = format!("{} {}", req.method.as_str(), req.url);
        self.requests.borrow_mut().push(req);

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
