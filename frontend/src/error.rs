use shopper_shared::ErrorCode;
use thiserror::Error;

/// API 调用错误
///
/// - `Network`: 请求未到达服务端（断网、CORS 等）
/// - `Server`: 服务端返回非 2xx 或 `success=false`
/// - `Decode` / `Encode`: JSON 编解码失败
/// - `MissingData`: 成功响应缺少必需的 `data`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Server {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("response from {path} carried no data")]
    MissingData { path: String },
}

impl ApiError {
    /// 服务端返回的原始错误码
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Server { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code().and_then(ErrorCode::parse)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 且错误码表明令牌失效（密码错误等业务性 401 不算）
    pub fn is_token_invalid(&self) -> bool {
        self.status() == Some(401) && self.error_code().is_some_and(|c| c.is_token_failure())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn server(status: u16, code: &str) -> ApiError {
        ApiError::Server {
            status,
            code: Some(code.to_string()),
            message: "denied".to_string(),
        }
    }

    #[test]
    fn token_invalid_requires_401_and_token_code() {
        assert!(server(401, "EXPIRED_TOKEN").is_token_invalid());
        assert!(server(401, "UNAUTHORIZED").is_token_invalid());
        assert!(!server(401, "INVALID_PASSWORD").is_token_invalid());
        assert!(!server(403, "INVALID_TOKEN").is_token_invalid());
        assert!(!ApiError::Network("offline".into()).is_token_invalid());
    }

    #[test]
    fn server_error_displays_server_message() {
        let err = server(409, "EMAIL_ALREADY_EXISTS");
        assert_eq!(err.to_string(), "denied");
        assert_eq!(err.error_code(), Some(ErrorCode::EmailAlreadyExists));
        assert_eq!(err.status(), Some(409));
    }
}
