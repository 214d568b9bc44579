//! 通用响应结构
//!
//! 服务端所有接口都返回同一个信封 `{success, message, code?, data?}`，
//! 分页接口的 `data` 是一页结果。

use serde::{Deserialize, Serialize, de::DeserializeOwned};

// =========================================================
// 响应信封 (Envelope)
// =========================================================

/// API 公共响应
///
/// 失败时 `code` 携带机器可读的错误码，`data` 缺省。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            code: None,
            data: Some(data),
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code: Some(code.as_str().to_string()),
            data: None,
        }
    }
}

/// 可以作为信封 `data` 的类型
///
/// 无返回值的接口（删除、修改密码等）不带 `data`，
/// 它们的响应类型是 `()`，缺省时视为成功。
pub trait Payload: DeserializeOwned {
    /// `data` 字段缺省时的取值，`None` 表示缺省即错误
    fn absent() -> Option<Self> {
        None
    }
}

impl Payload for () {
    fn absent() -> Option<Self> {
        Some(())
    }
}

impl<T: Payload> Payload for Vec<T> {}

impl<T: Payload> Payload for PageResponse<T> {}

// =========================================================
// 分页 (Paging)
// =========================================================

/// 一页结果，字段与 Spring Data `Page` 一致，`number` 从 0 开始
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> PageResponse<T> {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// 下一页的页码，已是最后一页时为 `None`
    pub fn next_page(&self) -> Option<u32> {
        if self.last { None } else { Some(self.number + 1) }
    }
}

// =========================================================
// 错误码 (Error Codes)
// =========================================================

/// 服务端错误码目录
///
/// 与信封中的 `code` 字符串一一对应，页面据此区分错误类型
/// （例如密码错误与令牌过期）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // 通用
    InvalidInput,
    Unauthorized,
    Forbidden,
    InternalServerError,

    // 认证 / 用户
    EmailAlreadyExists,
    UserNotFound,
    InvalidPassword,
    InvalidToken,
    ExpiredToken,
    TokenNotFound,
    AddressNotFound,
    AddressInUse,

    // 商品
    ProductNotFound,
    CategoryNotFound,
    CategoryDepthExceeded,
    CategoryHasProducts,
    OutOfStock,

    // 购物车
    CartItemNotFound,
    CartItemQuantityInvalid,

    // 订单
    OrderNotFound,
    OrderCancelNotAllowed,
    OrderAlreadyPaid,

    // 支付
    PaymentAmountMismatch,
    PaymentAlreadyCompleted,
    PaymentNotFound,
    PaymentConfirmFailed,

    // 文件
    FileUploadFailed,
    InvalidFileType,
    FileSizeExceeded,
    ImageLimitExceeded,
    ProductImageNotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorCode::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::InvalidPassword => "INVALID_PASSWORD",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::ExpiredToken => "EXPIRED_TOKEN",
            ErrorCode::TokenNotFound => "TOKEN_NOT_FOUND",
            ErrorCode::AddressNotFound => "ADDRESS_NOT_FOUND",
            ErrorCode::AddressInUse => "ADDRESS_IN_USE",
            ErrorCode::ProductNotFound => "PRODUCT_NOT_FOUND",
            ErrorCode::CategoryNotFound => "CATEGORY_NOT_FOUND",
            ErrorCode::CategoryDepthExceeded => "CATEGORY_DEPTH_EXCEEDED",
            ErrorCode::CategoryHasProducts => "CATEGORY_HAS_PRODUCTS",
            ErrorCode::OutOfStock => "OUT_OF_STOCK",
            ErrorCode::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            ErrorCode::CartItemQuantityInvalid => "CART_ITEM_QUANTITY_INVALID",
            ErrorCode::OrderNotFound => "ORDER_NOT_FOUND",
            ErrorCode::OrderCancelNotAllowed => "ORDER_CANCEL_NOT_ALLOWED",
            ErrorCode::OrderAlreadyPaid => "ORDER_ALREADY_PAID",
            ErrorCode::PaymentAmountMismatch => "PAYMENT_AMOUNT_MISMATCH",
            ErrorCode::PaymentAlreadyCompleted => "PAYMENT_ALREADY_COMPLETED",
            ErrorCode::PaymentNotFound => "PAYMENT_NOT_FOUND",
            ErrorCode::PaymentConfirmFailed => "PAYMENT_CONFIRM_FAILED",
            ErrorCode::FileUploadFailed => "FILE_UPLOAD_FAILED",
            ErrorCode::InvalidFileType => "INVALID_FILE_TYPE",
            ErrorCode::FileSizeExceeded => "FILE_SIZE_EXCEEDED",
            ErrorCode::ImageLimitExceeded => "IMAGE_LIMIT_EXCEEDED",
            ErrorCode::ProductImageNotFound => "PRODUCT_IMAGE_NOT_FOUND",
        }
    }

    /// 解析信封中的错误码，未知代码返回 `None`
    pub fn parse(code: &str) -> Option<Self> {
        let parsed = match code {
            "INVALID_INPUT" => ErrorCode::InvalidInput,
            "UNAUTHORIZED" => ErrorCode::Unauthorized,
            "FORBIDDEN" => ErrorCode::Forbidden,
            "INTERNAL_SERVER_ERROR" => ErrorCode::InternalServerError,
            "EMAIL_ALREADY_EXISTS" => ErrorCode::EmailAlreadyExists,
            "USER_NOT_FOUND" => ErrorCode::UserNotFound,
            "INVALID_PASSWORD" => ErrorCode::InvalidPassword,
            "INVALID_TOKEN" => ErrorCode::InvalidToken,
            "EXPIRED_TOKEN" => ErrorCode::ExpiredToken,
            "TOKEN_NOT_FOUND" => ErrorCode::TokenNotFound,
            "ADDRESS_NOT_FOUND" => ErrorCode::AddressNotFound,
            "ADDRESS_IN_USE" => ErrorCode::AddressInUse,
            "PRODUCT_NOT_FOUND" => ErrorCode::ProductNotFound,
            "CATEGORY_NOT_FOUND" => ErrorCode::CategoryNotFound,
            "CATEGORY_DEPTH_EXCEEDED" => ErrorCode::CategoryDepthExceeded,
            "CATEGORY_HAS_PRODUCTS" => ErrorCode::CategoryHasProducts,
            "OUT_OF_STOCK" => ErrorCode::OutOfStock,
            "CART_ITEM_NOT_FOUND" => ErrorCode::CartItemNotFound,
            "CART_ITEM_QUANTITY_INVALID" => ErrorCode::CartItemQuantityInvalid,
            "ORDER_NOT_FOUND" => ErrorCode::OrderNotFound,
            "ORDER_CANCEL_NOT_ALLOWED" => ErrorCode::OrderCancelNotAllowed,
            "ORDER_ALREADY_PAID" => ErrorCode::OrderAlreadyPaid,
            "PAYMENT_AMOUNT_MISMATCH" => ErrorCode::PaymentAmountMismatch,
            "PAYMENT_ALREADY_COMPLETED" => ErrorCode::PaymentAlreadyCompleted,
            "PAYMENT_NOT_FOUND" => ErrorCode::PaymentNotFound,
            "PAYMENT_CONFIRM_FAILED" => ErrorCode::PaymentConfirmFailed,
            "FILE_UPLOAD_FAILED" => ErrorCode::FileUploadFailed,
            "INVALID_FILE_TYPE" => ErrorCode::InvalidFileType,
            "FILE_SIZE_EXCEEDED" => ErrorCode::FileSizeExceeded,
            "IMAGE_LIMIT_EXCEEDED" => ErrorCode::ImageLimitExceeded,
            "PRODUCT_IMAGE_NOT_FOUND" => ErrorCode::ProductImageNotFound,
            _ => return None,
        };
        Some(parsed)
    }

    /// 服务端返回该错误码时使用的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::InvalidInput
            | ErrorCode::AddressInUse
            | ErrorCode::CategoryDepthExceeded
            | ErrorCode::CategoryHasProducts
            | ErrorCode::CartItemQuantityInvalid
            | ErrorCode::OrderCancelNotAllowed
            | ErrorCode::OrderAlreadyPaid
            | ErrorCode::PaymentAmountMismatch
            | ErrorCode::InvalidFileType
            | ErrorCode::FileSizeExceeded
            | ErrorCode::ImageLimitExceeded => 400,
            ErrorCode::Unauthorized
            | ErrorCode::InvalidPassword
            | ErrorCode::InvalidToken
            | ErrorCode::ExpiredToken
            | ErrorCode::TokenNotFound => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::UserNotFound
            | ErrorCode::AddressNotFound
            | ErrorCode::ProductNotFound
            | ErrorCode::CategoryNotFound
            | ErrorCode::CartItemNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::PaymentNotFound
            | ErrorCode::ProductImageNotFound => 404,
            ErrorCode::EmailAlreadyExists
            | ErrorCode::OutOfStock
            | ErrorCode::PaymentAlreadyCompleted => 409,
            ErrorCode::InternalServerError
            | ErrorCode::PaymentConfirmFailed
            | ErrorCode::FileUploadFailed => 500,
        }
    }

    /// 表示当前令牌不可用（而不是凭据错误）
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self,
            ErrorCode::Unauthorized
                | ErrorCode::InvalidToken
                | ErrorCode::ExpiredToken
                | ErrorCode::TokenNotFound
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // 测试里用 u32 作为元素类型
    impl Payload for u32 {}

    #[test]
    fn page_fields_round_trip_unchanged() {
        let raw = json!({
            "content": [1, 2, 3],
            "totalElements": 23,
            "totalPages": 3,
            "size": 10,
            "number": 2,
            "first": false,
            "last": true,
            "empty": false
        });

        let page: PageResponse<u32> = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(page.number, 2);
        assert_eq!(page.total_elements, 23);
        assert_eq!(page.next_page(), None);
        assert_eq!(serde_json::to_value(&page).unwrap(), raw);
    }

    #[test]
    fn failure_envelope_without_data() {
        let raw = json!({
            "success": false,
            "code": "INVALID_PASSWORD",
            "message": "bad password"
        });

        let resp: ApiResponse<u32> = serde_json::from_value(raw).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.data, None);
        assert_eq!(
            resp.code.as_deref().and_then(ErrorCode::parse),
            Some(ErrorCode::InvalidPassword)
        );
    }

    #[test]
    fn success_envelope_serializes_without_code() {
        let resp = ApiResponse::success("ok", 7u32);
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "success": true, "message": "ok", "data": 7 })
        );
    }

    #[test]
    fn unit_payload_may_be_absent() {
        assert_eq!(<() as Payload>::absent(), Some(()));
        assert_eq!(<Vec<u32> as Payload>::absent(), None);
    }

    #[test]
    fn error_code_strings_parse_back() {
        for code in [
            ErrorCode::InvalidInput,
            ErrorCode::ExpiredToken,
            ErrorCode::OutOfStock,
            ErrorCode::PaymentConfirmFailed,
            ErrorCode::ProductImageNotFound,
        ] {
            assert_eq!(ErrorCode::parse(code.as_str()), Some(code));
        }
        assert_eq!(ErrorCode::parse("SOMETHING_NEW"), None);
    }

    #[test]
    fn token_failures_exclude_wrong_password() {
        assert!(ErrorCode::ExpiredToken.is_token_failure());
        assert!(ErrorCode::Unauthorized.is_token_failure());
        assert!(!ErrorCode::InvalidPassword.is_token_failure());
        assert_eq!(ErrorCode::InvalidPassword.http_status(), 401);
    }
}
