//! Shopper 前后端共享的数据模型
//!
//! - `common`: 通用响应信封、分页结构、错误码
//! - `user` / `product` / `cart` / `order`: 各资源的传输对象
//! - `protocol`: 每个 API 端点的请求定义（方法、路径、参数、响应类型）

pub mod cart;
pub mod common;
pub mod order;
pub mod product;
pub mod protocol;
pub mod user;

pub use cart::{AddToCartRequest, CartItem, CartItemQuantity, CartResponse};
pub use common::{ApiResponse, ErrorCode, PageResponse, Payload};
pub use order::{
    CreateOrderRequest, Order, OrderItem, OrderLine, OrderStatus, Payment, PaymentApprovalRequest,
    PaymentMethod, PaymentStatus,
};
pub use product::{Category, Product, ProductForm, ProductImage, ProductListParams};
pub use user::{
    Address, AddressRequest, LoginRequest, PasswordChangeRequest, ProfileUpdateRequest,
    RefreshRequest, SignupProvider, SignupRequest, TokenResponse, User, UserRole,
};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";
