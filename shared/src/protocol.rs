use crate::{
    AddToCartRequest, Address, AddressRequest, CartItemQuantity, CartResponse, Category,
    CreateOrderRequest, LoginRequest, Order, PageResponse, PasswordChangeRequest, Payload, Payment,
    PaymentApprovalRequest, Product, ProductForm, ProductListParams, ProfileUpdateRequest,
    RefreshRequest, SignupRequest, TokenResponse, User,
};
use serde::Serialize;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Paths are relative to the API base URL. Each request maps to exactly one HTTP call.
pub trait ApiRequest {
    /// JSON body type; requests without a body use `()` and return `None` from `body`.
    type Body: Serialize;
    /// The `data` type carried by the response envelope.
    type Response: Payload;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path with parameters interpolated.
    fn path(&self) -> String;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Body = Self;
    type Response = TokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/login".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

impl ApiRequest for SignupRequest {
    type Body = Self;
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/signup".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Fetch the user that owns the bearer token
#[derive(Debug, Clone, Copy)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Body = ();
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/auth/me".into()
    }
}

impl ApiRequest for RefreshRequest {
    type Body = Self;
    type Response = TokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/refresh".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Invalidate the refresh token on the server
#[derive(Debug, Clone, Copy)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/logout".into()
    }
}

// =========================================================
// Products & Categories
// =========================================================

/// Product listing; a category id switches to the category-scoped listing path.
impl ApiRequest for ProductListParams {
    type Body = ();
    type Response = PageResponse<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match self.category_id {
            Some(category_id) => format!("/categories/{}/products", category_id),
            None => "/products".into(),
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.to_query()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetProductRequest {
    pub product_id: i64,
}

impl ApiRequest for GetProductRequest {
    type Body = ();
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/products/{}", self.product_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Body = ();
    type Response = Vec<Category>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/categories".into()
    }
}

#[derive(Debug, Clone)]
pub struct CategoryProductsRequest {
    pub category_id: i64,
    pub params: ProductListParams,
}

impl ApiRequest for CategoryProductsRequest {
    type Body = ();
    type Response = PageResponse<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/categories/{}/products", self.category_id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.params.to_query()
    }
}

#[derive(Debug, Clone)]
pub struct SearchProductsRequest {
    pub keyword: String,
    pub params: ProductListParams,
}

impl ApiRequest for SearchProductsRequest {
    type Body = ();
    type Response = PageResponse<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/products/search".into()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        // 显式传入的关键字覆盖 params 中的同名字段
        let mut query: Vec<_> = self
            .params
            .to_query()
            .into_iter()
            .filter(|(key, _)| *key != "keyword")
            .collect();
        query.push(("keyword", self.keyword.clone()));
        query
    }
}

// =========================================================
// Cart
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct GetCartRequest;

impl ApiRequest for GetCartRequest {
    type Body = ();
    type Response = CartResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/cart".into()
    }
}

impl ApiRequest for AddToCartRequest {
    type Body = Self;
    type Response = CartResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/cart".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCartItemRequest {
    pub cart_item_id: i64,
    pub body: CartItemQuantity,
}

impl ApiRequest for UpdateCartItemRequest {
    type Body = CartItemQuantity;
    type Response = CartResponse;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/cart/items/{}", self.cart_item_id)
    }

    fn body(&self) -> Option<&CartItemQuantity> {
        Some(&self.body)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteCartItemRequest {
    pub cart_item_id: i64,
}

impl ApiRequest for DeleteCartItemRequest {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/cart/items/{}", self.cart_item_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClearCartRequest;

impl ApiRequest for ClearCartRequest {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        "/cart".into()
    }
}

// =========================================================
// Orders & Payments
// =========================================================

impl ApiRequest for CreateOrderRequest {
    type Body = Self;
    type Response = Order;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MyOrdersRequest {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ApiRequest for MyOrdersRequest {
    type Body = ();
    type Response = PageResponse<Order>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/orders/me".into()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size", size.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetOrderRequest {
    pub order_id: i64,
}

impl ApiRequest for GetOrderRequest {
    type Body = ();
    type Response = Order;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/orders/{}", self.order_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CancelOrderRequest {
    pub order_id: i64,
}

impl ApiRequest for CancelOrderRequest {
    type Body = ();
    type Response = Order;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/orders/{}/cancel", self.order_id)
    }
}

impl ApiRequest for PaymentApprovalRequest {
    type Body = Self;
    type Response = Payment;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/payments/confirm".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

// =========================================================
// Users & Addresses
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct MyProfileRequest;

impl ApiRequest for MyProfileRequest {
    type Body = ();
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users/me".into()
    }
}

impl ApiRequest for ProfileUpdateRequest {
    type Body = Self;
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        "/users/me".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

impl ApiRequest for PasswordChangeRequest {
    type Body = Self;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        "/users/me/password".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListAddressesRequest;

impl ApiRequest for ListAddressesRequest {
    type Body = ();
    type Response = Vec<Address>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users/me/addresses".into()
    }
}

impl ApiRequest for AddressRequest {
    type Body = Self;
    type Response = Address;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/users/me/addresses".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAddressRequest {
    pub address_id: i64,
}

impl ApiRequest for DeleteAddressRequest {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/users/me/addresses/{}", self.address_id)
    }
}

// =========================================================
// Admin: Products
// =========================================================

/// Create a product (wraps the admin product form)
impl ApiRequest for ProductForm {
    type Body = Self;
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/admin/products".into()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProductRequest {
    pub product_id: i64,
    pub form: ProductForm,
}

impl ApiRequest for UpdateProductRequest {
    type Body = ProductForm;
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/admin/products/{}", self.product_id)
    }

    fn body(&self) -> Option<&ProductForm> {
        Some(&self.form)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteProductRequest {
    pub product_id: i64,
}

impl ApiRequest for DeleteProductRequest {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/admin/products/{}", self.product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_with_category_uses_category_path() {
        let params = ProductListParams {
            page: Some(2),
            size: Some(10),
            category_id: Some(5),
            ..Default::default()
        };
        assert_eq!(params.path(), "/categories/5/products");
        assert_eq!(
            params.query(),
            vec![("page", "2".to_string()), ("size", "10".to_string())]
        );
        assert_eq!(ProductListParams::default().path(), "/products");
    }

    #[test]
    fn search_keyword_overrides_params_keyword() {
        let req = SearchProductsRequest {
            keyword: "shoes".into(),
            params: ProductListParams {
                keyword: Some("ignored".into()),
                page: Some(0),
                ..Default::default()
            },
        };
        assert_eq!(
            req.query(),
            vec![("page", "0".to_string()), ("keyword", "shoes".to_string())]
        );
    }

    #[test]
    fn path_parameters_are_interpolated() {
        let update = UpdateCartItemRequest {
            cart_item_id: 42,
            body: CartItemQuantity { quantity: 5 },
        };
        assert_eq!(update.path(), "/cart/items/42");
        assert_eq!(UpdateCartItemRequest::METHOD, HttpMethod::Patch);
        assert_eq!(update.body().map(|b| b.quantity), Some(5));

        assert_eq!(CancelOrderRequest { order_id: 9 }.path(), "/orders/9/cancel");
        assert!(CancelOrderRequest { order_id: 9 }.body().is_none());
        assert_eq!(
            DeleteAddressRequest { address_id: 3 }.path(),
            "/users/me/addresses/3"
        );
    }
}
