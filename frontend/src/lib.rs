//! Shopper 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `guard`: 路由守卫
//! - `session` / `cart`: 会话与购物车徽标状态
//! - `api`: 远端 API 客户端
//! - `components`: UI 组件层

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;
pub mod web;

mod components {
    pub mod layout;
    pub mod pages;
}

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::ShopApi;
use crate::cart::CartContext;
use crate::components::layout::Layout;
use crate::components::pages::{
    CartPage, LoginPage, NotFoundPage, OAuthCallbackPage, OrderSuccessPage, Placeholder,
    ProfilePage, SignupPage,
};
use crate::config::AppConfig;
use crate::session::AuthContext;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <Placeholder title="Home" /> }.into_any(),
        AppRoute::ProductList => view! { <Placeholder title="Products" /> }.into_any(),
        AppRoute::ProductDetail { id } => {
            view! { <Placeholder title=format!("Product #{}", id) /> }.into_any()
        }
        AppRoute::CategoryProducts { id } => {
            view! { <Placeholder title=format!("Category #{}", id) /> }.into_any()
        }
        AppRoute::Search => view! { <Placeholder title="Search results" /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::OAuthCallback => view! { <OAuthCallbackPage /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::Order => view! { <Placeholder title="Checkout" /> }.into_any(),
        AppRoute::OrderSuccess => view! { <OrderSuccessPage /> }.into_any(),
        AppRoute::OrderFail => view! { <Placeholder title="Payment failed" /> }.into_any(),
        AppRoute::MyPage => view! { <Placeholder title="My page" /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Addresses => view! { <Placeholder title="Addresses" /> }.into_any(),
        AppRoute::OrderHistory => view! { <Placeholder title="Order history" /> }.into_any(),
        AppRoute::OrderDetail { id } => {
            view! { <Placeholder title=format!("Order #{}", id) /> }.into_any()
        }
        AppRoute::AdminProducts => view! { <Placeholder title="Admin: products" /> }.into_any(),
        AppRoute::AdminProductNew | AppRoute::AdminProductEdit { .. } => {
            view! { <Placeholder title="Admin: edit product" /> }.into_any()
        }
        AppRoute::AdminOrders => view! { <Placeholder title="Admin: orders" /> }.into_any(),
        AppRoute::AdminOrderDetail { id } => {
            view! { <Placeholder title=format!("Admin: order #{}", id) /> }.into_any()
        }
        AppRoute::AdminUsers => view! { <Placeholder title="Admin: users" /> }.into_any(),
        AppRoute::AdminUserDetail { id } => {
            view! { <Placeholder title=format!("Admin: user #{}", id) /> }.into_any()
        }
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();

    // 1. 同步恢复会话（路由器计算第一个路由前必须完成）
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);
    provide_context(CartContext::new());

    // 2. API 客户端：令牌失效时清除会话，路由服务随后自动重定向
    let api = ShopApi::from_config(&config)
        .with_unauthorized_handler(Arc::new(move || auth_ctx.logout()));
    provide_context(api);
    provide_context(config);

    // 3. 获取会话信号，用于注入路由服务（解耦！）
    let session = auth_ctx.session_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <Layout>
                <RouterOutlet matcher=route_matcher />
            </Layout>
        </Router>
    }
}
