//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 路由表按守卫分组：公开页面、登录后页面、管理后台（`/admin` 前缀）。

use std::fmt::Display;

use crate::guard::Gate;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    // --- 公开页面 ---
    #[default]
    Home,
    ProductList,
    ProductDetail { id: i64 },
    CategoryProducts { id: i64 },
    Search,
    Login,
    Signup,
    /// 第三方登录回跳，令牌在查询串中
    OAuthCallback,

    // --- 需要登录 ---
    Cart,
    Order,
    OrderSuccess,
    OrderFail,
    MyPage,
    Profile,
    Addresses,
    OrderHistory,
    OrderDetail { id: i64 },

    // --- 管理后台 ---
    AdminProducts,
    AdminProductNew,
    AdminProductEdit { id: i64 },
    AdminOrders,
    AdminOrderDetail { id: i64 },
    AdminUsers,
    AdminUserDetail { id: i64 },

    /// 页面未找到
    NotFound,
}

// =========================================================
// 路由表 (Route Tree)
// =========================================================

/// 叶子路由：`:id` 段匹配一个整数参数
pub struct RouteLeaf {
    pub pattern: &'static str,
    pub build: fn(&[i64]) -> AppRoute,
}

/// 共享同一个守卫的一组路由
pub struct RouteGroup {
    pub prefix: &'static str,
    pub gate: Gate,
    pub leaves: &'static [RouteLeaf],
}

pub static ROUTE_TREE: &[RouteGroup] = &[
    RouteGroup {
        prefix: "",
        gate: Gate::Public,
        leaves: &[
            RouteLeaf { pattern: "/", build: |_| AppRoute::Home },
            RouteLeaf { pattern: "/products", build: |_| AppRoute::ProductList },
            RouteLeaf {
                pattern: "/products/:id",
                build: |p| AppRoute::ProductDetail { id: p[0] },
            },
            RouteLeaf {
                pattern: "/categories/:id",
                build: |p| AppRoute::CategoryProducts { id: p[0] },
            },
            RouteLeaf { pattern: "/search", build: |_| AppRoute::Search },
            RouteLeaf { pattern: "/login", build: |_| AppRoute::Login },
            RouteLeaf { pattern: "/signup", build: |_| AppRoute::Signup },
            RouteLeaf { pattern: "/oauth/callback", build: |_| AppRoute::OAuthCallback },
        ],
    },
    RouteGroup {
        prefix: "",
        gate: Gate::Authenticated,
        leaves: &[
            RouteLeaf { pattern: "/cart", build: |_| AppRoute::Cart },
            RouteLeaf { pattern: "/order", build: |_| AppRoute::Order },
            RouteLeaf { pattern: "/order/success", build: |_| AppRoute::OrderSuccess },
            RouteLeaf { pattern: "/order/fail", build: |_| AppRoute::OrderFail },
            RouteLeaf { pattern: "/mypage", build: |_| AppRoute::MyPage },
            RouteLeaf { pattern: "/mypage/profile", build: |_| AppRoute::Profile },
            RouteLeaf { pattern: "/mypage/addresses", build: |_| AppRoute::Addresses },
            RouteLeaf { pattern: "/mypage/orders", build: |_| AppRoute::OrderHistory },
            RouteLeaf {
                pattern: "/mypage/orders/:id",
                build: |p| AppRoute::OrderDetail { id: p[0] },
            },
        ],
    },
    RouteGroup {
        prefix: "/admin",
        gate: Gate::Admin,
        leaves: &[
            RouteLeaf { pattern: "/products", build: |_| AppRoute::AdminProducts },
            RouteLeaf { pattern: "/products/new", build: |_| AppRoute::AdminProductNew },
            RouteLeaf {
                pattern: "/products/:id/edit",
                build: |p| AppRoute::AdminProductEdit { id: p[0] },
            },
            RouteLeaf { pattern: "/orders", build: |_| AppRoute::AdminOrders },
            RouteLeaf {
                pattern: "/orders/:id",
                build: |p| AppRoute::AdminOrderDetail { id: p[0] },
            },
            RouteLeaf { pattern: "/users", build: |_| AppRoute::AdminUsers },
            RouteLeaf {
                pattern: "/users/:id",
                build: |p| AppRoute::AdminUserDetail { id: p[0] },
            },
        ],
    },
];

/// 逐段匹配，成功时返回按顺序提取的参数
fn match_segments<'a>(
    pattern: impl Iterator<Item = &'a str>,
    mut path: impl Iterator<Item = &'a str>,
) -> Option<Vec<i64>> {
    let mut params = Vec::new();
    for expected in pattern {
        let actual = path.next()?;
        if expected.starts_with(':') {
            params.push(actual.parse().ok()?);
        } else if expected != actual {
            return None;
        }
    }
    // 路径还有多余的段
    if path.next().is_some() {
        return None;
    }
    Some(params)
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// 在路由表中查找路径，返回命中分组的守卫和路由
fn lookup(path: &str) -> Option<(Gate, AppRoute)> {
    let path = path.split(['?', '#']).next().unwrap_or_default();

    for group in ROUTE_TREE {
        let Some(rest) = path.strip_prefix(group.prefix) else {
            continue;
        };
        // 前缀必须在段边界上结束
        if !group.prefix.is_empty() && !(rest.is_empty() || rest.starts_with('/')) {
            continue;
        }
        for leaf in group.leaves {
            if let Some(params) = match_segments(segments(leaf.pattern), segments(rest)) {
                return Some((group.gate, (leaf.build)(&params)));
            }
        }
    }
    None
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举（忽略查询串和锚点）
    pub fn from_path(path: &str) -> Self {
        lookup(path).map(|(_, route)| route).unwrap_or(Self::NotFound)
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::ProductList => "/products".into(),
            Self::ProductDetail { id } => format!("/products/{}", id),
            Self::CategoryProducts { id } => format!("/categories/{}", id),
            Self::Search => "/search".into(),
            Self::Login => "/login".into(),
            Self::Signup => "/signup".into(),
            Self::OAuthCallback => "/oauth/callback".into(),
            Self::Cart => "/cart".into(),
            Self::Order => "/order".into(),
            Self::OrderSuccess => "/order/success".into(),
            Self::OrderFail => "/order/fail".into(),
            Self::MyPage => "/mypage".into(),
            Self::Profile => "/mypage/profile".into(),
            Self::Addresses => "/mypage/addresses".into(),
            Self::OrderHistory => "/mypage/orders".into(),
            Self::OrderDetail { id } => format!("/mypage/orders/{}", id),
            Self::AdminProducts => "/admin/products".into(),
            Self::AdminProductNew => "/admin/products/new".into(),
            Self::AdminProductEdit { id } => format!("/admin/products/{}/edit", id),
            Self::AdminOrders => "/admin/orders".into(),
            Self::AdminOrderDetail { id } => format!("/admin/orders/{}", id),
            Self::AdminUsers => "/admin/users".into(),
            Self::AdminUserDetail { id } => format!("/admin/users/{}", id),
            Self::NotFound => "/404".into(),
        }
    }

    /// **核心守卫逻辑：该路由由哪个守卫把关**
    ///
    /// 守卫取自路由表中该路由所在的分组，表外路由（`NotFound`）公开。
    pub fn gate(&self) -> Gate {
        lookup(&self.to_path())
            .map(|(gate, _)| gate)
            .unwrap_or(Gate::Public)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_and_parameterised_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/products/42"), AppRoute::ProductDetail { id: 42 });
        assert_eq!(AppRoute::from_path("/categories/5"), AppRoute::CategoryProducts { id: 5 });
        assert_eq!(AppRoute::from_path("/mypage/orders/7"), AppRoute::OrderDetail { id: 7 });
        assert_eq!(AppRoute::from_path("/admin/products/new"), AppRoute::AdminProductNew);
        assert_eq!(
            AppRoute::from_path("/admin/products/3/edit"),
            AppRoute::AdminProductEdit { id: 3 }
        );
    }

    #[test]
    fn query_string_and_trailing_slash_are_ignored() {
        assert_eq!(AppRoute::from_path("/search?q=shoes"), AppRoute::Search);
        assert_eq!(AppRoute::from_path("/oauth/callback?accessToken=abc"), AppRoute::OAuthCallback);
        assert_eq!(AppRoute::from_path("/cart/"), AppRoute::Cart);
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(AppRoute::from_path("/products/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/products/1/reviews"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/administrator/products"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn every_leaf_round_trips_and_matches_its_group_gate() {
        for group in ROUTE_TREE {
            for leaf in group.leaves {
                let route = (leaf.build)(&[1]);
                assert_eq!(route.gate(), group.gate, "gate mismatch for {}", route);
                assert_eq!(AppRoute::from_path(&route.to_path()), route);
            }
        }
    }

    #[test]
    fn gate_comes_from_the_owning_group() {
        assert_eq!(AppRoute::AdminUserDetail { id: 42 }.gate(), Gate::Admin);
        assert_eq!(AppRoute::OrderDetail { id: 9 }.gate(), Gate::Authenticated);
        assert_eq!(AppRoute::ProductDetail { id: 3 }.gate(), Gate::Public);
        assert_eq!(AppRoute::NotFound.gate(), Gate::Public);
    }
}
