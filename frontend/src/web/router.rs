//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，验证由路由所属的守卫完成。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::guard::Access;
use crate::session::Session;

/// 获取当前浏览器路径（含查询串）
fn current_path() -> String {
    web_sys::window()
        .map(|w| w.location())
        .and_then(|loc| Some(format!("{}{}", loc.pathname().ok()?, loc.search().unwrap_or_default())))
        .unwrap_or_else(|| "/".to_string())
}

/// History 写入方式：用户导航用 push，重定向用 replace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

/// 一次导航经过守卫后的结果：最终路由、写入地址栏的路径、写入方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: AppRoute,
    pub path: String,
    pub mode: HistoryMode,
}

/// 按目标路由的守卫决定导航结果
///
/// 被拒绝的导航沿用调用方的写入方式，落到守卫给出的重定向目标。
pub fn resolve_navigation(
    target_route: AppRoute,
    path: &str,
    session: &Session,
    mode: HistoryMode,
) -> Navigation {
    match target_route.gate().decide(session) {
        Access::Allow => Navigation {
            route: target_route,
            path: path.to_string(),
            mode,
        },
        Access::Redirect(redirect) => {
            log_info!("[Router] Access to {} denied. Redirecting to {}.", target_route, redirect);
            Navigation {
                path: redirect.to_path(),
                route: redirect,
                mode,
            }
        }
    }
}

/// 已登录用户停留在登录/注册页时的去向（替换当前记录，后退不会再回到登录页）
pub fn authenticated_redirect(session: &Session) -> Option<Navigation> {
    session.is_authenticated.then(|| {
        resolve_navigation(AppRoute::Home, &AppRoute::Home.to_path(), session, HistoryMode::Replace)
    })
}

/// 只有不带修饰键的左键点击由路由服务接管，其余交给浏览器（新标签页等）
pub fn is_plain_left_click(button: i16, ctrl: bool, meta: bool, shift: bool, alt: bool) -> bool {
    button == 0 && !(ctrl || meta || shift || alt)
}

/// 写入 History 状态
fn write_history_state(path: &str, mode: HistoryMode) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = match mode {
                HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
                HistoryMode::Replace => {
                    history.replace_state_with_url(&JsValue::NULL, "", Some(path))
                }
            };
        }
    }
}

/// 从查询串中取出参数值（已解码），`+` 视为空格
pub fn parse_query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(|v| v.into_owned())
        })
}

/// 读取当前 URL 的查询参数
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    parse_query_param(&search, name)
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    session: Signal<Session>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由同样经过守卫，会话必须已经恢复。
    fn new(session: Signal<Session>) -> Self {
        let (current_route, set_route) = signal(AppRoute::NotFound);
        let router = Self {
            current_route,
            set_route,
            session,
        };

        let path = current_path();
        router.navigate_to_route(AppRoute::from_path(&path), &path, HistoryMode::Replace);
        router
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// `path` 可以带查询串，查询串会原样写入 History。
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), path, HistoryMode::Push);
    }

    /// 替换当前 History 记录（不产生新的后退记录）
    pub fn replace(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), path, HistoryMode::Replace);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `path` - 写入地址栏的路径
    /// * `mode` - 写入 History 的方式
    fn navigate_to_route(&self, target_route: AppRoute, path: &str, mode: HistoryMode) {
        // --- Step 1: 验证目标路由 ---
        let navigation = resolve_navigation(target_route, path, &self.session.get_untracked(), mode);
        // --- Step 2: 加载页面 (更新状态) ---
        self.apply(navigation);
    }

    /// 写入地址栏并更新当前路由
    pub fn apply(&self, navigation: Navigation) {
        write_history_state(&navigation.path, navigation.mode);
        self.set_route.set(navigation.route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑
            let path = current_path();
            router.navigate_to_route(AppRoute::from_path(&path), &path, HistoryMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话变化时重新检查当前路由（登出、令牌失效后离开受保护页面）
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let session = session.get();
            let route = current_route.get_untracked();

            if let Access::Redirect(redirect) = route.gate().decide(&session) {
                log_info!("[Router] Session changed. Redirecting from {} to {}.", route, redirect);
                write_history_state(&redirect.to_path(), HistoryMode::Replace);
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号
    session: Signal<Session>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let to_clone = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if !is_plain_left_click(ev.button(), ev.ctrl_key(), ev.meta_key(), ev.shift_key(), ev.alt_key()) {
            return;
        }
        ev.prevent_default();
        router.navigate(&to_clone);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_is_decoded() {
        assert_eq!(
            parse_query_param("?q=red%20shoes&page=2", "q").as_deref(),
            Some("red shoes")
        );
        assert_eq!(parse_query_param("?q=a+b", "q").as_deref(), Some("a b"));
        assert_eq!(parse_query_param("page=2", "page").as_deref(), Some("2"));
        assert_eq!(parse_query_param("?flag", "flag").as_deref(), Some(""));
        assert_eq!(parse_query_param("", "q"), None);
    }

    fn logged_in() -> Session {
        Session {
            user: Some(shopper_shared::User {
                id: 1,
                email: "kim@shopper.com".into(),
                name: "Kim".into(),
                role: shopper_shared::UserRole::User,
                provider: None,
                created_at: None,
            }),
            access_token: Some("token".into()),
            is_authenticated: true,
            is_admin: false,
        }
    }

    #[test]
    fn login_page_redirect_replaces_history_entry() {
        assert_eq!(authenticated_redirect(&Session::default()), None);
        assert_eq!(
            authenticated_redirect(&logged_in()),
            Some(Navigation {
                route: AppRoute::Home,
                path: "/".into(),
                mode: HistoryMode::Replace,
            })
        );
    }

    #[test]
    fn denied_navigation_keeps_mode_and_targets_redirect() {
        let nav = resolve_navigation(AppRoute::Cart, "/cart", &Session::default(), HistoryMode::Push);
        assert_eq!(nav.route, AppRoute::Login);
        assert_eq!(nav.path, "/login");
        assert_eq!(nav.mode, HistoryMode::Push);

        let nav = resolve_navigation(AppRoute::Search, "/search?q=a", &Session::default(), HistoryMode::Replace);
        assert_eq!(nav.path, "/search?q=a");
        assert_eq!(nav.mode, HistoryMode::Replace);
    }

    #[test]
    fn only_plain_left_clicks_are_intercepted() {
        assert!(is_plain_left_click(0, false, false, false, false));
        assert!(!is_plain_left_click(0, true, false, false, false));
        assert!(!is_plain_left_click(0, false, true, false, false));
        assert!(!is_plain_left_click(0, false, false, true, false));
        assert!(!is_plain_left_click(1, false, false, false, false));
    }
}
