//! 路由守卫
//!
//! 纯函数：只看当前会话，不访问网络也不依赖 DOM。
//! 路由服务在每次导航和每次会话变化时调用。

use crate::session::Session;
use crate::web::route::AppRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Public,
    /// 需要登录
    Authenticated,
    /// 需要登录且为管理员
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(AppRoute),
}

impl Gate {
    pub fn decide(&self, session: &Session) -> Access {
        match self {
            Gate::Public => Access::Allow,
            _ if !session.is_authenticated => Access::Redirect(AppRoute::Login),
            Gate::Admin if !session.is_admin => Access::Redirect(AppRoute::Home),
            _ => Access::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopper_shared::{User, UserRole};

    fn session(is_authenticated: bool, is_admin: bool) -> Session {
        let role = if is_admin { UserRole::Admin } else { UserRole::User };
        Session {
            user: is_authenticated.then(|| User {
                id: 1,
                email: "kim@shopper.com".into(),
                name: "Kim".into(),
                role,
                provider: None,
                created_at: None,
            }),
            access_token: is_authenticated.then(|| "token".to_string()),
            is_authenticated,
            is_admin,
        }
    }

    #[test]
    fn authenticated_gate_only_looks_at_authentication() {
        for admin in [false, true] {
            assert_eq!(
                Gate::Authenticated.decide(&session(false, admin)),
                Access::Redirect(AppRoute::Login)
            );
            assert_eq!(Gate::Authenticated.decide(&session(true, admin)), Access::Allow);
        }
    }

    #[test]
    fn admin_gate_sends_non_admins_home() {
        assert_eq!(
            Gate::Admin.decide(&session(false, false)),
            Access::Redirect(AppRoute::Login)
        );
        assert_eq!(
            Gate::Admin.decide(&session(true, false)),
            Access::Redirect(AppRoute::Home)
        );
        assert_eq!(Gate::Admin.decide(&session(true, true)), Access::Allow);
    }

    #[test]
    fn public_gate_always_allows() {
        assert_eq!(Gate::Public.decide(&Session::default()), Access::Allow);
    }
}
