//! 会话状态管理
//!
//! `SessionStore` 是会话的唯一写入方，每次变更都在同一步内写两个存储键：
//! - 快照键：整个会话，刷新页面后据此恢复
//! - 令牌键：原始令牌字符串，HTTP 层据此附加 `Authorization` 头
//!
//! `AuthContext` 把存储包装成响应式信号，供路由守卫和组件使用。

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use shopper_shared::User;

use crate::config::AppConfig;
use crate::web::{KeyValueStore, LocalStorage};

/// 快照格式版本
const SNAPSHOT_VERSION: u32 = 0;

/// 会话状态
///
/// 不变量：`is_authenticated` 当且仅当用户和令牌都存在；
/// `is_admin` 当且仅当用户角色为管理员。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub is_admin: bool,
}

impl Session {
    fn authenticated(token: String, user: User) -> Self {
        Self {
            is_admin: user.is_admin(),
            user: Some(user),
            access_token: Some(token),
            is_authenticated: true,
        }
    }

    /// 从持久化内容重建，标志位按用户和令牌重新推导
    fn normalized(self) -> Self {
        match (self.access_token, self.user) {
            (Some(token), Some(user)) => Self::authenticated(token, user),
            _ => Self::default(),
        }
    }
}

/// 持久化快照：`{"state": {...}, "version": 0}`
#[derive(Serialize, Deserialize)]
struct Snapshot {
    state: Session,
    #[serde(default)]
    version: u32,
}

pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    snapshot_key: String,
    token_key: String,
    session: Session,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// 从存储中恢复会话
    ///
    /// 快照为准：令牌键按快照重新同步。快照损坏时视为未登录并清除两个键。
    pub fn rehydrate(storage: S, snapshot_key: &str, token_key: &str) -> Self {
        let mut store = Self {
            storage,
            snapshot_key: snapshot_key.to_string(),
            token_key: token_key.to_string(),
            session: Session::default(),
        };

        match store.storage.get(snapshot_key) {
            None => {
                store.storage.delete(token_key);
            }
            Some(raw) => match serde_json_wasm::from_str::<Snapshot>(&raw) {
                Ok(snapshot) => {
                    store.session = snapshot.state.normalized();
                    store.sync_token();
                }
                Err(e) => {
                    log_warn!("[Session] Discarding unreadable snapshot: {}", e);
                    store.storage.delete(snapshot_key);
                    store.storage.delete(token_key);
                }
            },
        }

        store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login(&mut self, token: String, user: User) {
        log_info!("[Session] Logged in as {}", user.email);
        self.session = Session::authenticated(token, user);
        self.sync_token();
        self.persist();
    }

    pub fn logout(&mut self) {
        log_info!("[Session] Logged out");
        self.session = Session::default();
        self.sync_token();
        self.persist();
    }

    /// 只写令牌键，用于第三方登录回跳后查询当前用户
    ///
    /// 调用方随后必须以 `login` 或 `logout` 结束，否则令牌键会在下次启动时被快照覆盖。
    pub fn stage_token(&mut self, token: &str) {
        self.storage.set(&self.token_key, token);
    }

    fn sync_token(&self) {
        match &self.session.access_token {
            Some(token) => self.storage.set(&self.token_key, token),
            None => self.storage.delete(&self.token_key),
        };
    }

    fn persist(&self) {
        let snapshot = Snapshot {
            state: self.session.clone(),
            version: SNAPSHOT_VERSION,
        };
        match serde_json_wasm::to_string(&snapshot) {
            Ok(json) => {
                if !self.storage.set(&self.snapshot_key, &json) {
                    log_warn!("[Session] Storage unavailable, session will not survive a reload");
                }
            }
            Err(e) => log_error!("[Session] Failed to encode snapshot: {}", e),
        }
    }
}

// =========================================================
// 响应式上下文 (Reactive Context)
// =========================================================

/// 认证上下文
///
/// 包含会话信号和底层存储，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
    store: StoredValue<SessionStore<LocalStorage>>,
}

impl AuthContext {
    /// 同步恢复会话，必须在路由器计算第一个路由之前调用
    pub fn new(config: &AppConfig) -> Self {
        let store = SessionStore::rehydrate(
            LocalStorage,
            &config.session_storage_key,
            &config.token_storage_key,
        );
        let session = RwSignal::new(store.session().clone());
        Self {
            session,
            store: StoredValue::new(store),
        }
    }

    /// 会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    pub fn login(&self, token: String, user: User) {
        self.store.update_value(|store| store.login(token, user));
        self.publish();
    }

    /// 清除会话；导航由路由服务监听会话变化后处理
    pub fn logout(&self) {
        self.store.update_value(|store| store.logout());
        self.publish();
    }

    pub fn stage_token(&self, token: &str) {
        self.store.update_value(|store| store.stage_token(token));
    }

    fn publish(&self) {
        let session = self.store.with_value(|store| store.session().clone());
        self.session.set(session);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStorage;
    use shopper_shared::UserRole;

    const SNAPSHOT_KEY: &str = "auth-storage";
    const TOKEN_KEY: &str = "accessToken";

    fn user(role: UserRole) -> User {
        User {
            id: 7,
            email: "lee@shopper.com".into(),
            name: "Lee".into(),
            role,
            provider: None,
            created_at: None,
        }
    }

    fn fresh(storage: &MemoryStorage) -> SessionStore<MemoryStorage> {
        SessionStore::rehydrate(storage.clone(), SNAPSHOT_KEY, TOKEN_KEY)
    }

    #[test]
    fn flags_follow_the_last_transition() {
        let storage = MemoryStorage::new();
        let mut store = fresh(&storage);

        store.login("a".into(), user(UserRole::Admin));
        store.logout();
        store.login("b".into(), user(UserRole::User));
        assert!(store.session().is_authenticated);
        assert!(!store.session().is_admin);
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("b"));

        store.logout();
        assert_eq!(store.session(), &Session::default());
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Login(UserRole),
        Logout,
    }

    /// 枚举长度不超过 4 的全部登录/登出序列
    fn sequences() -> Vec<Vec<Step>> {
        let steps = [Step::Login(UserRole::User), Step::Login(UserRole::Admin), Step::Logout];
        let mut all = vec![Vec::new()];
        let mut frontier = vec![Vec::new()];
        for _ in 0..4 {
            frontier = frontier
                .iter()
                .flat_map(|seq: &Vec<Step>| {
                    steps.iter().map(move |step| {
                        let mut next = seq.clone();
                        next.push(*step);
                        next
                    })
                })
                .collect();
            all.extend(frontier.iter().cloned());
        }
        all
    }

    #[test]
    fn flags_follow_every_generated_sequence() {
        for seq in sequences() {
            let storage = MemoryStorage::new();
            let mut store = fresh(&storage);

            for (i, step) in seq.iter().enumerate() {
                let token = format!("t{}", i);
                match *step {
                    Step::Login(role) => store.login(token.clone(), user(role)),
                    Step::Logout => store.logout(),
                }

                let session = store.session().clone();
                match *step {
                    Step::Login(role) => {
                        assert!(session.is_authenticated, "{:?}", seq);
                        assert_eq!(session.is_admin, role == UserRole::Admin, "{:?}", seq);
                        assert_eq!(storage.get(TOKEN_KEY), Some(token), "{:?}", seq);
                    }
                    Step::Logout => {
                        assert_eq!(session, Session::default(), "{:?}", seq);
                        assert_eq!(storage.get(TOKEN_KEY), None, "{:?}", seq);
                    }
                }
                assert_eq!(fresh(&storage).session(), &session, "{:?}", seq);
            }
        }
    }

    #[test]
    fn session_survives_a_reload() {
        let storage = MemoryStorage::new();
        fresh(&storage).login("abc".into(), user(UserRole::Admin));

        let reloaded = fresh(&storage);
        assert!(reloaded.session().is_authenticated);
        assert!(reloaded.session().is_admin);
        assert_eq!(reloaded.session().access_token.as_deref(), Some("abc"));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc"));
    }

    #[test]
    fn snapshot_uses_versioned_envelope() {
        let storage = MemoryStorage::new();
        fresh(&storage).login("abc".into(), user(UserRole::User));

        let raw = storage.get(SNAPSHOT_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["accessToken"], "abc");
        assert_eq!(value["state"]["isAuthenticated"], true);
        assert_eq!(value["state"]["isAdmin"], false);
        assert_eq!(value["state"]["user"]["role"], "ROLE_USER");
    }

    #[test]
    fn snapshot_wins_over_stale_raw_token() {
        let storage = MemoryStorage::new();
        fresh(&storage).login("from-snapshot".into(), user(UserRole::User));
        storage.set(TOKEN_KEY, "stale");

        fresh(&storage);
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("from-snapshot"));
    }

    #[test]
    fn raw_token_without_snapshot_is_dropped() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "orphan");

        let store = fresh(&storage);
        assert!(!store.session().is_authenticated);
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn corrupt_snapshot_means_logged_out() {
        let storage = MemoryStorage::new();
        storage.set(SNAPSHOT_KEY, "{not json");
        storage.set(TOKEN_KEY, "abc");

        let store = fresh(&storage);
        assert_eq!(store.session(), &Session::default());
        assert_eq!(storage.get(SNAPSHOT_KEY), None);
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn inconsistent_flags_are_rederived() {
        let storage = MemoryStorage::new();
        // 标志位声称已登录，但没有令牌
        storage.set(
            SNAPSHOT_KEY,
            r#"{"state":{"user":{"id":1,"email":"a@b.c","name":"A","role":"ROLE_ADMIN"},"accessToken":null,"isAuthenticated":true,"isAdmin":true},"version":0}"#,
        );

        let store = fresh(&storage);
        assert!(!store.session().is_authenticated);
        assert!(!store.session().is_admin);
    }
}
