//! 本地存储封装模块
//!
//! `KeyValueStore` 是会话持久化依赖的最小接口，
//! 浏览器中由 LocalStorage 实现，测试中由内存表实现。

use gloo_storage::Storage;

pub trait KeyValueStore {
    /// 键不存在或存储不可用时返回 `None`
    fn get(&self, key: &str) -> Option<String>;

    /// 返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 返回操作是否成功
    fn delete(&self, key: &str) -> bool;
}

/// 浏览器 LocalStorage
///
/// 隐私模式或非浏览器环境下存储不可用，此时读取为空、写入失败，不会 panic。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        // `gloo_storage::LocalStorage::raw` 在存储不可用时会 panic，先确认可用
        let available = web_sys::window()?.local_storage().ok()?.is_some();
        available.then(gloo_storage::LocalStorage::raw)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

// =========================================================
// 测试工具: MemoryStorage
// =========================================================

/// 内存键值表，克隆出的句柄共享同一份数据（模拟同一个浏览器的存储）
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}
