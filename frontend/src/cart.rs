//! 购物车徽标计数
//!
//! 只是头部显示用的本地副本，不持久化；购物车页拉取服务端数据后重新同步。

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartBadge {
    item_count: u32,
}

impl CartBadge {
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    pub fn set_item_count(&mut self, count: u32) {
        self.item_count = count;
    }

    pub fn increment_count(&mut self, amount: u32) {
        self.item_count = self.item_count.saturating_add(amount);
    }

    /// 不会低于 0
    pub fn decrement_count(&mut self, amount: u32) {
        self.item_count = self.item_count.saturating_sub(amount);
    }

    pub fn reset_count(&mut self) {
        self.item_count = 0;
    }
}

/// 购物车上下文
#[derive(Clone, Copy)]
pub struct CartContext(RwSignal<CartBadge>);

impl CartContext {
    pub fn new() -> Self {
        Self(RwSignal::new(CartBadge::default()))
    }

    pub fn item_count(&self) -> Signal<u32> {
        let badge = self.0;
        Signal::derive(move || badge.get().item_count())
    }

    pub fn set_item_count(&self, count: u32) {
        self.0.update(|b| b.set_item_count(count));
    }

    pub fn increment_count(&self, amount: u32) {
        self.0.update(|b| b.increment_count(amount));
    }

    pub fn decrement_count(&self, amount: u32) {
        self.0.update(|b| b.decrement_count(amount));
    }

    pub fn reset_count(&self) {
        self.0.update(|b| b.reset_count());
    }
}

impl Default for CartContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrement_clamps_at_zero() {
        let mut badge = CartBadge::default();
        badge.set_item_count(3);
        badge.decrement_count(1);
        assert_eq!(badge.item_count(), 2);
        badge.decrement_count(5);
        assert_eq!(badge.item_count(), 0);
    }

    #[test]
    fn increment_and_reset() {
        let mut badge = CartBadge::default();
        badge.increment_count(1);
        badge.increment_count(4);
        assert_eq!(badge.item_count(), 5);
        badge.reset_count();
        assert_eq!(badge.item_count(), 0);
    }
}
