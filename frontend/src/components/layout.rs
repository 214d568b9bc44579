//! 页面外框：头部导航 + 页脚

use chrono::Datelike;
use leptos::prelude::*;

use crate::cart::use_cart;
use crate::session::use_auth;
use crate::web::router::{Link, use_router};

/// 搜索框提交后的跳转路径，关键字为空时不跳转
pub fn search_path(keyword: &str) -> Option<String> {
    let keyword = keyword.trim();
    (!keyword.is_empty()).then(|| format!("/search?q={}", urlencoding::encode(keyword)))
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-base-100">
            <Header />
            <main class="flex-1 w-full max-w-7xl mx-auto px-4 py-8">{children()}</main>
            <Footer />
        </div>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let cart = use_cart();
    let router = use_router();

    let session = auth.session_signal();
    let item_count = cart.item_count();
    let (keyword, set_keyword) = signal(String::new());

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(path) = search_path(&keyword.get_untracked()) {
            router.navigate(&path);
            set_keyword.set(String::new());
        }
    };

    let on_logout = move |_| {
        auth.logout();
        router.navigate("/");
    };

    let user_name = move || {
        session
            .get()
            .user
            .map(|u| u.name)
            .unwrap_or_else(|| "User".to_string())
    };

    view! {
        <header class="navbar bg-base-100 border-b border-base-300 sticky top-0 z-50">
            <div class="flex-none">
                <Link to="/" class="btn btn-ghost text-2xl font-bold text-primary">
                    "Shopper"
                </Link>
            </div>

            <form class="flex-1 max-w-md mx-8" on:submit=on_search>
                <input
                    type="text"
                    placeholder="Search products"
                    class="input input-bordered w-full"
                    on:input=move |ev| set_keyword.set(event_target_value(&ev))
                    prop:value=keyword
                />
            </form>

            <div class="flex-none flex items-center gap-6">
                <Link to="/cart" class="relative">
                    "Cart"
                    <Show when=move || { item_count.get() > 0 }>
                        <span class="badge badge-accent badge-sm absolute -top-2 -right-4">
                            {move || item_count.get()}
                        </span>
                    </Show>
                </Link>

                <Show
                    when=move || session.get().is_authenticated
                    fallback=|| view! { <Link to="/login" class="font-medium">"Log in"</Link> }
                >
                    <div class="dropdown dropdown-end">
                        <button class="font-medium">{user_name}</button>
                        <ul class="dropdown-content menu bg-base-100 rounded-box shadow w-48">
                            <li>
                                <Link to="/mypage">"My page"</Link>
                            </li>
                            <Show when=move || session.get().is_admin>
                                <li>
                                    <Link to="/admin/products" class="text-accent">"Admin"</Link>
                                </li>
                            </Show>
                            <li>
                                <button on:click=on_logout>"Log out"</button>
                            </li>
                        </ul>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Local::now().year();

    view! {
        <footer class="footer footer-center bg-base-200 p-10 mt-auto">
            <p class="text-sm opacity-70">{format!("© {} Shopper. All rights reserved.", year)}</p>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_path_trims_and_encodes() {
        assert_eq!(search_path("  red shoes "), Some("/search?q=red%20shoes".to_string()));
        assert_eq!(search_path("a&b"), Some("/search?q=a%26b".to_string()));
        assert_eq!(search_path("   "), None);
    }
}
