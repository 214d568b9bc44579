//! 页面组件
//!
//! 只有涉及会话或购物车状态的页面有完整逻辑，其余页面为占位。

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopper_shared::{PaymentApprovalRequest, SignupRequest};

use crate::api::use_api;
use crate::cart::use_cart;
use crate::session::use_auth;
use crate::web::router::{Link, authenticated_redirect, query_param, use_router};

/// 占位页面
#[component]
pub fn Placeholder(#[prop(into)] title: String) -> impl IntoView {
    view! {
        <section class="py-16 text-center">
            <h1 class="text-3xl font-bold">{title}</h1>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[50vh]">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link to="/" class="btn btn-primary mt-6">"Back to home"</Link>
            </div>
        </div>
    }
}

#[component]
fn ErrorAlert(message: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let session = auth.session_signal();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 已登录时直接回首页
    Effect::new(move |_| {
        if let Some(navigation) = authenticated_redirect(&session.get()) {
            router.apply(navigation);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get_untracked().is_empty() || password.get_untracked().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.login(&email.get_untracked(), &password.get_untracked()).await {
                // 会话更新后由上面的 Effect 跳转
                Ok(tokens) => auth.login(tokens.access_token, tokens.user),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card w-full max-w-md mx-auto shadow-xl bg-base-100">
            <form class="card-body" on:submit=on_submit>
                <h1 class="text-3xl font-bold text-center">"Log in"</h1>
                <ErrorAlert message=error_msg />
                <input
                    type="email"
                    placeholder="Email"
                    class="input input-bordered"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                    required
                />
                <input
                    type="password"
                    placeholder="Password"
                    class="input input-bordered"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                    required
                />
                <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() { "Logging in..." } else { "Log in" }}
                </button>
                <Link to="/signup" class="link text-center">"Create an account"</Link>
            </form>
        </div>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let session = auth.session_signal();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        if let Some(navigation) = authenticated_redirect(&session.get()) {
            router.apply(navigation);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let req = SignupRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
            name: name.get_untracked(),
        };
        let api = api.clone();
        spawn_local(async move {
            match api.signup(req).await {
                Ok(_) => router.navigate("/login"),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card w-full max-w-md mx-auto shadow-xl bg-base-100">
            <form class="card-body" on:submit=on_submit>
                <h1 class="text-3xl font-bold text-center">"Sign up"</h1>
                <ErrorAlert message=error_msg />
                <input
                    type="text"
                    placeholder="Name"
                    class="input input-bordered"
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    prop:value=name
                    required
                />
                <input
                    type="email"
                    placeholder="Email"
                    class="input input-bordered"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                    required
                />
                <input
                    type="password"
                    placeholder="Password"
                    class="input input-bordered"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                    required
                />
                <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                    "Sign up"
                </button>
            </form>
        </div>
    }
}

/// 第三方登录回跳
///
/// 令牌先写入令牌键，再用它查询当前用户，成功后才写入完整会话。
#[component]
pub fn OAuthCallbackPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    match query_param("accessToken").filter(|t| !t.is_empty()) {
        None => {
            log_warn!("[Session] OAuth callback without token");
            auth.logout();
            router.replace("/login");
        }
        Some(token) => {
            auth.stage_token(&token);
            spawn_local(async move {
                match api.get_current_user().await {
                    Ok(user) => {
                        auth.login(token, user);
                        // 去掉地址栏中的令牌
                        router.replace("/");
                    }
                    Err(e) => {
                        log_error!("[Session] OAuth login failed: {}", e);
                        auth.logout();
                        router.replace("/login");
                    }
                }
            });
        }
    }

    view! {
        <div class="flex items-center justify-center min-h-[50vh]">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

// =========================================================
// 购物车 / 订单 (Cart & Orders)
// =========================================================

#[component]
pub fn CartPage() -> impl IntoView {
    let api = use_api();
    let cart = use_cart();

    let (items, set_items) = signal(Vec::new());
    let (total_price, set_total_price) = signal(0i64);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 拉取服务端购物车，并以它为准同步徽标
    let reload = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                match api.get_cart().await {
                    Ok(resp) => {
                        cart.set_item_count(resp.total_count);
                        set_total_price.set(resp.total_price);
                        set_items.set(resp.items);
                    }
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
            });
        }
    };
    reload();

    let remove = move |cart_item_id: i64| {
        let api = api.clone();
        let reload = reload.clone();
        spawn_local(async move {
            match api.delete_cart_item(cart_item_id).await {
                Ok(()) => reload(),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <section class="space-y-4">
            <h1 class="text-3xl font-bold">"Cart"</h1>
            <ErrorAlert message=error_msg />
            <ul class="divide-y">
                <For
                    each=move || items.get()
                    key=|item| item.id
                    children=move |item| {
                        let remove = remove.clone();
                        let id = item.id;
                        view! {
                            <li class="flex justify-between py-2">
                                <span>{item.product.name.clone()}</span>
                                <span>{format!("x{}", item.quantity)}</span>
                                <button class="btn btn-ghost btn-sm" on:click=move |_| remove(id)>
                                    "Remove"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
            <p class="text-right font-bold">{move || format!("Total: {}", total_price.get())}</p>
            <Link to="/order" class="btn btn-primary">"Checkout"</Link>
        </section>
    }
}

/// 支付成功回跳：查询串携带 `paymentKey`、`orderId`、`amount`
#[component]
pub fn OrderSuccessPage() -> impl IntoView {
    let api = use_api();
    let (status, set_status) = signal("Confirming payment...".to_string());

    let approval = query_param("paymentKey").zip(query_param("orderId")).and_then(|(payment_key, order_id)| {
        let amount = query_param("amount")?.parse().ok()?;
        Some(PaymentApprovalRequest {
            order_id,
            payment_key,
            amount,
        })
    });

    match approval {
        Some(req) => spawn_local(async move {
            match api.confirm_payment(req).await {
                Ok(_) => set_status.set("Payment completed. Thank you for your order!".to_string()),
                Err(e) => set_status.set(format!("Payment confirmation failed: {}", e)),
            }
        }),
        None => set_status.set("Missing payment information".to_string()),
    }

    view! {
        <section class="py-16 text-center space-y-6">
            <h1 class="text-3xl font-bold">{move || status.get()}</h1>
            <Link to="/mypage/orders" class="btn btn-primary">"View orders"</Link>
        </section>
    }
}

// =========================================================
// 个人信息 (Profile)
// =========================================================

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let session = auth.session_signal();

    let initial_name = session
        .get_untracked()
        .user
        .map(|u| u.name)
        .unwrap_or_default();
    let (name, set_name) = signal(initial_name);
    let (message, set_message) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            match api.update_my_profile(&name.get_untracked()).await {
                Ok(user) => {
                    // 用完整的登录写入刷新会话中的用户
                    if let Some(token) = session.get_untracked().access_token {
                        auth.login(token, user);
                    }
                    set_message.set(Some("Profile updated".to_string()));
                }
                Err(e) => set_message.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <section class="max-w-md space-y-4">
            <h1 class="text-3xl font-bold">"Profile"</h1>
            <p>{move || session.get().user.map(|u| u.email).unwrap_or_default()}</p>
            <form class="space-y-2" on:submit=on_submit>
                <input
                    type="text"
                    class="input input-bordered w-full"
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    prop:value=name
                />
                <button class="btn btn-primary">"Save"</button>
            </form>
            <Show when=move || message.get().is_some()>
                <p class="text-sm">{move || message.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}
