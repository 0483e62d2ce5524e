use crate::session::{Store, use_session};
use crate::web::router::use_router;
use crate::web::toast::use_toaster;
use leptos::prelude::*;
use leptos::task::spawn_local;
use pureadmin::navigation::HOME_PATH;
use pureadmin::{MessageKind, Navigator, Notifier};
use pureadmin_shared::{ApiResult, LoginRequest};
use std::rc::Rc;

const LOGIN_DAY_OPTIONS: [u32; 3] = [1, 7, 30];

/// 登录并获取用户资料，失败时返回展示给用户的错误信息
async fn sign_in(store: Rc<Store>, request: LoginRequest) -> Result<(), String> {
    match store.login(&request).await {
        Ok(ApiResult::Success(_)) => {}
        Ok(ApiResult::Failure { msg, .. }) => return Err(msg),
        Err(e) => return Err(format!("登录失败: {}", e.message)),
    }

    match store.fetch_profile().await {
        Ok(ApiResult::Success(_)) => Ok(()),
        Ok(ApiResult::Failure { msg, .. }) => Err(msg),
        Err(e) => Err(format!("获取用户信息失败: {}", e.message)),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let toaster = use_toaster();

    let (username, set_username) = signal(String::from("admin"));
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let remembered = move || session.state.get().is_remembered;
    let login_day = move || session.state.get().login_day;

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("请输入用户名和密码".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = LoginRequest {
            username: username.get_untracked(),
            password: password.get_untracked(),
            ..Default::default()
        };
        let store = session.store();
        spawn_local(async move {
            match sign_in(store, request).await {
                Ok(()) => {
                    router.load_menu(&session.state.get_untracked());
                    toaster.message("登录成功", MessageKind::Success);
                    router.push(HOME_PATH);
                }
                Err(msg) => set_error_msg.set(Some(msg)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"PureAdmin"</h1>
                    <p class="text-base-content/70">"后台管理系统"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"账号"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="flex items-center justify-between mt-2">
                            <label class="label cursor-pointer gap-2">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-sm"
                                    prop:checked=remembered
                                    on:change=move |ev| {
                                        session.store().set_is_remembered(event_target_checked(&ev));
                                    }
                                />
                                <span class="label-text">"免登录"</span>
                            </label>
                            <select
                                class="select select-bordered select-sm"
                                prop:value=move || login_day().to_string()
                                on:change=move |ev| {
                                    if let Ok(days) = event_target_value(&ev).parse::<u32>() {
                                        session.store().set_login_day(days);
                                    }
                                }
                            >
                                {LOGIN_DAY_OPTIONS
                                    .into_iter()
                                    .map(|d| view! { <option value=d.to_string()>{format!("{} 天", d)}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                } else {
                                    "登录".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
