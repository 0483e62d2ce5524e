use crate::session::use_session;
use crate::web::router::use_router;
use crate::web::toast::use_toaster;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use pureadmin::navigation::is_fixed_tag;
use pureadmin::{MessageKind, Notifier};

/// 已登录页面的外框：侧边菜单、多标签栏与用户信息
#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let toaster = use_toaster();

    let current = router.current_route();
    let display_name = move || {
        let state = session.state.get();
        if state.nick_name.is_empty() {
            state.user_name
        } else {
            state.nick_name
        }
    };

    let on_logout = move |_| {
        let store = session.store();
        spawn_local(async move {
            if let Err(e) = store.logout().await {
                warn!("[Layout] logout failed: {}", e);
                toaster.message(&format!("退出登录失败: {}", e.message), MessageKind::Error);
            }
        });
    };

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200 font-sans">
            <input id="admin-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1">
                        <span class="text-xl font-bold px-2">"PureAdmin"</span>
                    </div>
                    <div class="flex-none gap-2">
                        {move || {
                            let avatar = session.state.get().avatar;
                            (!avatar.is_empty()).then(|| view! {
                                <div class="avatar">
                                    <div class="w-8 rounded-full"><img src=avatar /></div>
                                </div>
                            })
                        }}
                        <span class="badge badge-neutral">{display_name}</span>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                            "退出系统"
                        </button>
                    </div>
                </div>

                // 多标签导航栏
                <div class="tabs tabs-boxed bg-base-100 mx-4 mt-4">
                    <For
                        each=move || router.tags().get()
                        key=|tag| tag.path.clone()
                        children=move |tag| {
                            let path = tag.path.clone();
                            let close_path = tag.path.clone();
                            let closable = !is_fixed_tag(&tag.path);
                            let active = {
                                let path = tag.path.clone();
                                move || current.get().to_path() == path
                            };
                            view! {
                                <a
                                    class=move || if active() { "tab tab-active" } else { "tab" }
                                    on:click=move |_| router.navigate(&path)
                                >
                                    {tag.title.clone()}
                                    {closable.then(|| view! {
                                        <button
                                            class="btn btn-ghost btn-xs ml-1"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                router.close_tag(&close_path);
                                            }
                                        >
                                            "×"
                                        </button>
                                    })}
                                </a>
                            }
                        }
                    />
                </div>

                <main class="p-4">{children()}</main>
            </div>
            <div class="drawer-side">
                <ul class="menu p-4 w-56 min-h-full bg-base-100">
                    <For
                        each=move || router.menu().get()
                        key=|route| route.to_path()
                        children=move |route| {
                            view! {
                                <li>
                                    <a
                                        class=move || if current.get() == route { "active" } else { "" }
                                        on:click=move |_| router.navigate(route.to_path())
                                    >
                                        {route.title()}
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}
