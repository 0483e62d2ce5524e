use crate::components::layout::AdminLayout;
use crate::session::use_session;
use leptos::prelude::*;

#[component]
pub fn WelcomePage() -> impl IntoView {
    let session = use_session();
    let state = session.state;

    let roles = move || state.get().roles.join(", ");
    let permission_count = move || state.with(|s| s.permissions.len());

    view! {
        <AdminLayout>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">
                        "欢迎回来，" {move || state.get().nick_name}
                    </h2>
                    <div class="stats stats-vertical md:stats-horizontal">
                        <div class="stat">
                            <div class="stat-title">"用户名"</div>
                            <div class="stat-value text-primary text-2xl">{move || state.get().user_name}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"角色"</div>
                            <div class="stat-value text-secondary text-2xl">{roles}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"权限数"</div>
                            <div class="stat-value text-2xl">{permission_count}</div>
                            <div class="stat-desc">"免登录 " {move || state.get().login_day} " 天"</div>
                        </div>
                    </div>
                </div>
            </div>
        </AdminLayout>
    }
}
