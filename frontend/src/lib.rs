//! PureAdmin 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎），同时负责多标签与菜单
//! - `session`: 会话上下文，包装核心库的会话存储
//! - `components`: UI 组件层

pub mod logger;
mod session;
mod components {
    pub mod layout;
    pub mod login;
    pub mod operlog;
    pub mod welcome;
}

use crate::components::login::LoginPage;
use crate::components::operlog::OperLogPage;
use crate::components::welcome::WelcomePage;
use crate::session::{build_config, init_session};

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，实现核心库注入的各项能力。
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
    pub mod toast;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};
use web::toast::{ToastHost, Toaster};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Welcome => view! { <WelcomePage /> }.into_any(),
        AppRoute::OperLog => view! { <OperLogPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文与路由服务（从 LocalStorage 恢复 token 记录）
    let (session_ctx, router) = init_session(build_config());
    provide_context(session_ctx);

    // 2. 消息提示
    provide_context(Toaster::new());

    view! {
        // 3. 路由器组件：注入会话派生的认证信号实现守卫
        <Router service=router>
            <ToastHost />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
