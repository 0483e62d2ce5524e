//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 同时持有多标签导航栏与按权限加载的菜单，并作为会话存储的 `Navigator` 实现。

use leptos::prelude::*;
use log::debug;
use pureadmin::navigation::{default_tags, is_fixed_tag};
use pureadmin::{Navigator, SessionState, TagEntry};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

type AuthCheck = Rc<dyn Fn() -> bool>;

/// 路由器服务
///
/// 通过注入的认证信号实现守卫，与会话存储解耦。
/// 导航时若已注入认证检查，则以检查结果为准（可发现运行中过期的 token）。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: RwSignal<AppRoute>,
    is_authenticated: Signal<bool>,
    auth_check: StoredValue<Option<AuthCheck>, LocalStorage>,
    /// 多标签导航栏
    tags: RwSignal<Vec<TagEntry>>,
    /// 按权限加载的菜单，注销时清空
    menu: RwSignal<Vec<AppRoute>>,
}

impl RouterService {
    /// 创建路由服务，初始路由从 URL 解析
    pub fn new(is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        Self {
            current_route: RwSignal::new(initial_route),
            is_authenticated,
            auth_check: StoredValue::new_local(None),
            tags: RwSignal::new(default_tags()),
            menu: RwSignal::new(Vec::new()),
        }
    }

    /// 注入导航时使用的认证检查
    pub fn set_auth_check(&self, check: impl Fn() -> bool + 'static) {
        self.auth_check.set_value(Some(Rc::new(check)));
    }

    fn check_auth(&self) -> bool {
        match self.auth_check.get_value() {
            Some(check) => check(),
            None => self.is_authenticated.get_untracked(),
        }
    }

    pub fn current_route(&self) -> Signal<AppRoute> {
        self.current_route.into()
    }

    pub fn tags(&self) -> Signal<Vec<TagEntry>> {
        self.tags.into()
    }

    pub fn menu(&self) -> Signal<Vec<AppRoute>> {
        self.menu.into()
    }

    /// 根据用户权限加载菜单
    pub fn load_menu(&self, state: &SessionState) {
        self.menu.set(AppRoute::menu_for(state));
    }

    /// 关闭一个标签，首页标签不可关闭
    pub fn close_tag(&self, path: &str) {
        self.tags.update(|tags| {
            if tags.len() > 1 {
                tags.retain(|t| t.path != path || is_fixed_tag(path));
            }
        });
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.check_auth();
        let resolved = self
            .menu
            .with_untracked(|allowed| target_route.resolve(is_auth, allowed));
        if resolved != target_route {
            debug!("[Router] {} resolved to {}", target_route, resolved);
        }

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.open_tag(resolved);
        self.current_route.set(resolved);
    }

    fn open_tag(&self, route: AppRoute) {
        if !AppRoute::MENU.contains(&route) {
            return;
        }
        self.tags.update(|tags| {
            if !tags.iter().any(|t| t.path == route.to_path()) {
                tags.push(TagEntry::new(route.to_path(), route.title()));
            }
        });
    }

    /// 对地址栏中的初始路由执行一次守卫
    fn guard_initial_route(&self) {
        self.navigate_to_route(self.current_route.get_untracked(), false);
    }

    /// 浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            router.navigate_to_route(target_route, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向（首次运行时也会校验初始路由）
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                debug!("[Router] Auth state changed: logged in, redirecting to welcome.");
                router.navigate_to_route(AppRoute::auth_success_redirect(), true);
            } else if !is_auth && route.requires_auth() {
                debug!("[Router] Auth state changed: logged out, redirecting to login.");
                router.navigate_to_route(AppRoute::auth_failure_redirect(), true);
            }
        });
    }
}

impl Navigator for RouterService {
    fn reset_tags(&self, tags: Vec<TagEntry>) {
        self.tags.set(tags);
    }

    fn reset_routes(&self) {
        self.menu.set(Vec::new());
    }

    fn push(&self, path: &str) {
        self.navigate(path);
    }
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 注册监听器并提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(service: RouterService, children: Children) -> impl IntoView {
    service.guard_initial_route();
    service.init_popstate_listener();
    service.setup_auth_redirect();
    provide_context(service);

    children()
}

/// 路由出口组件
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}
