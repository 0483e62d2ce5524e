//! 会话上下文
//!
//! 把核心库的 `SessionStore` 接入 Leptos：存储本身放在本地 StoredValue 中，
//! 每次 dispatch 后的快照同步到 `state` 信号，路由服务通过注入的认证信号做守卫。

use crate::web::http::FetchHttpClient;
use crate::web::router::RouterService;
use crate::web::storage::BrowserStorage;
use leptos::prelude::*;
use pureadmin::{AdminApi, ClientConfig, SessionPhase, SessionState, SessionStore, TokenStorage};
use std::rc::Rc;

pub type Store = SessionStore<FetchHttpClient>;

/// 编译期注入的配置，未设置的项使用默认值
pub fn build_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        let value = match key {
            pureadmin::config::ENV_BASE_URL => option_env!("PUREADMIN_API_BASE"),
            pureadmin::config::ENV_STORAGE_KEY => option_env!("PUREADMIN_STORAGE_KEY"),
            pureadmin::config::ENV_PAGE_SIZE => option_env!("PUREADMIN_PAGE_SIZE"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: StoredValue<Rc<Store>, LocalStorage>,
    /// 最新的会话快照（只读使用）
    pub state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn store(&self) -> Rc<Store> {
        self.store.get_value()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 创建会话上下文与路由服务
///
/// 路由服务需要认证信号，会话存储又需要路由服务作为导航，
/// 因此先建立状态信号，再依次创建两者。
pub fn init_session(config: ClientConfig) -> (SessionContext, RouterService) {
    let tokens = TokenStorage::new(Rc::new(BrowserStorage), config.storage_key.clone());
    let state = RwSignal::new(SessionState::from_record(None, config.default_login_day));
    let is_authenticated = Signal::derive(move || !state.get().user_name.is_empty());
    let router = RouterService::new(is_authenticated);

    let api = AdminApi::new(FetchHttpClient, config).with_tokens(tokens.clone());
    let store = SessionStore::new(api, tokens, Rc::new(router));
    store.drop_expired();
    store.subscribe(move |snapshot| state.set(snapshot.clone()));

    let snapshot = store.state();
    router.load_menu(&snapshot);
    state.set(snapshot);

    let store = Rc::new(store);
    let guard_store = store.clone();
    router.set_auth_check(move || guard_store.validate() == SessionPhase::Authenticated);

    let ctx = SessionContext {
        store: StoredValue::new_local(store),
        state,
    };
    (ctx, router)
}
