//! 会话存储
//!
//! 持有当前用户的展示信息（头像、用户名、昵称）与授权数据（角色、权限），
//! 由持久化的 token 记录初始化。所有状态修改都经过 [`SessionStore::dispatch`]，
//! 修改后依次通知订阅者。
//!
//! 单线程协作式运行，不加锁。注销会推进会话纪元，
//! 在注销完成之后才返回的登录或资料请求会被丢弃，避免已注销的会话被重新写回。

use crate::api::AdminApi;
use crate::error::{AdminError, AdminResult};
use crate::navigation::{LOGIN_PATH, Navigator, default_tags};
use crate::request::HttpClient;
use crate::storage::TokenStorage;
use log::{info, warn};
use pureadmin_shared::{
    ALL_PERMISSION, ApiResult, LoginRequest, LoginResult, ProfileResult, Timestamp, TokenRecord,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[cfg(test)]
mod tests;

// =========================================================
// 状态与动作
// =========================================================

/// 会话状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub avatar: String,
    pub user_name: String,
    pub nick_name: String,
    /// 页面级别权限
    pub roles: Vec<String>,
    /// 按钮级别权限
    pub permissions: Vec<String>,
    /// 是否勾选了登录页的免登录
    pub is_remembered: bool,
    /// 免登录保存天数
    pub login_day: u32,
}

impl SessionState {
    /// 从持久化记录恢复；没有记录时使用空值
    pub fn from_record(record: Option<&TokenRecord>, login_day: u32) -> Self {
        match record {
            Some(r) => Self {
                avatar: r.avatar.clone(),
                user_name: r.user_name.clone(),
                nick_name: r.nick_name.clone(),
                roles: r.roles.clone(),
                permissions: r.permissions.clone(),
                is_remembered: false,
                login_day,
            },
            None => Self {
                avatar: String::new(),
                user_name: String::new(),
                nick_name: String::new(),
                roles: Vec::new(),
                permissions: Vec::new(),
                is_remembered: false,
                login_day,
            },
        }
    }

    pub fn reduce(&mut self, action: SessionAction) {
        match action {
            SessionAction::SetAvatar(v) => self.avatar = v,
            SessionAction::SetUserName(v) => self.user_name = v,
            SessionAction::SetNickName(v) => self.nick_name = v,
            SessionAction::SetRoles(v) => self.roles = v,
            SessionAction::SetPermissions(v) => self.permissions = v,
            SessionAction::SetIsRemembered(v) => self.is_remembered = v,
            SessionAction::SetLoginDay(v) => self.login_day = v,
            // 头像、免登录选项与天数在注销后保留
            SessionAction::Clear => {
                self.user_name.clear();
                self.roles.clear();
                self.permissions.clear();
            }
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p == ALL_PERMISSION || p == permission)
    }
}

/// 会话修改动作，每个动作对应一个具名的 setter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    SetAvatar(String),
    SetUserName(String),
    SetNickName(String),
    SetRoles(Vec<String>),
    SetPermissions(Vec<String>),
    SetIsRemembered(bool),
    SetLoginDay(u32),
    /// 注销：清空用户名、角色与权限
    Clear,
}

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// 无用户名或无有效 token
    Anonymous,
    /// 有用户名且 token 有效
    Authenticated,
}

type Listener = Box<dyn Fn(&SessionState)>;

// =========================================================
// 会话存储
// =========================================================

pub struct SessionStore<C> {
    api: AdminApi<C>,
    tokens: TokenStorage,
    navigator: Rc<dyn Navigator>,
    token_ttl: Duration,
    state: RefCell<SessionState>,
    epoch: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

impl<C: HttpClient> SessionStore<C> {
    pub fn new(api: AdminApi<C>, tokens: TokenStorage, navigator: Rc<dyn Navigator>) -> Self {
        let config = api.config();
        let token_ttl = config.token_ttl;
        let state = SessionState::from_record(tokens.load().as_ref(), config.default_login_day);
        Self {
            api,
            tokens,
            navigator,
            token_ttl,
            state: RefCell::new(state),
            epoch: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn api(&self) -> &AdminApi<C> {
        &self.api
    }

    /// 当前状态快照
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        let has_user = !self.state.borrow().user_name.is_empty();
        if has_user && self.tokens.access_token(Timestamp::now()).is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    /// 订阅状态变化，每次 dispatch 之后收到最新快照
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// 唯一的状态修改入口
    pub fn dispatch(&self, action: SessionAction) {
        self.state.borrow_mut().reduce(action);
        let snapshot = self.state.borrow().clone();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }

    /// 持久化记录的 token 已过期时清空会话并删除记录
    ///
    /// 返回是否发生了清理。
    pub fn drop_expired(&self) -> bool {
        let expired = self
            .tokens
            .load()
            .is_some_and(|r| r.is_expired(Timestamp::now()));
        if expired {
            info!("[Session] stored token expired, clearing session");
            self.dispatch(SessionAction::Clear);
            if let Err(e) = self.tokens.clear() {
                warn!("[Session] failed to remove token: {}", e);
            }
        }
        expired
    }

    /// 先丢弃已过期的 token 记录，再给出当前阶段
    ///
    /// 路由守卫在每次导航时调用，运行中的页面因此能发现 token 过期。
    pub fn validate(&self) -> SessionPhase {
        self.drop_expired();
        self.phase()
    }

    // --- 具名 setter ---

    pub fn set_avatar(&self, avatar: impl Into<String>) {
        self.dispatch(SessionAction::SetAvatar(avatar.into()));
    }

    pub fn set_user_name(&self, user_name: impl Into<String>) {
        self.dispatch(SessionAction::SetUserName(user_name.into()));
    }

    pub fn set_nick_name(&self, nick_name: impl Into<String>) {
        self.dispatch(SessionAction::SetNickName(nick_name.into()));
    }

    pub fn set_roles(&self, roles: Vec<String>) {
        self.dispatch(SessionAction::SetRoles(roles));
    }

    pub fn set_permissions(&self, permissions: Vec<String>) {
        self.dispatch(SessionAction::SetPermissions(permissions));
    }

    pub fn set_is_remembered(&self, remembered: bool) {
        self.dispatch(SessionAction::SetIsRemembered(remembered));
    }

    pub fn set_login_day(&self, days: u32) {
        self.dispatch(SessionAction::SetLoginDay(days));
    }

    // --- 异步流程 ---

    /// 登录
    ///
    /// 成功 (`code == 200`) 时写入有效期固定为 `token_ttl` 的 token，不使用后端给出的过期时间。
    /// 不修改展示状态；业务失败原样返回，由调用方检查。
    pub async fn login(&self, credentials: &LoginRequest) -> AdminResult<ApiResult<LoginResult>> {
        let epoch = self.epoch.get();
        let res = self
            .api
            .login(credentials)
            .await
            .map_err(|e| e.in_op("session.login"))?;
        self.ensure_current(epoch, "session.login")?;

        if let ApiResult::Success(payload) = &res {
            let expires = Timestamp::now() + self.token_ttl;
            self.persist(&TokenRecord::credentials(payload.token.as_str(), expires));
            info!("[Session] login accepted for {}", credentials.username);
        }
        Ok(res)
    }

    /// 获取用户资料
    ///
    /// 成功时逐项写入会话，并在保留原 accessToken / expires 的前提下重写 token 记录。
    /// 业务失败以 `ApiResult::Failure` 返回。
    pub async fn fetch_profile(&self) -> AdminResult<ApiResult<ProfileResult>> {
        let epoch = self.epoch.get();
        let res = self
            .api
            .get_info()
            .await
            .map_err(|e| e.in_op("session.fetch_profile"))?;
        self.ensure_current(epoch, "session.fetch_profile")?;

        if let ApiResult::Success(profile) = &res {
            self.set_avatar(profile.user.avatar.as_str());
            self.set_user_name(profile.user.user_name.as_str());
            self.set_nick_name(profile.user.nick_name.as_str());
            self.set_roles(profile.roles.clone());
            self.set_permissions(profile.permissions.clone());
            if let Err(e) = self.tokens.merge_profile(profile) {
                warn!("[Session] failed to persist profile: {}", e);
            }
            info!("[Session] profile loaded for {}", profile.user.user_name);
        }
        Ok(res)
    }

    /// 注销
    ///
    /// 先等待注销接口（失败直接返回，不修改任何状态），随后清空会话、删除 token、
    /// 重置标签与路由表并跳转到登录页。
    pub async fn logout(&self) -> AdminResult<()> {
        let res = self
            .api
            .logout()
            .await
            .map_err(|e| e.in_op("session.logout"))?;
        if let ApiResult::Failure { code, msg } = res {
            warn!("[Session] logout endpoint answered {}: {}", code, msg);
        }

        self.epoch.set(self.epoch.get() + 1);
        self.dispatch(SessionAction::Clear);
        if let Err(e) = self.tokens.clear() {
            warn!("[Session] failed to remove token: {}", e);
        }
        self.navigator.reset_tags(default_tags());
        self.navigator.reset_routes();
        self.navigator.push(LOGIN_PATH);
        info!("[Session] logged out");
        Ok(())
    }

    fn ensure_current(&self, epoch: u64, operation: &str) -> AdminResult<()> {
        if self.epoch.get() == epoch {
            Ok(())
        } else {
            warn!("[Session] {} finished after logout, result discarded", operation);
            Err(AdminError::superseded("session was logged out while the request was in flight")
                .in_op(operation))
        }
    }

    fn persist(&self, record: &TokenRecord) {
        if let Err(e) = self.tokens.save(record) {
            warn!("[Session] failed to persist token: {}", e);
        }
    }
}
