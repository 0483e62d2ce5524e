//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。

use pureadmin::SessionState;
use pureadmin::navigation::{HOME_PATH, LOGIN_PATH};
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 首页
    Welcome,
    /// 系统监控 / 操作日志
    OperLog,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 侧边菜单中出现的路由
    pub const MENU: [AppRoute; 2] = [AppRoute::Welcome, AppRoute::OperLog];

    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | LOGIN_PATH => Self::Login,
            HOME_PATH => Self::Welcome,
            "/monitor/operlog" => Self::OperLog,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Welcome => HOME_PATH,
            Self::OperLog => "/monitor/operlog",
            Self::NotFound => "/404",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "登录",
            Self::Welcome => "首页",
            Self::OperLog => "操作日志",
            Self::NotFound => "404",
        }
    }

    /// 访问该路由所需的权限标识
    pub fn permission(&self) -> Option<&'static str> {
        match self {
            Self::OperLog => Some("monitor:operlog:list"),
            _ => None,
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Welcome | Self::OperLog)
    }

    /// 已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Welcome
    }

    /// 守卫：结合认证状态与已加载的菜单，决定目标路由最终落在哪里
    ///
    /// 需要权限的路由只有出现在菜单中时才可访问，否则视为不存在。
    pub fn resolve(self, is_authenticated: bool, allowed: &[AppRoute]) -> AppRoute {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else if self.permission().is_some() && !allowed.contains(&self) {
            Self::NotFound
        } else {
            self
        }
    }

    /// 按当前用户权限过滤出的菜单
    pub fn menu_for(state: &SessionState) -> Vec<AppRoute> {
        Self::MENU
            .into_iter()
            .filter(|route| route.permission().is_none_or(|p| state.has_permission(p)))
            .collect()
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
