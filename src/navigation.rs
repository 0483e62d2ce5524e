/// 登录页路径
pub const LOGIN_PATH: &str = "/login";
/// 首页路径
pub const HOME_PATH: &str = "/welcome";

/// 多标签导航栏中的一个标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub path: String,
    pub title: String,
}

impl TagEntry {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }
}

/// 注销后保留的固定标签集合
pub fn default_tags() -> Vec<TagEntry> {
    vec![TagEntry::new(HOME_PATH, "首页")]
}

/// 固定标签不可关闭
pub fn is_fixed_tag(path: &str) -> bool {
    default_tags().iter().any(|t| t.path == path)
}

/// 导航能力
///
/// 会话存储只通过此接口影响导航，浏览器中由路由服务实现。
pub trait Navigator {
    /// 用给定集合替换多标签导航栏
    fn reset_tags(&self, tags: Vec<TagEntry>);
    /// 清空按权限加载的路由表
    fn reset_routes(&self);
    /// 跳转到指定路径
    fn push(&self, path: &str);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 记录所有导航调用
    #[derive(Clone, Default)]
    pub struct RecordingNavigator {
        pub calls: Rc<RefCell<Vec<String>>>,
        pub tags: Rc<RefCell<Vec<TagEntry>>>,
        pub location: Rc<RefCell<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn reset_tags(&self, tags: Vec<TagEntry>) {
            self.calls.borrow_mut().push("reset_tags".to_string());
            *self.tags.borrow_mut() = tags;
        }

        fn reset_routes(&self) {
            self.calls.borrow_mut().push("reset_routes".to_string());
        }

        fn push(&self, path: &str) {
            self.calls.borrow_mut().push(format!("push:{}", path));
            *self.location.borrow_mut() = path.to_string();
        }
    }
}
