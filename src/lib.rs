//! 后台管理前端的平台无关核心
//!
//! - `api`: 接口封装层（字典类型、用户、操作日志）
//! - `session`: 会话存储（登录、获取资料、注销）
//! - `operlog`: 操作日志视图模型
//! - `storage`: token 持久化
//!
//! HTTP、存储、导航与消息提示都以 trait 注入，浏览器实现位于 `frontend` crate。

pub mod api;
pub mod config;
pub mod error;
pub mod message;
pub mod navigation;
pub mod operlog;
pub mod request;
pub mod session;
pub mod storage;

pub use api::AdminApi;
pub use config::ClientConfig;
pub use error::{AdminError, AdminErrorStatus, AdminResult};
pub use message::{MessageKind, Notifier};
pub use navigation::{Navigator, TagEntry};
pub use operlog::{OperLogState, OperLogView, Pagination, TableSelection};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use session::{SessionAction, SessionPhase, SessionState, SessionStore};
pub use storage::{KeyValueStore, MemoryStore, TokenStorage};

pub use pureadmin_shared as shared;
