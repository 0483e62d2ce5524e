use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
///
/// 注意：后端返回的业务失败 (`code != 200`) 不属于错误，
/// 它以 `ApiResult::Failure` 的形式正常返回给调用方。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminErrorStatus {
    /// 网络请求失败（连接失败、请求无法构建等）
    Transport,
    /// 非 2xx 的 HTTP 状态码
    Http(u16),
    /// 响应体无法解析或请求体无法序列化
    Serialization,
    /// 本地存储读写失败
    Storage,
    /// 会话在请求进行期间已被注销，结果被丢弃
    Superseded,
}

impl AdminErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminErrorStatus::Transport => "TRANSPORT_ERROR",
            AdminErrorStatus::Http(_) => "HTTP_ERROR",
            AdminErrorStatus::Serialization => "SERIALIZATION_ERROR",
            AdminErrorStatus::Storage => "STORAGE_ERROR",
            AdminErrorStatus::Superseded => "SESSION_SUPERSEDED",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.send", "session.fetch_profile"
    pub operation: String,
    /// 额外的细节信息，如请求路径
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// - status: 错误类型
/// - message: 错误消息
/// - source: 原始错误（可选，用于错误链）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct AdminError {
    pub status: AdminErrorStatus,
    pub message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl AdminError {
    pub fn new(status: AdminErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Transport, message)
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Http(status), message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Serialization, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Storage, message)
    }

    pub fn superseded(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Superseded, message)
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    /// 设置原始错误源
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::serialization(e.to_string()).with_source(e)
    }
}

impl From<serde_urlencoded::ser::Error> for AdminError {
    fn from(e: serde_urlencoded::ser::Error) -> Self {
        AdminError::serialization(e.to_string()).with_source(e)
    }
}
