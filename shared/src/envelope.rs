//! 响应信封
//!
//! 后端所有接口都返回 `{ code, msg, ...payload }`。`code == 200` 表示业务成功，
//! 负载字段与 `code` 平铺在同一层。这里把它解析为带标签的 [`ApiResult`]，
//! 调用方必须显式处理失败分支。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 业务成功码
pub const SUCCESS_CODE: i32 = 200;

/// 解析后的业务结果
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    /// `code == 200`，携带负载
    Success(T),
    /// 其他业务码，携带后端给出的提示信息
    Failure { code: i32, msg: String },
}

#[derive(Deserialize)]
struct Header {
    code: i32,
    #[serde(default)]
    msg: Option<String>,
}

impl<T: DeserializeOwned> ApiResult<T> {
    /// 从 JSON 值解析信封
    ///
    /// 只有成功分支才会按 `T` 解析负载；失败分支不要求负载字段存在。
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let header = Header::deserialize(&value)?;
        if header.code == SUCCESS_CODE {
            Ok(ApiResult::Success(T::deserialize(value)?))
        } else {
            Ok(ApiResult::Failure {
                code: header.code,
                msg: header.msg.unwrap_or_default(),
            })
        }
    }

    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }
}

impl<T> ApiResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    /// 业务码：成功时为 200
    pub fn code(&self) -> i32 {
        match self {
            ApiResult::Success(_) => SUCCESS_CODE,
            ApiResult::Failure { code, .. } => *code,
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            ApiResult::Success(payload) => Some(payload),
            ApiResult::Failure { .. } => None,
        }
    }
}

// =========================================================
// 常用负载形状
// =========================================================

/// 无负载的应答（新增、修改、删除、刷新缓存等）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {}

/// `{ data: T }` 形式的负载
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBody<T> {
    pub data: T,
}

/// 分页列表负载 `{ rows, total }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData<T> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for TableData<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }
}
