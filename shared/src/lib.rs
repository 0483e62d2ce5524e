use serde::{Deserialize, Serialize};

pub mod date;
pub mod envelope;
pub mod protocol;
pub mod serde_helper;

pub use date::Timestamp;
pub use envelope::{Ack, ApiResult, DataBody, SUCCESS_CODE, TableData};

use serde_helper::null_as_default;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 本地存储中 token 记录的键名
pub const USER_KEY: &str = "user-info";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";
/// 登录 token 固定有效期（毫秒）
pub const TOKEN_TTL_MS: i64 = 3600 * 1000;
/// 登录页“免登录”默认天数
pub const DEFAULT_LOGIN_DAY: u32 = 7;
/// 拥有此权限标识视为拥有全部权限
pub const ALL_PERMISSION: &str = "*:*:*";

// =========================================================
// 用户与认证 (User & Auth)
// =========================================================

/// 登录凭据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// 验证码（后端关闭验证码时可为空）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// 登录接口成功时的负载
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
}

/// 用户展示信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nick_name: String,
}

/// 获取用户信息接口成功时的负载
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileResult {
    pub user: UserProfile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
}

/// 持久化在本地存储中的 token 记录
///
/// 同时缓存了用户的展示信息与权限，页面刷新后据此恢复会话。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub access_token: String,
    pub expires: Timestamp,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nick_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
}

impl TokenRecord {
    /// 仅包含凭据、不含用户信息的记录（登录成功后写入）
    pub fn credentials(access_token: impl Into<String>, expires: Timestamp) -> Self {
        Self {
            access_token: access_token.into(),
            expires,
            ..Default::default()
        }
    }

    /// 保留凭据字段，采用新的用户信息
    pub fn with_profile(&self, profile: &ProfileResult) -> Self {
        Self {
            access_token: self.access_token.clone(),
            expires: self.expires,
            avatar: profile.user.avatar.clone(),
            user_name: profile.user.user_name.clone(),
            nick_name: profile.user.nick_name.clone(),
            roles: profile.roles.clone(),
            permissions: profile.permissions.clone(),
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires <= now
    }
}

// =========================================================
// 字典类型 (Dictionary Types)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dict_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dict_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dict_type: String,
    /// "0" 正常, "1" 停用
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

/// 字典类型列表查询条件，`None` 的字段不会出现在查询串中
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictTypeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "params[beginTime]", skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<String>,
    #[serde(rename = "params[endTime]", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

// =========================================================
// 操作日志 (Operation Logs)
// =========================================================

/// 一条操作日志
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperLog {
    pub oper_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub business_type: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub oper_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub oper_ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oper_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oper_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,
    /// 1 成功, 其余失败
    #[serde(default)]
    pub status: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oper_time: Option<String>,
    #[serde(default)]
    pub cost_time: i64,
}

/// 操作日志筛选表单
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperLogQuery {
    pub oper_ip: String,
    pub title: String,
    pub oper_name: String,
    pub business_type: String,
    pub status: String,
    /// 为空或恰好两项：[开始, 结束]
    pub date_range: Vec<String>,
}

impl OperLogQuery {
    /// 转换为查询串参数：空字段省略，日期范围展开为 `params[beginTime]` / `params[endTime]`
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let fields = [
            ("operIp", &self.oper_ip),
            ("title", &self.title),
            ("operName", &self.oper_name),
            ("businessType", &self.business_type),
            ("status", &self.status),
        ];
        for (key, value) in fields {
            if !value.is_empty() {
                params.push((key.to_string(), value.clone()));
            }
        }
        if let [begin, end] = self.date_range.as_slice() {
            params.push(("params[beginTime]".to_string(), begin.clone()));
            params.push(("params[endTime]".to_string(), end.clone()));
        }
        params
    }
}
