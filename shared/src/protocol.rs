use crate::{
    Ack, DataBody, DictType, DictTypeQuery, LoginRequest, LoginResult, OperLog, OperLogQuery,
    ProfileResult, TableData,
};
use serde::{Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 请求参数的承载方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carrier {
    /// 仅路径，无参数
    None,
    /// 参数编码到查询串
    Query,
    /// 参数以 JSON 作为请求体
    Body,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// 成功时 (`code == 200`) 的负载类型
    type Response: DeserializeOwned;
    const METHOD: HttpMethod;
    const CARRIER: Carrier;

    /// 相对于 API 根路径的路径
    fn path(&self) -> Cow<'static, str>;

    /// 查询串参数，仅 `Carrier::Query` 时使用
    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// JSON 请求体，仅 `Carrier::Body` 时使用
    fn body(&self) -> Option<serde_json::Value> {
        None
    }
}

fn to_body<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}

// =========================================================
// 字典类型 (system/dict/type)
// =========================================================

/// 查询字典类型列表
pub struct ListDictTypes<'a>(pub &'a DictTypeQuery);

impl ApiRequest for ListDictTypes<'_> {
    type Response = TableData<DictType>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CARRIER: Carrier = Carrier::Query;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("system/dict/type/list")
    }

    fn query(&self) -> Vec<(String, String)> {
        // 借助 JSON 值展开，保持与 serde 重命名一致
        match serde_json::to_value(self.0) {
            Ok(serde_json::Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| match v {
                    serde_json::Value::String(s) => (k, s),
                    other => (k, other.to_string()),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// 查询字典类型详细
pub struct GetDictType(pub i64);

impl ApiRequest for GetDictType {
    type Response = DataBody<DictType>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CARRIER: Carrier = Carrier::None;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("system/dict/type/{}", self.0))
    }
}

/// 新增字典类型
pub struct AddDictType<'a>(pub &'a DictType);

impl ApiRequest for AddDictType<'_> {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const CARRIER: Carrier = Carrier::Body;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("system/dict/type")
    }

    fn body(&self) -> Option<serde_json::Value> {
        to_body(self.0)
    }
}

/// 修改字典类型
pub struct UpdateDictType<'a>(pub &'a DictType);

impl ApiRequest for UpdateDictType<'_> {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const CARRIER: Carrier = Carrier::Body;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("system/dict/type")
    }

    fn body(&self) -> Option<serde_json::Value> {
        to_body(self.0)
    }
}

/// 删除字典类型
pub struct DeleteDictType(pub i64);

impl ApiRequest for DeleteDictType {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const CARRIER: Carrier = Carrier::None;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("system/dict/type/{}", self.0))
    }
}

/// 刷新字典缓存
pub struct RefreshDictCache;

impl ApiRequest for RefreshDictCache {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const CARRIER: Carrier = Carrier::None;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("system/dict/type/refreshCache")
    }
}

/// 获取字典选择框列表
pub struct DictOptionSelect;

impl ApiRequest for DictOptionSelect {
    type Response = DataBody<Vec<DictType>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CARRIER: Carrier = Carrier::None;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("system/dict/type/optionselect")
    }
}

// =========================================================
// 用户 (login / getInfo / logout)
// =========================================================

pub struct Login<'a>(pub &'a LoginRequest);

impl ApiRequest for Login<'_> {
    type Response = LoginResult;
    const METHOD: HttpMethod = HttpMethod::Post;
    const CARRIER: Carrier = Carrier::Body;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("login")
    }

    fn body(&self) -> Option<serde_json::Value> {
        to_body(self.0)
    }
}

pub struct GetInfo;

impl ApiRequest for GetInfo {
    type Response = ProfileResult;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CARRIER: Carrier = Carrier::None;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("getInfo")
    }
}

pub struct Logout;

impl ApiRequest for Logout {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const CARRIER: Carrier = Carrier::None;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("logout")
    }
}

// =========================================================
// 操作日志 (monitor/operlog)
// =========================================================

pub struct ListOperLogs<'a>(pub &'a OperLogQuery);

impl ApiRequest for ListOperLogs<'_> {
    type Response = TableData<OperLog>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CARRIER: Carrier = Carrier::Query;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("monitor/operlog/list")
    }

    fn query(&self) -> Vec<(String, String)> {
        self.0.to_params()
    }
}
