//! 接口封装层
//!
//! 每个领域操作映射为 HTTP 方法 + 路径 + 参数。不做重试、缓存与参数校验，
//! 约束全部由后端负责。

use crate::config::ClientConfig;
use crate::error::{AdminError, AdminResult};
use crate::request::{HttpClient, HttpRequest};
use crate::storage::TokenStorage;
use log::debug;
use pureadmin_shared::protocol::{
    AddDictType, ApiRequest, Carrier, DeleteDictType, DictOptionSelect, GetDictType, GetInfo,
    ListDictTypes, ListOperLogs, Login, Logout, RefreshDictCache, UpdateDictType,
};
use pureadmin_shared::{
    Ack, ApiResult, BEARER_PREFIX, DataBody, DictType, DictTypeQuery, HEADER_AUTHORIZATION,
    LoginRequest, LoginResult, OperLog, OperLogQuery, ProfileResult, TableData, Timestamp,
};

#[derive(Clone)]
pub struct AdminApi<C> {
    client: C,
    config: ClientConfig,
    tokens: Option<TokenStorage>,
}

impl<C: HttpClient> AdminApi<C> {
    // 这里接受任何实现了 HttpClient 的客户端
    pub fn new(client: C, config: ClientConfig) -> Self {
        Self {
            client,
            config,
            tokens: None,
        }
    }

    /// 发送请求时从 token 存储读取凭据并附加 `Authorization` 头
    pub fn with_tokens(mut self, tokens: TokenStorage) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build<R: ApiRequest>(&self, req: &R) -> AdminResult<HttpRequest> {
        let path = req.path();
        let mut url = self.config.url(&path);

        if R::CARRIER == Carrier::Query {
            let params = req.query();
            if !params.is_empty() {
                let qs = serde_urlencoded::to_string(&params)
                    .map_err(|e| AdminError::from(e).in_op_with("api.query", &*path))?;
                url.push('?');
                url.push_str(&qs);
            }
        }

        let mut http = HttpRequest::new(&url, R::METHOD);

        if R::CARRIER == Carrier::Body {
            let body = req.body().ok_or_else(|| {
                AdminError::serialization("request body could not be encoded")
                    .in_op_with("api.body", &*path)
            })?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        if let Some(token) = self
            .tokens
            .as_ref()
            .and_then(|t| t.access_token(Timestamp::now()))
        {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("{}{}", BEARER_PREFIX, token));
        }

        Ok(http)
    }

    /// 发送强类型请求并解析响应信封
    pub async fn send<R: ApiRequest>(&self, req: &R) -> AdminResult<ApiResult<R::Response>> {
        let http = self.build(req)?;
        let path = req.path();
        debug!("[Api] {} {}", R::METHOD.as_str(), http.url);

        let resp = self
            .client
            .send(http)
            .await
            .map_err(|e| e.in_op_with("api.send", &*path))?;

        if !resp.ok() {
            return Err(AdminError::http(
                resp.status,
                format!("unexpected HTTP status {}", resp.status),
            )
            .in_op_with("api.send", &*path));
        }

        ApiResult::from_json(&resp.body)
            .map_err(|e| AdminError::from(e).in_op_with("api.decode", &*path))
    }

    // =========================================================
    // 字典类型
    // =========================================================

    /// 查询字典类型列表
    pub async fn list_type(&self, query: &DictTypeQuery) -> AdminResult<ApiResult<TableData<DictType>>> {
        self.send(&ListDictTypes(query)).await
    }

    /// 查询字典类型详细
    pub async fn get_type(&self, dict_id: i64) -> AdminResult<ApiResult<DataBody<DictType>>> {
        self.send(&GetDictType(dict_id)).await
    }

    /// 新增字典类型
    pub async fn add_type(&self, data: &DictType) -> AdminResult<ApiResult<Ack>> {
        self.send(&AddDictType(data)).await
    }

    /// 修改字典类型
    pub async fn update_type(&self, data: &DictType) -> AdminResult<ApiResult<Ack>> {
        self.send(&UpdateDictType(data)).await
    }

    /// 删除字典类型
    pub async fn del_type(&self, dict_id: i64) -> AdminResult<ApiResult<Ack>> {
        self.send(&DeleteDictType(dict_id)).await
    }

    /// 刷新字典缓存
    pub async fn refresh_cache(&self) -> AdminResult<ApiResult<Ack>> {
        self.send(&RefreshDictCache).await
    }

    /// 获取字典选择框列表
    pub async fn optionselect(&self) -> AdminResult<ApiResult<DataBody<Vec<DictType>>>> {
        self.send(&DictOptionSelect).await
    }

    // =========================================================
    // 用户
    // =========================================================

    pub async fn login(&self, credentials: &LoginRequest) -> AdminResult<ApiResult<LoginResult>> {
        self.send(&Login(credentials)).await
    }

    pub async fn get_info(&self) -> AdminResult<ApiResult<ProfileResult>> {
        self.send(&GetInfo).await
    }

    pub async fn logout(&self) -> AdminResult<ApiResult<Ack>> {
        self.send(&Logout).await
    }

    // =========================================================
    // 操作日志
    // =========================================================

    pub async fn list_oper_logs(&self, form: &OperLogQuery) -> AdminResult<ApiResult<TableData<OperLog>>> {
        self.send(&ListOperLogs(form)).await
    }
}
