//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现核心库的 `HttpClient`。

use pureadmin::{AdminError, AdminResult, HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// HTTP 错误类型
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("请求构建失败: {0}")]
    RequestBuildFailed(String),
    #[error("网络错误: {0}")]
    NetworkError(String),
    #[error("响应解析失败: {0}")]
    ResponseParseFailed(String),
}

impl From<HttpError> for AdminError {
    fn from(e: HttpError) -> Self {
        let err = match &e {
            HttpError::ResponseParseFailed(_) => AdminError::serialization(e.to_string()),
            _ => AdminError::transport(e.to_string()),
        };
        err.with_source(e)
    }
}

async fn read_text(response: Response) -> Result<String, HttpError> {
    let promise = response
        .text()
        .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

    let text = JsFuture::from(promise)
        .await
        .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

    text.as_string()
        .ok_or_else(|| HttpError::ResponseParseFailed("无法转换为字符串".to_string()))
}

async fn fetch(req: HttpRequest) -> Result<HttpResponse, HttpError> {
    let headers = Headers::new()
        .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Headers 失败: {:?}", e)))?;

    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| HttpError::RequestBuildFailed(format!("设置 Header 失败: {:?}", e)))?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());

    if let Some(body) = &req.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&req.url, &opts)
        .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

    let window = web_sys::window()
        .ok_or_else(|| HttpError::NetworkError("无法获取 window 对象".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

    let response: Response = resp_value.dyn_into().map_err(|e| {
        HttpError::ResponseParseFailed(format!("Response 类型转换失败: {:?}", e))
    })?;

    let status = response.status();
    let body = read_text(response).await?;
    Ok(HttpResponse { status, body })
}

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse> {
        let url = req.url.clone();
        fetch(req)
            .await
            .map_err(|e| AdminError::from(e).in_op_with("fetch", url))
    }
}
