use crate::error::{AdminError, AdminResult};

pub use pureadmin_shared::protocol::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器中的 fetch 返回的 Future 不是 Send 的，因此使用 `?Send`。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// 发送请求。只有传输层失败才返回 `Err`，任何状态码都以响应返回。
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse>;
}

// =========================================================
// 实现层: reqwest 客户端 (Native，测试中同样启用)
// =========================================================

#[cfg(any(test, feature = "native"))]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(any(test, feature = "native"))]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(any(test, feature = "native"))]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            AdminError::transport(format!("Reqwest Error: {}", e)).in_op_with("http.send", &req.url)
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            AdminError::transport(format!("Reqwest Body Error: {}", e))
                .in_op_with("http.body", &req.url)
        })?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试替身: 脚本化的 HTTP 客户端
// =========================================================


#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AdminApi;
    use crate::config::ClientConfig;
    use crate::error::AdminErrorStatus;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 在本地端口上应答一次固定的 JSON，并把收到的原始请求交回测试
    async fn serve_once(body: &'static str) -> (String, tokio::sync::oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&buf[..n]).into_owned());
            let resp = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(resp.as_bytes()).await.unwrap();
        });
        (format!("http://{}", addr), rx)
    }

    #[tokio::test]
    async fn reqwest_client_round_trips_through_admin_api() {
        let (base, received) = serve_once(
            r#"{"code":200,"msg":"操作成功","user":{"avatar":"","userName":"admin","nickName":"管理员"},"roles":["admin"],"permissions":["*:*:*"]}"#,
        )
        .await;
        let config = ClientConfig::from_env().with_base_url(base);
        let api = AdminApi::new(ReqwestHttpClient::new(), config);

        let profile = api.get_info().await.unwrap().success().unwrap();
        assert_eq!(profile.user.user_name, "admin");
        assert_eq!(profile.user.nick_name, "管理员");

        let raw = received.await.unwrap();
        assert!(raw.starts_with("GET /getInfo HTTP/1.1"), "{}", raw);
    }

    #[tokio::test]
    async fn reqwest_client_reports_refused_connection_as_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ReqwestHttpClient::new()
            .send(HttpRequest::new(&format!("http://{}/getInfo", addr), HttpMethod::Get))
            .await
            .unwrap_err();
        assert_eq!(err.status, AdminErrorStatus::Transport);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::new("/dev-api/getInfo", HttpMethod::Get)
            .with_header("Authorization", "Bearer t");
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("X-Missing"), None);
    }

    #[test]
    fn response_ok_range() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let bad = HttpResponse {
            status: 502,
            body: String::new(),
        };
        assert!(ok.ok());
        assert!(!bad.ok());
    }
}
