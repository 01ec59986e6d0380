//! REST client for the Barracuda WAF appliance
//!
//! A thin wrapper around `reqwest`: one login call to obtain a token, then
//! one request per operation. There is no retry and no token refresh.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use serde::Deserialize;
use serde_json::json;

/// Base path of the REST API on the appliance
pub const API_BASE_PATH: &str = "restapi/v3.1";

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors raised by the REST client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Whether the appliance answered 404 Not Found
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// HTTP method of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        write!(f, "{}", s)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Connection settings for one appliance
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub address: String,
    pub port: String,
    pub username: String,
    pub password: String,
}

impl ClientConfig {
    /// `https://{address}:{port}/restapi/v3.1`
    pub fn base_url(&self) -> String {
        format!("https://{}:{}/{}", self.address, self.port, API_BASE_PATH)
    }

    fn check(&self) -> ClientResult<()> {
        if self.address.trim().is_empty() {
            return Err(ClientError::InvalidConfig("address is empty".to_string()));
        }
        if self.port.parse::<u16>().is_err() {
            return Err(ClientError::InvalidConfig(format!(
                "port '{}' is not a valid TCP port",
                self.port
            )));
        }
        if self.username.is_empty() {
            return Err(ClientError::InvalidConfig("username is empty".to_string()));
        }
        Ok(())
    }
}

/// Envelope returned by read calls: `{token, object, data: {id: {field: value}}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ApiResponse {
    /// Decode the envelope; a `null` body yields an empty response
    pub fn from_value(value: serde_json::Value) -> ClientResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Entries of the `data` collection
    pub fn entries(&self) -> impl Iterator<Item = &serde_json::Value> {
        self.data.iter().flat_map(|d| d.values())
    }

    pub fn is_empty(&self) -> bool {
        self.data.as_ref().is_none_or(|d| d.is_empty())
    }
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Turn a non-2xx response into a `ClientError::Api`
///
/// Uses the `msg` field of the error body when it decodes, the raw body otherwise.
pub fn api_error(status: u16, body: &str) -> ClientError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody { msg: Some(msg), .. }) => msg,
        _ => body.trim().to_string(),
    };
    ClientError::Api { status, message }
}

/// `Authorization` header value for a login token
pub fn authorization_header(token: &str) -> String {
    format!("BASIC {}", STANDARD.encode(format!("{}:", token)))
}

/// The API surface used by the resource mappers
#[async_trait]
pub trait WafApi: Send + Sync {
    /// Issue one request against a path relative to the API base
    ///
    /// Returns the decoded JSON body, `Null` when the body is empty.
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ClientResult<serde_json::Value>;

    async fn get(&self, path: &str) -> ClientResult<serde_json::Value> {
        self.call(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> ClientResult<serde_json::Value> {
        self.call(Method::Post, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &serde_json::Value) -> ClientResult<serde_json::Value> {
        self.call(Method::Put, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<serde_json::Value> {
        self.call(Method::Delete, path, None).await
    }
}

/// An authenticated session with one appliance
pub struct Session {
    http: reqwest::Client,
    config: ClientConfig,
    base_url: String,
    token: Option<String>,
}

impl Session {
    /// Build the HTTP client; no request is sent until `login`
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url();
        Self::with_base_url(config, base_url)
    }

    fn with_base_url(config: ClientConfig, base_url: String) -> ClientResult<Self> {
        config.check()?;
        // Appliances ship with self-signed certificates
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            config,
            base_url,
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `POST /login` and keep the returned token
    pub async fn login(&mut self) -> ClientResult<()> {
        let url = self.url("login");
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(&json!({
                "username": self.config.username,
                "password": self.config.password,
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Auth(api_error(status.as_u16(), &body).to_string()));
        }

        let login: LoginResponse = serde_json::from_str(&body)?;
        match login.token {
            Some(token) if !token.is_empty() => {
                self.token = Some(token);
                Ok(())
            }
            _ => Err(ClientError::Auth(
                "login response did not contain a token".to_string(),
            )),
        }
    }
}

#[async_trait]
impl WafApi for Session {
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ClientResult<serde_json::Value> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ClientError::Auth("session is not logged in".to_string()))?;

        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.into(), &url)
            .header(reqwest::header::AUTHORIZATION, authorization_header(token));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config() -> ClientConfig {
        ClientConfig {
            address: "10.0.0.5".to_string(),
            port: "8443".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn base_url_uses_fixed_api_path() {
        assert_eq!(config().base_url(), "https://10.0.0.5:8443/restapi/v3.1");
    }

    #[test]
    fn session_joins_paths() {
        let session = Session::new(config()).unwrap();
        assert_eq!(
            session.url("/services/DemoApp1"),
            "https://10.0.0.5:8443/restapi/v3.1/services/DemoApp1"
        );
        assert_eq!(
            session.url("login"),
            "https://10.0.0.5:8443/restapi/v3.1/login"
        );
        assert!(session.token.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut config = config();
        config.port = "eighty".to_string();
        assert!(matches!(
            Session::new(config),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_address_is_rejected() {
        let mut config = config();
        config.address = " ".to_string();
        assert!(matches!(
            Session::new(config),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn authorization_header_encodes_token_with_colon() {
        // base64("abc:")
        assert_eq!(authorization_header("abc"), "BASIC YWJjOg==");
    }

    #[test]
    fn api_error_prefers_msg_field() {
        let err = api_error(400, r#"{"msg": "Service already exists", "token": "t"}"#);
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Service already exists");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = api_error(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "API error (status 502): Bad Gateway");
        assert!(!err.is_not_found());
        assert!(api_error(404, "").is_not_found());
    }

    #[test]
    fn api_response_decodes_envelope() {
        let response = ApiResponse::from_value(json!({
            "token": "t",
            "object": "Services",
            "data": {"DemoApp1": {"name": "DemoApp1", "port": 90}}
        }))
        .unwrap();
        assert_eq!(response.object.as_deref(), Some("Services"));
        assert!(!response.is_empty());
        assert_eq!(response.entries().count(), 1);
    }

    #[test]
    fn api_response_handles_missing_data() {
        assert!(ApiResponse::from_value(serde_json::Value::Null).unwrap().is_empty());
        assert!(ApiResponse::from_value(json!({"data": {}})).unwrap().is_empty());
        assert!(ApiResponse::from_value(json!({"data": null})).unwrap().is_empty());
    }

    #[tokio::test]
    async fn call_without_login_fails() {
        let session = Session::new(config()).unwrap();
        let err = session.get("services").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(_)));
    }

    // =========================================================================
    // Wire tests against a local HTTP listener
    // =========================================================================

    /// One accepted request: header lines and body
    #[derive(Debug, Clone)]
    struct Received {
        head: String,
        body: String,
    }

    impl Received {
        fn request_line(&self) -> &str {
            self.head.lines().next().unwrap_or_default()
        }

        fn header(&self, name: &str) -> Option<String> {
            self.head.lines().skip(1).find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.eq_ignore_ascii_case(name)
                    .then(|| value.trim().to_string())
            })
        }

        fn json(&self) -> serde_json::Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    /// Answer each connection with the next canned `(status, body)`
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<Mutex<Vec<Received>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let request = read_request(&mut socket).await;
                log.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        (format!("http://{}/{}", addr, API_BASE_PATH), received)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> Received {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            let Some((head, body)) = text.split_once("\r\n\r\n") else {
                continue;
            };
            let received = Received {
                head: head.to_string(),
                body: body.to_string(),
            };
            let length = received
                .header("content-length")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            if body.len() >= length {
                return received;
            }
        }
        panic!("connection closed before a full request arrived");
    }

    async fn logged_in(
        responses: Vec<(u16, &'static str)>,
    ) -> (Session, Arc<Mutex<Vec<Received>>>) {
        let (base_url, received) = serve(responses).await;
        let mut session = Session::with_base_url(config(), base_url).unwrap();
        session.login().await.unwrap();
        (session, received)
    }

    #[tokio::test]
    async fn login_posts_credentials_and_keeps_token() {
        let (session, received) = logged_in(vec![(200, r#"{"token": "abc"}"#)]).await;
        assert_eq!(session.token.as_deref(), Some("abc"));

        let requests = received.lock().unwrap().clone();
        assert_eq!(requests[0].request_line(), "POST /restapi/v3.1/login HTTP/1.1");
        assert_eq!(
            requests[0].json(),
            json!({"username": "admin", "password": "secret"})
        );
        assert_eq!(requests[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn calls_carry_the_token_header_and_body() {
        let (session, received) = logged_in(vec![
            (200, r#"{"token": "abc"}"#),
            (201, r#"{"msg": "Configuration updated", "id": "DemoApp1"}"#),
        ])
        .await;

        let body = session
            .post("services", &json!({"name": "DemoApp1", "port": "90"}))
            .await
            .unwrap();
        assert_eq!(body["id"], json!("DemoApp1"));

        let requests = received.lock().unwrap().clone();
        let call = &requests[1];
        assert_eq!(call.request_line(), "POST /restapi/v3.1/services HTTP/1.1");
        assert_eq!(call.header("authorization").as_deref(), Some("BASIC YWJjOg=="));
        assert_eq!(call.json(), json!({"name": "DemoApp1", "port": "90"}));
    }

    #[tokio::test]
    async fn non_success_status_becomes_api_error() {
        let (session, _) = logged_in(vec![
            (200, r#"{"token": "abc"}"#),
            (409, r#"{"msg": "DemoApp1 already exists", "token": "abc"}"#),
        ])
        .await;

        match session.post("services", &json!({"name": "DemoApp1"})).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "DemoApp1 already exists");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let (session, received) =
            logged_in(vec![(200, r#"{"token": "abc"}"#), (200, "")]).await;

        let body = session.delete("services/DemoApp1").await.unwrap();
        assert!(body.is_null());
        assert_eq!(
            received.lock().unwrap()[1].request_line(),
            "DELETE /restapi/v3.1/services/DemoApp1 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn login_without_token_is_an_auth_error() {
        let (base_url, _) = serve(vec![(200, r#"{"msg": "ok"}"#)]).await;
        let mut session = Session::with_base_url(config(), base_url).unwrap();

        let err = session.login().await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(_)));
        assert!(session.token.is_none());
    }

    #[tokio::test]
    async fn rejected_login_is_an_auth_error() {
        let (base_url, _) = serve(vec![(401, r#"{"msg": "Invalid credentials"}"#)]).await;
        let mut session = Session::with_base_url(config(), base_url).unwrap();

        match session.login().await {
            Err(ClientError::Auth(message)) => assert!(message.contains("Invalid credentials")),
            other => panic!("Expected Auth error, got {:?}", other),
        }
    }
}
