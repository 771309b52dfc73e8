//! OpenClaw Monitor Client
//!
//! A JSON client for the monitor backend's REST API.

use crate::api::MonitorApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::backend::{
    DEFAULT_PASSWORD, DEFAULT_USERNAME, request_timeout,
};
use crate::environment::Environment;
use crate::models::{
    Currency, CurrencyRequest, ExchangeRateRequest, LogEntry, MutationResponse, PricingConfig,
    PricingUpdate, Summary, SystemInfo, TasksResponse, TokenUsageSeries, VersionResponse,
};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("openclaw-dashboard/", env!("CARGO_PKG_VERSION"));

/// Basic auth credentials of the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct MonitorClient {
    client: Client,
    environment: Environment,
    credentials: Credentials,
}

impl MonitorClient {
    pub fn new(environment: Environment, credentials: Credentials) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(request_timeout())
            .timeout(request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
            credentials,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, self.build_url(endpoint))
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    /// Returns the message of a top-level `error` field, if the payload has one.
    fn extract_error(payload: &Value) -> Option<String> {
        match payload.get("error")? {
            Value::Null => None,
            Value::String(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }

    async fn read_json(response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        match serde_json::from_str::<Value>(&body) {
            Ok(payload) => Ok(payload),
            Err(_) if !status.is_success() => Err(ApiError::Http {
                status: status.as_u16(),
                message: body,
            }),
            Err(e) => Err(ApiError::Decode(e)),
        }
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, endpoint).send().await?;
        let status = response.status();
        let payload = Self::read_json(response).await?;

        if let Some(message) = Self::extract_error(&payload) {
            return Err(ApiError::Server(message));
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: payload.to_string(),
            });
        }
        Ok(serde_json::from_value(payload)?)
    }

    /// Sends a mutation. The backend answers with `{success, error?}` even on
    /// client errors, so the body is parsed regardless of status.
    async fn mutation_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<MutationResponse, ApiError> {
        let mut request = self.request(method, endpoint);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let payload = Self::read_json(response).await?;
        Ok(serde_json::from_value(payload)?)
    }
}

#[async_trait::async_trait]
impl MonitorApi for MonitorClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_summary(&self) -> Result<Summary, ApiError> {
        self.get_request("api/summary").await
    }

    async fn get_system(&self) -> Result<SystemInfo, ApiError> {
        self.get_request("api/system").await
    }

    async fn get_version(&self) -> Result<VersionResponse, ApiError> {
        self.get_request("api/version").await
    }

    async fn get_token_usage(&self, days: u32) -> Result<TokenUsageSeries, ApiError> {
        self.get_request(&format!("api/token-usage?days={}", days)).await
    }

    async fn get_tasks(&self) -> Result<TasksResponse, ApiError> {
        self.get_request("api/tasks").await
    }

    async fn get_logs(&self, days: u32) -> Result<Vec<LogEntry>, ApiError> {
        self.get_request(&format!("api/logs?days={}", days)).await
    }

    async fn get_pricing(&self) -> Result<PricingConfig, ApiError> {
        self.get_request("api/pricing").await
    }

    async fn save_pricing(&self, update: &PricingUpdate) -> Result<MutationResponse, ApiError> {
        self.mutation_request(Method::POST, "api/pricing", Some(update))
            .await
    }

    async fn delete_pricing(&self, model: &str) -> Result<MutationResponse, ApiError> {
        let model_path = urlencoding::encode(model).into_owned();
        let endpoint = format!("api/pricing/model/{}", model_path);
        self.mutation_request::<()>(Method::DELETE, &endpoint, None)
            .await
    }

    async fn reset_pricing(&self) -> Result<MutationResponse, ApiError> {
        self.mutation_request::<()>(Method::POST, "api/pricing/reset", None)
            .await
    }

    async fn set_currency(&self, currency: Currency) -> Result<MutationResponse, ApiError> {
        let request = CurrencyRequest {
            currency: currency.to_string(),
        };
        self.mutation_request(Method::PUT, "api/pricing/currency", Some(&request))
            .await
    }

    async fn update_exchange_rate(
        &self,
        rate: Option<f64>,
    ) -> Result<MutationResponse, ApiError> {
        let request = ExchangeRateRequest { rate };
        self.mutation_request(Method::POST, "api/pricing/exchange-rate", Some(&request))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned HTTP response and hands back the raw request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let request = String::from_utf8_lossy(&raw).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            request
        });
        (base_url, handle)
    }

    fn client_for(base_url: String) -> MonitorClient {
        MonitorClient::new(Environment::Custom { base_url }, Credentials::default()).unwrap()
    }

    #[test]
    fn test_extract_error() {
        let payload: Value = serde_json::json!({"error": "db locked"});
        assert_eq!(
            MonitorClient::extract_error(&payload),
            Some("db locked".to_string())
        );
        let payload: Value = serde_json::json!({"error": null, "running": 1});
        assert_eq!(MonitorClient::extract_error(&payload), None);
        let payload: Value = serde_json::json!([{"error": "not top level"}]);
        assert_eq!(MonitorClient::extract_error(&payload), None);
    }

    #[tokio::test]
    /// Should send basic auth and decode a successful payload.
    async fn test_get_tasks_sends_credentials() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"running": 1, "completed_24h": 4, "tasks": []}"#).await;
        let tasks = client_for(base_url).get_tasks().await.unwrap();
        assert_eq!(tasks.running, 1);
        assert_eq!(tasks.completed_24h, 4);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/tasks "));
        // admin:admin123
        assert!(request.contains("YWRtaW46YWRtaW4xMjM="));
    }

    #[tokio::test]
    /// A top-level error field should abort decoding.
    async fn test_error_field_becomes_server_error() {
        let (base_url, _server) =
            serve_once("500 INTERNAL SERVER ERROR", r#"{"error": "collector crashed"}"#).await;
        match client_for(base_url).get_summary().await {
            Err(ApiError::Server(message)) => assert_eq!(message, "collector crashed"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    /// Model names should be percent-encoded in the delete path.
    async fn test_delete_encodes_model_name() {
        let (base_url, server) = serve_once("200 OK", r#"{"success": true}"#).await;
        let result = client_for(base_url)
            .delete_pricing("moonshot/kimi k2")
            .await
            .unwrap();
        assert!(result.success);

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /api/pricing/model/moonshot%2Fkimi%20k2 "));
    }

    #[tokio::test]
    /// Mutation error bodies should be decoded even with a 400 status.
    async fn test_mutation_failure_body_is_decoded() {
        let (base_url, _server) = serve_once(
            "400 BAD REQUEST",
            r#"{"success": false, "error": "Invalid currency"}"#,
        )
        .await;
        let result = client_for(base_url)
            .set_currency(Currency::Usd)
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Invalid currency"));
    }
}
