//! HTTP adapter for the RabbitMQ management API.
//!
//! A thin authenticated wrapper around one `reqwest::Client`. Every tool
//! handler funnels through [`ManagementClient::request`]: build the URL,
//! attach Basic auth, serialize the body, and hand back the parsed JSON
//! response. Non-2xx responses become [`Error::Api`] carrying the status and
//! raw body.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::borrow::Cow;

use crate::types::{Error, RabbitConfig, Result};

/// Percent-encode one path segment. Vhost names such as `/` (the default
/// vhost) must travel as `%2F` inside management URLs.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Authenticated client for the management endpoint. Cheap to clone via
/// `Arc`; the inner reqwest client pools connections.
#[derive(Debug)]
pub struct ManagementClient {
    http: reqwest::Client,
    config: RabbitConfig,
}

impl ManagementClient {
    /// Build the client from a loaded configuration. TLS identity and the
    /// request deadline are fixed here for the process lifetime.
    pub fn new(config: RabbitConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(config.request_timeout);

        if let Some(identity) = &config.tls_identity {
            // reqwest wants key and cert in a single PEM buffer
            let mut pem = identity.key_pem.clone().into_bytes();
            pem.extend_from_slice(identity.cert_pem.as_bytes());
            builder = builder.identity(reqwest::Identity::from_pem(&pem)?);
        }

        if !config.tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &RabbitConfig {
        &self.config
    }

    /// Issue one request against `{base_url}{endpoint}` and return the
    /// response as JSON, falling back to the raw text for empty or non-JSON
    /// success bodies (deletes answer 204 with no content).
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        self.request_with(method, endpoint, query, body, None, None)
            .await
    }

    /// Full-control variant used by the custom-API tool and the connection
    /// tools: optional non-JSON content type, optional `X-Reason` header.
    pub async fn request_with(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        content_type: Option<&str>,
        reason: Option<&str>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url(), endpoint);
        tracing::debug!(%method, %url, "management API request");

        let mut req = self
            .http
            .request(method, &url)
            .basic_auth(&self.config.username, Some(&self.config.password));

        if !query.is_empty() {
            req = req.query(query);
        }

        if let Some(body) = body {
            match content_type {
                Some(ct) if ct != "application/json" => {
                    let raw = match body {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    req = req.header(CONTENT_TYPE, ct).body(raw);
                }
                _ => {
                    req = req.json(body);
                }
            }
        }

        if let Some(reason) = reason {
            req = req.header("X-Reason", reason);
        }

        let res = req.send().await?;
        let status = res.status();
        let text = res.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        } else {
            Err(Error::api(status.as_u16(), text))
        }
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::GET, endpoint, &[], None).await
    }

    pub async fn post(&self, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::POST, endpoint, &[], body).await
    }

    pub async fn put(&self, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::PUT, endpoint, &[], body).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::DELETE, endpoint, &[], None).await
    }

    /// DELETE with an optional `X-Reason` header, which the management API
    /// records as the close reason for connections.
    pub async fn delete_with_reason(&self, endpoint: &str, reason: Option<&str>) -> Result<Value> {
        self.request_with(Method::DELETE, endpoint, &[], None, None, reason)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Protocol;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_config(server: &MockServer) -> RabbitConfig {
        RabbitConfig {
            host: server.host(),
            port: server.port(),
            protocol: Protocol::Http,
            ..RabbitConfig::default()
        }
    }

    #[test]
    fn encode_segment_escapes_default_vhost() {
        assert_eq!(encode_segment("/"), "%2F");
        assert_eq!(encode_segment("my-vhost"), "my-vhost");
        assert_eq!(encode_segment("a b"), "a%20b");
    }

    #[tokio::test]
    async fn get_sends_basic_auth_and_parses_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/queues")
                    .header("authorization", "Basic Z3Vlc3Q6Z3Vlc3Q=")
                    .header("accept", "application/json");
                then.status(200).json_body(json!([{"name": "orders"}]));
            })
            .await;

        let client = ManagementClient::new(test_config(&server)).unwrap();
        let value = client.get("/queues").await.unwrap();

        mock.assert_async().await;
        assert_eq!(value[0]["name"], "orders");
    }

    #[tokio::test]
    async fn empty_success_body_falls_back_to_raw_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/queues/%2F/orders");
                then.status(204);
            })
            .await;

        let client = ManagementClient::new(test_config(&server)).unwrap();
        let value = client.delete("/queues/%2F/orders").await.unwrap();
        assert_eq!(value, Value::String(String::new()));
    }

    #[tokio::test]
    async fn non_2xx_becomes_api_error_with_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/queues/%2F/missing");
                then.status(404).body("{\"error\":\"Object Not Found\"}");
            })
            .await;

        let client = ManagementClient::new(test_config(&server)).unwrap();
        let err = client.get("/queues/%2F/missing").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        let rendered = err.to_string();
        assert!(rendered.starts_with("HTTP 404: "), "got: {rendered}");
        assert!(rendered.contains("Object Not Found"));
    }

    #[tokio::test]
    async fn put_serializes_json_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/queues/dev/orders")
                    .header("content-type", "application/json")
                    .json_body(json!({"durable": true, "auto_delete": false}));
                then.status(201);
            })
            .await;

        let client = ManagementClient::new(test_config(&server)).unwrap();
        client
            .put(
                "/queues/dev/orders",
                Some(&json!({"durable": true, "auto_delete": false})),
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_with_reason_sets_header() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/api/connections/conn-1")
                    .header("x-reason", "maintenance window");
                then.status(204);
            })
            .await;

        let client = ManagementClient::new(test_config(&server)).unwrap();
        client
            .delete_with_reason("/connections/conn-1", Some("maintenance window"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn query_parameters_are_appended() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/queues")
                    .query_param("page", "1")
                    .query_param("page_size", "50");
                then.status(200).json_body(json!([]));
            })
            .await;

        let client = ManagementClient::new(test_config(&server)).unwrap();
        client
            .request(
                Method::GET,
                "/queues",
                &[
                    ("page".to_string(), "1".to_string()),
                    ("page_size".to_string(), "50".to_string()),
                ],
                None,
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
