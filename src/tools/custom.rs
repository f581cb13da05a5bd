//! Universal pass-through tool.
//!
//! The one deliberately open-ended tool: any management API path, any method,
//! any body. Unlike the typed tools, failures are reported as a structured
//! JSON payload (success flag, status code, remediation hint) so agents can
//! reason about what went wrong without parsing error prose.

use std::sync::Arc;
use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{parse_args, JsonObject, ToolDescriptor};
use crate::client::ManagementClient;
use crate::types::{Error, Result};

fn default_content_type() -> String {
    "application/json".to_string()
}

#[derive(Deserialize, JsonSchema)]
struct CustomApiArgs {
    /// RabbitMQ HTTP API path, e.g. /queues, /exchanges/my-vhost/my-exchange
    path: String,
    /// HTTP method: GET (query), POST (create), PUT (update), DELETE (delete)
    #[serde(default)]
    method: HttpMethod,
    /// Request body data (JSON object), used for POST and PUT requests
    #[serde(default)]
    body: Option<Value>,
    /// Query parameters object, automatically URL-encoded
    #[serde(default)]
    query: Option<JsonObject>,
    /// Request content type, defaults to application/json
    #[serde(rename = "contentType", default = "default_content_type")]
    content_type: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
enum HttpMethod {
    #[default]
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "DELETE")]
    Delete,
}

impl HttpMethod {
    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Render a query value the way it would appear in a URL: strings as-is,
/// everything else via its JSON form.
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

async fn custom_api(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: CustomApiArgs = parse_args(args)?;

    if args.path.is_empty() {
        return Err(Error::validation("API path cannot be empty"));
    }
    if !args.path.starts_with('/') {
        return Err(Error::validation("API path must start with /"));
    }

    // Append encoded query parameters to the reported path
    let mut api_path = args.path.clone();
    if let Some(query) = &args.query {
        let pairs: Vec<String> = query
            .iter()
            .filter_map(|(key, value)| {
                query_value(value).map(|v| {
                    format!(
                        "{}={}",
                        urlencoding::encode(key),
                        urlencoding::encode(&v)
                    )
                })
            })
            .collect();
        if !pairs.is_empty() {
            api_path.push('?');
            api_path.push_str(&pairs.join("&"));
        }
    }

    // Bodies only travel on POST and PUT
    let body = match args.method {
        HttpMethod::Post | HttpMethod::Put => args.body.as_ref(),
        _ => None,
    };

    let outcome = client
        .request_with(
            args.method.as_reqwest(),
            &api_path,
            &[],
            body,
            Some(&args.content_type),
            None,
        )
        .await;

    match outcome {
        Ok(result) => {
            let payload = json!({
                "success": true,
                "method": args.method.as_str(),
                "path": api_path,
                "result": result,
            });
            let text =
                serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(err) => {
            let payload = json!({
                "success": false,
                "error": err.to_string(),
                "statusCode": err.status(),
                "method": args.method.as_str(),
                "path": args.path,
                "hint": "Please check API path, parameters, and permissions",
            });
            let text =
                serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
            Ok(CallToolResult::error(vec![Content::text(text)]))
        }
    }
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![ToolDescriptor::write::<CustomApiArgs>(
        "rabbitmq-custom-api",
        "RabbitMQ Custom API",
        "Universal RabbitMQ HTTP API tool for calling any RabbitMQ HTTP API endpoint",
        |c, a| Box::pin(custom_api(c, a)),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Protocol, RabbitConfig};
    use httpmock::prelude::*;

    fn test_client(server: &MockServer) -> Arc<ManagementClient> {
        Arc::new(
            ManagementClient::new(RabbitConfig {
                host: server.host(),
                port: server.port(),
                protocol: Protocol::Http,
                ..RabbitConfig::default()
            })
            .unwrap(),
        )
    }

    fn run(client: &Arc<ManagementClient>, args: Value) -> CallToolResult {
        let Value::Object(map) = args else {
            panic!("args must be an object")
        };
        tokio_test::block_on(custom_api(client.clone(), map)).unwrap()
    }

    fn payload(result: &CallToolResult) -> Value {
        let text = result.content[0].as_text().unwrap().text.clone();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn success_wraps_result_with_method_and_path() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/overview");
            then.status(200).json_body(json!({"rabbitmq_version": "4.0"}));
        });

        let client = test_client(&server);
        let result = run(&client, json!({"path": "/overview"}));
        let payload = payload(&result);

        assert_eq!(payload["success"], true);
        assert_eq!(payload["method"], "GET");
        assert_eq!(payload["path"], "/overview");
        assert_eq!(payload["result"]["rabbitmq_version"], "4.0");
    }

    #[test]
    fn query_parameters_are_encoded_into_the_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/queues")
                .query_param("page", "1")
                .query_param("name", "my queue");
            then.status(200).json_body(json!([]));
        });

        let client = test_client(&server);
        let result = run(
            &client,
            json!({"path": "/queues", "query": {"page": 1, "name": "my queue"}}),
        );

        mock.assert();
        let payload = payload(&result);
        assert_eq!(payload["success"], true);
        let path = payload["path"].as_str().unwrap();
        assert!(path.starts_with("/queues?"), "got: {path}");
    }

    #[test]
    fn api_failure_returns_structured_error_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/not-there");
            then.status(404).body("Object Not Found");
        });

        let client = test_client(&server);
        let result = run(&client, json!({"path": "/not-there"}));
        assert_eq!(result.is_error, Some(true));

        let payload = payload(&result);
        assert_eq!(payload["success"], false);
        assert_eq!(payload["statusCode"], 404);
        assert_eq!(payload["path"], "/not-there");
        assert!(payload["error"].as_str().unwrap().contains("HTTP 404"));
    }

    #[test]
    fn body_is_dropped_for_get_requests() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/overview").body("");
            then.status(200).json_body(json!({}));
        });

        let client = test_client(&server);
        run(
            &client,
            json!({"path": "/overview", "body": {"ignored": true}}),
        );
        mock.assert();
    }

    #[test]
    fn bad_path_is_a_validation_error() {
        let server = MockServer::start();
        let client = test_client(&server);
        let Value::Object(map) = json!({"path": "queues"}) else {
            unreachable!()
        };
        let err = tokio_test::block_on(custom_api(client, map)).unwrap_err();
        assert!(err.to_string().contains("must start with /"));
    }
}
