//! End-to-end tool invocations against a mock management API — validates
//! dispatch → path templating → HTTP round-trip → response rendering.

use std::sync::Arc;

use httpmock::prelude::*;
use rabbitmq_mcp::tools::{catalog, filter_tools, JsonObject, Mode};
use rabbitmq_mcp::types::{Protocol, RabbitConfig};
use rabbitmq_mcp::{ManagementClient, McpToolServer};
use serde_json::{json, Value};

fn mcp_server(mock: &MockServer, mode: Mode) -> McpToolServer {
    let config = RabbitConfig {
        host: mock.host(),
        port: mock.port(),
        protocol: Protocol::Http,
        ..RabbitConfig::default()
    };
    let client = ManagementClient::new(config).unwrap();
    McpToolServer::new(Arc::new(client), filter_tools(&catalog(), mode))
}

fn args(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        _ => panic!("arguments must be an object"),
    }
}

fn result_text(result: &rmcp::model::CallToolResult) -> String {
    result.content[0].as_text().unwrap().text.clone()
}

#[tokio::test]
async fn get_queue_encodes_the_default_vhost() {
    let mock = MockServer::start_async().await;
    let endpoint = mock
        .mock_async(|when, then| {
            when.method(GET).path("/api/queues/%2F/orders");
            then.status(200)
                .json_body(json!({"name": "orders", "messages": 3}));
        })
        .await;

    let server = mcp_server(&mock, Mode::Full);
    let result = server
        .dispatch("get-queue", args(json!({"vhost": "/", "name": "orders"})))
        .await
        .unwrap();

    endpoint.assert_async().await;
    assert!(result_text(&result).contains("\"messages\": 3"));
}

#[tokio::test]
async fn put_queue_sends_defaulted_settings() {
    let mock = MockServer::start_async().await;
    let endpoint = mock
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/queues/dev/orders")
                .json_body(json!({"durable": true, "auto_delete": false}));
            then.status(201);
        })
        .await;

    let server = mcp_server(&mock, Mode::Full);
    server
        .dispatch("put-queue", args(json!({"vhost": "dev", "name": "orders"})))
        .await
        .unwrap();
    endpoint.assert_async().await;
}

#[tokio::test]
async fn get_queue_messages_posts_ack_options() {
    let mock = MockServer::start_async().await;
    let endpoint = mock
        .mock_async(|when, then| {
            when.method(POST).path("/api/queues/dev/orders/get").json_body(json!({
                "count": 5,
                "ackmode": "get",
                "encoding": "auto",
                "requeue": false,
            }));
            then.status(200).json_body(json!([]));
        })
        .await;

    let server = mcp_server(&mock, Mode::Full);
    server
        .dispatch(
            "get-queue-messages",
            args(json!({"vhost": "dev", "name": "orders", "count": 5})),
        )
        .await
        .unwrap();
    endpoint.assert_async().await;
}

#[tokio::test]
async fn delete_connection_forwards_the_reason_header() {
    let mock = MockServer::start_async().await;
    let endpoint = mock
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/connections/127.0.0.1%3A5672")
                .header("x-reason", "rolling restart");
            then.status(204);
        })
        .await;

    let server = mcp_server(&mock, Mode::Full);
    server
        .dispatch(
            "delete-connection",
            args(json!({"name": "127.0.0.1:5672", "reason": "rolling restart"})),
        )
        .await
        .unwrap();
    endpoint.assert_async().await;
}

#[tokio::test]
async fn invalid_arguments_do_not_reach_the_network() {
    let mock = MockServer::start_async().await;
    let server = mcp_server(&mock, Mode::Full);

    let result = server
        .dispatch("get-queue", args(json!({"vhost": 42})))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("invalid arguments"));
}

#[tokio::test]
async fn lite_server_rejects_filtered_out_tools() {
    let mock = MockServer::start_async().await;
    let server = mcp_server(&mock, Mode::Lite);

    // list-nodes is only registered in full mode
    let err = server
        .dispatch("list-nodes", JsonObject::new())
        .await
        .unwrap_err();
    assert!(err.message.contains("unknown tool"));
}

#[tokio::test]
async fn custom_api_round_trips_through_lite_mode() {
    let mock = MockServer::start_async().await;
    let endpoint = mock
        .mock_async(|when, then| {
            when.method(GET).path("/api/overview");
            then.status(200).json_body(json!({"cluster_name": "rabbit@dev"}));
        })
        .await;

    let server = mcp_server(&mock, Mode::Lite);
    let result = server
        .dispatch("rabbitmq-custom-api", args(json!({"path": "/overview"})))
        .await
        .unwrap();

    endpoint.assert_async().await;
    let payload: Value = serde_json::from_str(&result_text(&result)).unwrap();
    assert_eq!(payload["success"], true);
    assert_eq!(payload["result"]["cluster_name"], "rabbit@dev");
}
