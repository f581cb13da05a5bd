//! Binding management tools.
//!
//! The management API addresses a concrete binding by its "props" token, an
//! opaque identifier returned when the binding is listed or created.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor, VhostArgs};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct ExchangeQueueArgs {
    vhost: String,
    exchange: String,
    queue: String,
}

#[derive(Deserialize, JsonSchema)]
struct CreateExchangeQueueArgs {
    vhost: String,
    exchange: String,
    queue: String,
    #[serde(flatten)]
    binding: BindingBody,
}

#[derive(Deserialize, JsonSchema)]
struct DeleteExchangeQueueArgs {
    vhost: String,
    exchange: String,
    queue: String,
    props: String,
}

#[derive(Deserialize, JsonSchema)]
struct ExchangeExchangeArgs {
    vhost: String,
    source: String,
    destination: String,
}

#[derive(Deserialize, JsonSchema)]
struct CreateExchangeExchangeArgs {
    vhost: String,
    source: String,
    destination: String,
    #[serde(flatten)]
    binding: BindingBody,
}

#[derive(Deserialize, JsonSchema)]
struct DeleteExchangeExchangeArgs {
    vhost: String,
    source: String,
    destination: String,
    props: String,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct BindingBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    routing_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments: Option<JsonObject>,
}

async fn list_bindings(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let bindings = client.get("/bindings").await?;
    Ok(text_result(&bindings))
}

async fn list_bindings_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let bindings = client
        .get(&format!("/bindings/{}", encode_segment(&args.vhost)))
        .await?;
    Ok(text_result(&bindings))
}

async fn list_bindings_exchange_queue(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: ExchangeQueueArgs = parse_args(args)?;
    let bindings = client
        .get(&format!(
            "/bindings/{}/e/{}/q/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.exchange),
            encode_segment(&args.queue)
        ))
        .await?;
    Ok(text_result(&bindings))
}

async fn create_binding_exchange_queue(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: CreateExchangeQueueArgs = parse_args(args)?;
    let body = serde_json::to_value(&args.binding)?;
    let result = client
        .post(
            &format!(
                "/bindings/{}/e/{}/q/{}",
                encode_segment(&args.vhost),
                encode_segment(&args.exchange),
                encode_segment(&args.queue)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_binding_exchange_queue(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: DeleteExchangeQueueArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/bindings/{}/e/{}/q/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.exchange),
            encode_segment(&args.queue),
            encode_segment(&args.props)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn list_bindings_exchange_exchange(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: ExchangeExchangeArgs = parse_args(args)?;
    let bindings = client
        .get(&format!(
            "/bindings/{}/e/{}/e/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.source),
            encode_segment(&args.destination)
        ))
        .await?;
    Ok(text_result(&bindings))
}

async fn create_binding_exchange_exchange(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: CreateExchangeExchangeArgs = parse_args(args)?;
    let body = serde_json::to_value(&args.binding)?;
    let result = client
        .post(
            &format!(
                "/bindings/{}/e/{}/e/{}",
                encode_segment(&args.vhost),
                encode_segment(&args.source),
                encode_segment(&args.destination)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_binding_exchange_exchange(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: DeleteExchangeExchangeArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/bindings/{}/e/{}/e/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.source),
            encode_segment(&args.destination),
            encode_segment(&args.props)
        ))
        .await?;
    Ok(text_result(&result))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-bindings",
            "List Bindings",
            "List all bindings in the RabbitMQ cluster.",
            |c, a| Box::pin(list_bindings(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-bindings-vhost",
            "List Bindings (Vhost)",
            "List all bindings for a specific vhost.",
            |c, a| Box::pin(list_bindings_vhost(c, a)),
        ),
        ToolDescriptor::read::<ExchangeQueueArgs>(
            "list-bindings-exchange-queue",
            "List Bindings (Exchange-Queue)",
            "List bindings between an exchange and a queue.",
            |c, a| Box::pin(list_bindings_exchange_queue(c, a)),
        ),
        ToolDescriptor::write::<CreateExchangeQueueArgs>(
            "create-binding-exchange-queue",
            "Create Binding (Exchange-Queue)",
            "Create a binding from an exchange to a queue.",
            |c, a| Box::pin(create_binding_exchange_queue(c, a)),
        ),
        ToolDescriptor::write::<DeleteExchangeQueueArgs>(
            "delete-binding-exchange-queue",
            "Delete Binding (Exchange-Queue)",
            "Delete a binding from an exchange to a queue.",
            |c, a| Box::pin(delete_binding_exchange_queue(c, a)),
        ),
        ToolDescriptor::read::<ExchangeExchangeArgs>(
            "list-bindings-exchange-exchange",
            "List Bindings (Exchange-Exchange)",
            "List bindings between two exchanges.",
            |c, a| Box::pin(list_bindings_exchange_exchange(c, a)),
        ),
        ToolDescriptor::write::<CreateExchangeExchangeArgs>(
            "create-binding-exchange-exchange",
            "Create Binding (Exchange-Exchange)",
            "Create a binding from one exchange to another.",
            |c, a| Box::pin(create_binding_exchange_exchange(c, a)),
        ),
        ToolDescriptor::write::<DeleteExchangeExchangeArgs>(
            "delete-binding-exchange-exchange",
            "Delete Binding (Exchange-Exchange)",
            "Delete a binding from one exchange to another.",
            |c, a| Box::pin(delete_binding_exchange_exchange(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_body_omits_absent_fields() {
        let body: BindingBody = serde_json::from_str("{}").unwrap();
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn module_exposes_eight_tools() {
        assert_eq!(tools().len(), 8);
    }
}
