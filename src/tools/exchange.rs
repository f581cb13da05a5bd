//! Exchange management tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor, VhostArgs, VhostNameArgs};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct PutExchangeArgs {
    vhost: String,
    name: String,
    #[serde(flatten)]
    settings: ExchangeSettings,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct ExchangeSettings {
    /// Exchange type, e.g. direct, fanout, topic, headers.
    #[serde(rename = "type")]
    exchange_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    durable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auto_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    internal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments: Option<JsonObject>,
}

async fn list_exchanges(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let exchanges = client.get("/exchanges").await?;
    Ok(text_result(&exchanges))
}

async fn list_exchanges_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let exchanges = client
        .get(&format!("/exchanges/{}", encode_segment(&args.vhost)))
        .await?;
    Ok(text_result(&exchanges))
}

async fn get_exchange(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let exchange = client
        .get(&format!(
            "/exchanges/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&exchange))
}

async fn put_exchange(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: PutExchangeArgs = parse_args(args)?;
    let body = serde_json::to_value(&args.settings)?;
    let result = client
        .put(
            &format!(
                "/exchanges/{}/{}",
                encode_segment(&args.vhost),
                encode_segment(&args.name)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_exchange(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/exchanges/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn get_exchange_bindings_source(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let bindings = client
        .get(&format!(
            "/exchanges/{}/{}/bindings/source",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&bindings))
}

async fn get_exchange_bindings_destination(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let bindings = client
        .get(&format!(
            "/exchanges/{}/{}/bindings/destination",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&bindings))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-exchanges",
            "List Exchanges",
            "List all exchanges in the RabbitMQ cluster.",
            |c, a| Box::pin(list_exchanges(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-exchanges-vhost",
            "List Exchanges (Vhost)",
            "List all exchanges for a specific vhost.",
            |c, a| Box::pin(list_exchanges_vhost(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-exchange",
            "Get Exchange Details",
            "Get details for a specific exchange.",
            |c, a| Box::pin(get_exchange(c, a)),
        ),
        ToolDescriptor::write::<PutExchangeArgs>(
            "put-exchange",
            "Create or Update Exchange",
            "Create or update an exchange.",
            |c, a| Box::pin(put_exchange(c, a)),
        ),
        ToolDescriptor::write::<VhostNameArgs>(
            "delete-exchange",
            "Delete Exchange",
            "Delete an exchange.",
            |c, a| Box::pin(delete_exchange(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-exchange-bindings-source",
            "List Exchange Bindings (Source)",
            "List bindings from an exchange (source).",
            |c, a| Box::pin(get_exchange_bindings_source(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-exchange-bindings-destination",
            "List Exchange Bindings (Destination)",
            "List bindings to an exchange (destination).",
            |c, a| Box::pin(get_exchange_bindings_destination(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_type_serializes_under_its_wire_name() {
        let settings: ExchangeSettings =
            serde_json::from_str(r#"{"type": "topic", "durable": true}"#).unwrap();
        let body = serde_json::to_value(&settings).unwrap();
        assert_eq!(body["type"], "topic");
        assert_eq!(body["durable"], true);
        assert!(body.get("internal").is_none());
    }

    #[test]
    fn module_exposes_seven_tools() {
        assert_eq!(tools().len(), 7);
    }
}
