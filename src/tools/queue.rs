//! Queue management tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor, VhostArgs, VhostNameArgs};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

fn default_count() -> u32 {
    1
}

fn default_durable() -> bool {
    true
}

#[derive(Deserialize, JsonSchema)]
struct PutQueueArgs {
    vhost: String,
    name: String,
    #[serde(flatten)]
    settings: QueueSettings,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct QueueSettings {
    #[serde(default = "default_durable")]
    durable: bool,
    #[serde(default)]
    auto_delete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments: Option<JsonObject>,
}

#[derive(Deserialize, JsonSchema)]
struct GetMessagesArgs {
    vhost: String,
    name: String,
    #[serde(flatten)]
    options: GetMessagesOptions,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct GetMessagesOptions {
    #[serde(default = "default_count")]
    count: u32,
    #[serde(default)]
    ackmode: AckMode,
    #[serde(default)]
    encoding: Encoding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    truncate: Option<String>,
    #[serde(default)]
    requeue: bool,
}

#[derive(Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum AckMode {
    #[default]
    Get,
    RejectRequeueTrue,
}

#[derive(Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum Encoding {
    #[default]
    Auto,
    Base64,
}

async fn list_queues(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let queues = client.get("/queues").await?;
    Ok(text_result(&queues))
}

async fn list_queues_vhost(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let queues = client
        .get(&format!("/queues/{}", encode_segment(&args.vhost)))
        .await?;
    Ok(text_result(&queues))
}

async fn get_queue(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let queue = client
        .get(&format!(
            "/queues/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&queue))
}

async fn put_queue(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: PutQueueArgs = parse_args(args)?;
    let body = serde_json::to_value(&args.settings)?;
    let result = client
        .put(
            &format!(
                "/queues/{}/{}",
                encode_segment(&args.vhost),
                encode_segment(&args.name)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_queue(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/queues/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn purge_queue(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/queues/{}/{}/contents",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn get_queue_messages(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: GetMessagesArgs = parse_args(args)?;
    let body = serde_json::to_value(&args.options)?;
    let messages = client
        .post(
            &format!(
                "/queues/{}/{}/get",
                encode_segment(&args.vhost),
                encode_segment(&args.name)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&messages))
}

async fn get_queue_bindings(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let bindings = client
        .get(&format!(
            "/queues/{}/{}/bindings",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&bindings))
}

async fn get_queue_unacked(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let unacked = client
        .get(&format!(
            "/queues/{}/{}/unacked",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&unacked))
}

async fn pause_queue(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let result = client
        .put(
            &format!(
                "/queues/{}/{}/pause",
                encode_segment(&args.vhost),
                encode_segment(&args.name)
            ),
            None,
        )
        .await?;
    Ok(text_result(&result))
}

async fn resume_queue(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let result = client
        .put(
            &format!(
                "/queues/{}/{}/resume",
                encode_segment(&args.vhost),
                encode_segment(&args.name)
            ),
            None,
        )
        .await?;
    Ok(text_result(&result))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-queues",
            "List Queues",
            "List all queues across all known vhosts",
            |c, a| Box::pin(list_queues(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-queues-vhost",
            "List Queues (Vhost)",
            "List queues for a specific vhost",
            |c, a| Box::pin(list_queues_vhost(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-queue",
            "Get Queue Details",
            "Get details for a specific queue",
            |c, a| Box::pin(get_queue(c, a)),
        ),
        ToolDescriptor::write::<PutQueueArgs>(
            "put-queue",
            "Create or Update Queue",
            "Create or update a queue",
            |c, a| Box::pin(put_queue(c, a)),
        ),
        ToolDescriptor::write::<VhostNameArgs>(
            "delete-queue",
            "Delete Queue",
            "Delete a queue",
            |c, a| Box::pin(delete_queue(c, a)),
        ),
        ToolDescriptor::write::<VhostNameArgs>(
            "purge-queue",
            "Purge Queue",
            "Purge a queue",
            |c, a| Box::pin(purge_queue(c, a)),
        ),
        ToolDescriptor::read::<GetMessagesArgs>(
            "get-queue-messages",
            "Get Queue Messages",
            "Get messages from a queue",
            |c, a| Box::pin(get_queue_messages(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-queue-bindings",
            "List Queue Bindings",
            "List queue bindings",
            |c, a| Box::pin(get_queue_bindings(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-queue-unacked",
            "List Unacked Messages",
            "List unacked messages for a queue",
            |c, a| Box::pin(get_queue_unacked(c, a)),
        ),
        ToolDescriptor::write::<VhostNameArgs>(
            "pause-queue",
            "Pause Queue",
            "Pause a queue",
            |c, a| Box::pin(pause_queue(c, a)),
        ),
        ToolDescriptor::write::<VhostNameArgs>(
            "resume-queue",
            "Resume Queue",
            "Resume a queue",
            |c, a| Box::pin(resume_queue(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_options_default_like_the_api() {
        let options: GetMessagesOptions = serde_json::from_str("{}").unwrap();
        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(body["count"], 1);
        assert_eq!(body["ackmode"], "get");
        assert_eq!(body["encoding"], "auto");
        assert_eq!(body["requeue"], false);
        assert!(body.get("truncate").is_none());
    }

    #[test]
    fn queue_settings_default_to_durable() {
        let settings: QueueSettings = serde_json::from_str("{}").unwrap();
        let body = serde_json::to_value(&settings).unwrap();
        assert_eq!(body["durable"], true);
        assert_eq!(body["auto_delete"], false);
    }

    #[test]
    fn module_exposes_eleven_tools() {
        assert_eq!(tools().len(), 11);
    }
}
