//! Consumer inspection tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor, VhostArgs};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct QueueConsumersArgs {
    vhost: String,
    queue: String,
}

async fn list_consumers(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let consumers = client.get("/consumers").await?;
    Ok(text_result(&consumers))
}

async fn list_consumers_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let consumers = client
        .get(&format!("/consumers/{}", encode_segment(&args.vhost)))
        .await?;
    Ok(text_result(&consumers))
}

async fn list_consumers_queue(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: QueueConsumersArgs = parse_args(args)?;
    let consumers = client
        .get(&format!(
            "/queues/{}/{}/consumers",
            encode_segment(&args.vhost),
            encode_segment(&args.queue)
        ))
        .await?;
    Ok(text_result(&consumers))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-consumers",
            "List Consumers",
            "List all consumers in the RabbitMQ cluster.",
            |c, a| Box::pin(list_consumers(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-consumers-vhost",
            "List Consumers (Vhost)",
            "List all consumers for a specific vhost.",
            |c, a| Box::pin(list_consumers_vhost(c, a)),
        ),
        ToolDescriptor::read::<QueueConsumersArgs>(
            "list-consumers-queue",
            "List Consumers (Queue)",
            "List all consumers for a specific queue.",
            |c, a| Box::pin(list_consumers_queue(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_three_tools() {
        assert_eq!(tools().len(), 3);
    }
}
