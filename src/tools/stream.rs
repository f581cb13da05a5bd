//! Stream protocol inspection tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor, VhostArgs, VhostNameArgs};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct VhostStreamArgs {
    vhost: String,
    stream: String,
}

async fn list_stream_connections(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let connections = client.get("/stream/connections").await?;
    Ok(text_result(&connections))
}

async fn list_stream_connections_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let connections = client
        .get(&format!(
            "/stream/connections/{}",
            encode_segment(&args.vhost)
        ))
        .await?;
    Ok(text_result(&connections))
}

async fn get_stream_connection(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let connection = client
        .get(&format!(
            "/stream/connections/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&connection))
}

async fn get_stream_connection_publishers(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let publishers = client
        .get(&format!(
            "/stream/connections/{}/{}/publishers",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&publishers))
}

async fn get_stream_connection_consumers(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let consumers = client
        .get(&format!(
            "/stream/connections/{}/{}/consumers",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&consumers))
}

async fn delete_stream_connection(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/stream/connections/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn list_stream_publishers(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let publishers = client.get("/stream/publishers").await?;
    Ok(text_result(&publishers))
}

async fn list_stream_publishers_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let publishers = client
        .get(&format!(
            "/stream/publishers/{}",
            encode_segment(&args.vhost)
        ))
        .await?;
    Ok(text_result(&publishers))
}

async fn list_stream_publishers_vhost_stream(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostStreamArgs = parse_args(args)?;
    let publishers = client
        .get(&format!(
            "/stream/publishers/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.stream)
        ))
        .await?;
    Ok(text_result(&publishers))
}

async fn list_stream_consumers(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let consumers = client.get("/stream/consumers").await?;
    Ok(text_result(&consumers))
}

async fn list_stream_consumers_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let consumers = client
        .get(&format!("/stream/consumers/{}", encode_segment(&args.vhost)))
        .await?;
    Ok(text_result(&consumers))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-stream-connections",
            "List Stream Connections",
            "List all stream connections in the RabbitMQ cluster.",
            |c, a| Box::pin(list_stream_connections(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-stream-connections-vhost",
            "List Stream Connections (Vhost)",
            "List all stream connections for a given vhost.",
            |c, a| Box::pin(list_stream_connections_vhost(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-stream-connection",
            "Get Stream Connection",
            "Get details for a specific stream connection in a vhost.",
            |c, a| Box::pin(get_stream_connection(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-stream-connection-publishers",
            "Get Stream Connection Publishers",
            "Get all publishers for a specific stream connection in a vhost.",
            |c, a| Box::pin(get_stream_connection_publishers(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-stream-connection-consumers",
            "Get Stream Connection Consumers",
            "Get all consumers for a specific stream connection in a vhost.",
            |c, a| Box::pin(get_stream_connection_consumers(c, a)),
        ),
        ToolDescriptor::write::<VhostNameArgs>(
            "delete-stream-connection",
            "Delete Stream Connection",
            "Delete a specific stream connection in a vhost.",
            |c, a| Box::pin(delete_stream_connection(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "list-stream-publishers",
            "List Stream Publishers",
            "List all stream publishers in the RabbitMQ cluster.",
            |c, a| Box::pin(list_stream_publishers(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-stream-publishers-vhost",
            "List Stream Publishers (Vhost)",
            "List all stream publishers for a given vhost.",
            |c, a| Box::pin(list_stream_publishers_vhost(c, a)),
        ),
        ToolDescriptor::read::<VhostStreamArgs>(
            "list-stream-publishers-vhost-stream",
            "List Stream Publishers (Vhost/Stream)",
            "List all stream publishers for a stream in a vhost.",
            |c, a| Box::pin(list_stream_publishers_vhost_stream(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "list-stream-consumers",
            "List Stream Consumers",
            "List all stream consumers in the RabbitMQ cluster.",
            |c, a| Box::pin(list_stream_consumers(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-stream-consumers-vhost",
            "List Stream Consumers (Vhost)",
            "List all stream consumers for a given vhost.",
            |c, a| Box::pin(list_stream_consumers_vhost(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_eleven_tools() {
        assert_eq!(tools().len(), 11);
    }
}
