//! Connection management tools.
//!
//! Closing a connection accepts an optional reason, forwarded as the
//! `X-Reason` header so the broker logs it as the close cause.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{parse_args, text_result, JsonObject, NameArgs, NoArgs, ToolDescriptor, VhostArgs};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct CloseConnectionArgs {
    name: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
struct UsernameArgs {
    username: String,
}

#[derive(Deserialize, JsonSchema)]
struct CloseUsernameArgs {
    username: String,
    #[serde(default)]
    reason: Option<String>,
}

async fn list_connections(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let connections = client.get("/connections").await?;
    Ok(text_result(&connections))
}

async fn get_connection(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let connection = client
        .get(&format!("/connections/{}", encode_segment(&args.name)))
        .await?;
    Ok(text_result(&connection))
}

async fn delete_connection(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: CloseConnectionArgs = parse_args(args)?;
    let result = client
        .delete_with_reason(
            &format!("/connections/{}", encode_segment(&args.name)),
            args.reason.as_deref(),
        )
        .await?;
    Ok(text_result(&result))
}

async fn list_connections_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let connections = client
        .get(&format!(
            "/vhosts/{}/connections",
            encode_segment(&args.vhost)
        ))
        .await?;
    Ok(text_result(&connections))
}

async fn list_connections_username(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: UsernameArgs = parse_args(args)?;
    let connections = client
        .get(&format!(
            "/connections/username/{}",
            encode_segment(&args.username)
        ))
        .await?;
    Ok(text_result(&connections))
}

async fn delete_connections_username(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: CloseUsernameArgs = parse_args(args)?;
    let result = client
        .delete_with_reason(
            &format!("/connections/username/{}", encode_segment(&args.username)),
            args.reason.as_deref(),
        )
        .await?;
    Ok(text_result(&result))
}

async fn get_connection_channels(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let channels = client
        .get(&format!(
            "/connections/{}/channels",
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&channels))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-connections",
            "List Connections",
            "List all open connections.",
            |c, a| Box::pin(list_connections(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-connection",
            "Get Connection Details",
            "Get details for a specific connection.",
            |c, a| Box::pin(get_connection(c, a)),
        ),
        ToolDescriptor::write::<CloseConnectionArgs>(
            "delete-connection",
            "Delete Connection",
            "Close a specific connection.",
            |c, a| Box::pin(delete_connection(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-connections-vhost",
            "List Connections (Vhost)",
            "List all open connections in a specific virtual host.",
            |c, a| Box::pin(list_connections_vhost(c, a)),
        ),
        ToolDescriptor::read::<UsernameArgs>(
            "list-connections-username",
            "List Connections (Username)",
            "List all open connections for a specific username.",
            |c, a| Box::pin(list_connections_username(c, a)),
        ),
        ToolDescriptor::write::<CloseUsernameArgs>(
            "delete-connections-username",
            "Delete Connections (Username)",
            "Close all connections for a specific username. Optionally provide a reason.",
            |c, a| Box::pin(delete_connections_username(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-connection-channels",
            "Get Connection Channels",
            "List all channels for a given connection.",
            |c, a| Box::pin(get_connection_channels(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_seven_tools() {
        assert_eq!(tools().len(), 7);
    }
}
