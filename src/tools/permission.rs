//! Permission and topic-permission management tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct VhostUserArgs {
    vhost: String,
    user: String,
}

#[derive(Deserialize, JsonSchema)]
struct SetPermissionArgs {
    vhost: String,
    user: String,
    /// Regex over resource names the user may configure.
    configure: String,
    write: String,
    read: String,
}

#[derive(Deserialize, JsonSchema)]
struct SetTopicPermissionArgs {
    vhost: String,
    user: String,
    exchange: String,
    write: String,
    read: String,
}

async fn list_permissions(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let permissions = client.get("/permissions").await?;
    Ok(text_result(&permissions))
}

async fn get_permission(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostUserArgs = parse_args(args)?;
    let permission = client
        .get(&format!(
            "/permissions/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.user)
        ))
        .await?;
    Ok(text_result(&permission))
}

async fn set_permission(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: SetPermissionArgs = parse_args(args)?;
    let body = json!({
        "configure": args.configure,
        "write": args.write,
        "read": args.read,
    });
    let result = client
        .put(
            &format!(
                "/permissions/{}/{}",
                encode_segment(&args.vhost),
                encode_segment(&args.user)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_permission(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostUserArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/permissions/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.user)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn list_topic_permissions(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let permissions = client.get("/topic-permissions").await?;
    Ok(text_result(&permissions))
}

async fn get_topic_permission(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostUserArgs = parse_args(args)?;
    let permission = client
        .get(&format!(
            "/topic-permissions/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.user)
        ))
        .await?;
    Ok(text_result(&permission))
}

async fn set_topic_permission(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: SetTopicPermissionArgs = parse_args(args)?;
    let body = json!({
        "exchange": args.exchange,
        "write": args.write,
        "read": args.read,
    });
    let result = client
        .put(
            &format!(
                "/topic-permissions/{}/{}",
                encode_segment(&args.vhost),
                encode_segment(&args.user)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_topic_permission(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostUserArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/topic-permissions/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.user)
        ))
        .await?;
    Ok(text_result(&result))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-permissions",
            "List Permissions",
            "List all permissions in the RabbitMQ cluster.",
            |c, a| Box::pin(list_permissions(c, a)),
        ),
        ToolDescriptor::read::<VhostUserArgs>(
            "get-permission",
            "Get Permission",
            "Get permissions for a user in a vhost.",
            |c, a| Box::pin(get_permission(c, a)),
        ),
        ToolDescriptor::write::<SetPermissionArgs>(
            "set-permission",
            "Set Permission",
            "Set permissions for a user in a vhost.",
            |c, a| Box::pin(set_permission(c, a)),
        ),
        ToolDescriptor::write::<VhostUserArgs>(
            "delete-permission",
            "Delete Permission",
            "Delete permissions for a user in a vhost.",
            |c, a| Box::pin(delete_permission(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "list-topic-permissions",
            "List Topic Permissions",
            "List all topic permissions in the RabbitMQ cluster.",
            |c, a| Box::pin(list_topic_permissions(c, a)),
        ),
        ToolDescriptor::read::<VhostUserArgs>(
            "get-topic-permission",
            "Get Topic Permission",
            "Get topic permissions for a user in a vhost.",
            |c, a| Box::pin(get_topic_permission(c, a)),
        ),
        ToolDescriptor::write::<SetTopicPermissionArgs>(
            "set-topic-permission",
            "Set Topic Permission",
            "Set topic permissions for a user in a vhost.",
            |c, a| Box::pin(set_topic_permission(c, a)),
        ),
        ToolDescriptor::write::<VhostUserArgs>(
            "delete-topic-permission",
            "Delete Topic Permission",
            "Delete topic permissions for a user in a vhost.",
            |c, a| Box::pin(delete_topic_permission(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_eight_tools() {
        assert_eq!(tools().len(), 8);
    }
}
