//! Virtual host management tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parse_args, text_result, JsonObject, NameArgs, NoArgs, ToolDescriptor};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct PutVhostArgs {
    name: String,
    #[serde(flatten)]
    settings: VhostSettings,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct VhostSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_queue_type: Option<DefaultQueueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protected_from_deletion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tracing: Option<bool>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
enum DefaultQueueType {
    Classic,
    Quorum,
    Stream,
}

#[derive(Deserialize, JsonSchema)]
struct StartVhostArgs {
    name: String,
    node: String,
}

async fn list_vhosts(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let vhosts = client.get("/vhosts").await?;
    Ok(text_result(&vhosts))
}

async fn get_vhost(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let vhost = client
        .get(&format!("/vhosts/{}", encode_segment(&args.name)))
        .await?;
    Ok(text_result(&vhost))
}

async fn put_vhost(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: PutVhostArgs = parse_args(args)?;
    // PUT without a body when no settings were supplied
    let body = serde_json::to_value(&args.settings)?;
    let body = match &body {
        serde_json::Value::Object(map) if map.is_empty() => None,
        _ => Some(&body),
    };
    let result = client
        .put(&format!("/vhosts/{}", encode_segment(&args.name)), body)
        .await?;
    Ok(text_result(&result))
}

async fn delete_vhost(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let result = client
        .delete(&format!("/vhosts/{}", encode_segment(&args.name)))
        .await?;
    Ok(text_result(&result))
}

async fn get_vhost_permissions(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let perms = client
        .get(&format!(
            "/vhosts/{}/permissions",
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&perms))
}

async fn get_vhost_topic_permissions(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let perms = client
        .get(&format!(
            "/vhosts/{}/topic-permissions",
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&perms))
}

async fn protect_vhost(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let result = client
        .post(
            &format!(
                "/vhosts/{}/deletion/protection",
                encode_segment(&args.name)
            ),
            None,
        )
        .await?;
    Ok(text_result(&result))
}

async fn unprotect_vhost(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/vhosts/{}/deletion/protection",
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn start_vhost_on_node(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: StartVhostArgs = parse_args(args)?;
    let result = client
        .post(
            &format!(
                "/vhosts/{}/start/{}",
                encode_segment(&args.name),
                encode_segment(&args.node)
            ),
            None,
        )
        .await?;
    Ok(text_result(&result))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-vhosts",
            "List Vhosts",
            "List all virtual hosts in the cluster",
            |c, a| Box::pin(list_vhosts(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-vhost",
            "Get Vhost Details",
            "Get details for a specific virtual host",
            |c, a| Box::pin(get_vhost(c, a)),
        ),
        ToolDescriptor::write::<PutVhostArgs>(
            "put-vhost",
            "Create or Update Vhost",
            "Create or update a virtual host",
            |c, a| Box::pin(put_vhost(c, a)),
        ),
        ToolDescriptor::write::<NameArgs>(
            "delete-vhost",
            "Delete Vhost",
            "Delete a virtual host",
            |c, a| Box::pin(delete_vhost(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-vhost-permissions",
            "List Vhost Permissions",
            "List all permissions for a given virtual host",
            |c, a| Box::pin(get_vhost_permissions(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-vhost-topic-permissions",
            "List Vhost Topic Permissions",
            "List all topic permissions for a given virtual host",
            |c, a| Box::pin(get_vhost_topic_permissions(c, a)),
        ),
        ToolDescriptor::write::<NameArgs>(
            "protect-vhost",
            "Protect Vhost from Deletion",
            "Protect a virtual host from deletion",
            |c, a| Box::pin(protect_vhost(c, a)),
        ),
        ToolDescriptor::write::<NameArgs>(
            "unprotect-vhost",
            "Unprotect Vhost from Deletion",
            "Remove deletion protection from a virtual host",
            |c, a| Box::pin(unprotect_vhost(c, a)),
        ),
        ToolDescriptor::write::<StartVhostArgs>(
            "start-vhost-on-node",
            "Start Vhost on Node",
            "Start or restart a virtual host on a node",
            |c, a| Box::pin(start_vhost_on_node(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_serialize_to_empty_object() {
        let settings: VhostSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn queue_type_uses_lowercase_wire_names() {
        let settings: VhostSettings =
            serde_json::from_str(r#"{"default_queue_type": "quorum"}"#).unwrap();
        let body = serde_json::to_value(&settings).unwrap();
        assert_eq!(body["default_queue_type"], "quorum");
    }

    #[test]
    fn module_exposes_nine_tools() {
        assert_eq!(tools().len(), 9);
    }
}
