//! Authentication and federation inspection tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor, VhostArgs};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct NodeArgs {
    node: String,
}

#[derive(Deserialize, JsonSchema)]
struct HashPasswordArgs {
    password: String,
}

async fn list_federation_links(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let links = client.get("/federation-links").await?;
    Ok(text_result(&links))
}

async fn list_federation_links_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let links = client
        .get(&format!("/federation-links/{}", encode_segment(&args.vhost)))
        .await?;
    Ok(text_result(&links))
}

async fn list_auth_attempts_node(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: NodeArgs = parse_args(args)?;
    let attempts = client
        .get(&format!("/auth/attempts/{}", encode_segment(&args.node)))
        .await?;
    Ok(text_result(&attempts))
}

async fn list_auth_attempts_node_source(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: NodeArgs = parse_args(args)?;
    let attempts = client
        .get(&format!(
            "/auth/attempts/{}/source",
            encode_segment(&args.node)
        ))
        .await?;
    Ok(text_result(&attempts))
}

async fn hash_password(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: HashPasswordArgs = parse_args(args)?;
    let hash = client
        .get(&format!(
            "/auth/hash_password/{}",
            encode_segment(&args.password)
        ))
        .await?;
    Ok(text_result(&hash))
}

async fn get_auth_info(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let info = client.get("/auth").await?;
    Ok(text_result(&info))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-federation-links",
            "List Federation Links",
            "List all federation links in the RabbitMQ cluster.",
            |c, a| Box::pin(list_federation_links(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-federation-links-vhost",
            "List Federation Links (Vhost)",
            "List all federation links for a given vhost.",
            |c, a| Box::pin(list_federation_links_vhost(c, a)),
        ),
        ToolDescriptor::read::<NodeArgs>(
            "list-auth-attempts-node",
            "List Auth Attempts (Node)",
            "List all authentication attempts for a node.",
            |c, a| Box::pin(list_auth_attempts_node(c, a)),
        ),
        ToolDescriptor::read::<NodeArgs>(
            "list-auth-attempts-node-source",
            "List Auth Attempts (Node/Source)",
            "List all authentication attempts for a node/source.",
            |c, a| Box::pin(list_auth_attempts_node_source(c, a)),
        ),
        ToolDescriptor::read::<HashPasswordArgs>(
            "hash-password",
            "Hash Password",
            "Hash a password using RabbitMQ's internal hashing.",
            |c, a| Box::pin(hash_password(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "get-auth-info",
            "Get Auth Info",
            "Get authentication info for the current user.",
            |c, a| Box::pin(get_auth_info(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_six_tools() {
        assert_eq!(tools().len(), 6);
    }
}
