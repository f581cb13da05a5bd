//! Policy and operator-policy management tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor, VhostArgs, VhostNameArgs};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct PutPolicyArgs {
    vhost: String,
    name: String,
    #[serde(flatten)]
    policy: PolicyBody,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct PolicyBody {
    /// Regex matched against queue/exchange names.
    pattern: String,
    definition: JsonObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    apply_to: Option<ApplyTo>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
enum ApplyTo {
    All,
    Queues,
    Exchanges,
}

async fn list_policies(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let policies = client.get("/policies").await?;
    Ok(text_result(&policies))
}

async fn list_policies_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let policies = client
        .get(&format!("/policies/{}", encode_segment(&args.vhost)))
        .await?;
    Ok(text_result(&policies))
}

async fn get_policy(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let policy = client
        .get(&format!(
            "/policies/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&policy))
}

async fn put_policy(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: PutPolicyArgs = parse_args(args)?;
    let body = serde_json::to_value(&args.policy)?;
    let result = client
        .put(
            &format!(
                "/policies/{}/{}",
                encode_segment(&args.vhost),
                encode_segment(&args.name)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_policy(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/policies/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn list_operator_policies(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let policies = client.get("/operator-policies").await?;
    Ok(text_result(&policies))
}

async fn list_operator_policies_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostArgs = parse_args(args)?;
    let policies = client
        .get(&format!(
            "/operator-policies/{}",
            encode_segment(&args.vhost)
        ))
        .await?;
    Ok(text_result(&policies))
}

async fn get_operator_policy(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let policy = client
        .get(&format!(
            "/operator-policies/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&policy))
}

async fn put_operator_policy(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: PutPolicyArgs = parse_args(args)?;
    let body = serde_json::to_value(&args.policy)?;
    let result = client
        .put(
            &format!(
                "/operator-policies/{}/{}",
                encode_segment(&args.vhost),
                encode_segment(&args.name)
            ),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_operator_policy(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: VhostNameArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/operator-policies/{}/{}",
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-policies",
            "List Policies",
            "List all policies in the RabbitMQ cluster.",
            |c, a| Box::pin(list_policies(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-policies-vhost",
            "List Policies (Vhost)",
            "List all policies for a given vhost.",
            |c, a| Box::pin(list_policies_vhost(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-policy",
            "Get Policy",
            "Get a specific policy for a vhost.",
            |c, a| Box::pin(get_policy(c, a)),
        ),
        ToolDescriptor::write::<PutPolicyArgs>(
            "put-policy",
            "Create or Update Policy",
            "Create or update a policy for a vhost.",
            |c, a| Box::pin(put_policy(c, a)),
        ),
        ToolDescriptor::write::<VhostNameArgs>(
            "delete-policy",
            "Delete Policy",
            "Delete a policy for a vhost.",
            |c, a| Box::pin(delete_policy(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "list-operator-policies",
            "List Operator Policies",
            "List all operator policies in the RabbitMQ cluster.",
            |c, a| Box::pin(list_operator_policies(c, a)),
        ),
        ToolDescriptor::read::<VhostArgs>(
            "list-operator-policies-vhost",
            "List Operator Policies (Vhost)",
            "List all operator policies for a given vhost.",
            |c, a| Box::pin(list_operator_policies_vhost(c, a)),
        ),
        ToolDescriptor::read::<VhostNameArgs>(
            "get-operator-policy",
            "Get Operator Policy",
            "Get a specific operator policy for a vhost.",
            |c, a| Box::pin(get_operator_policy(c, a)),
        ),
        ToolDescriptor::write::<PutPolicyArgs>(
            "put-operator-policy",
            "Create or Update Operator Policy",
            "Create or update an operator policy for a vhost.",
            |c, a| Box::pin(put_operator_policy(c, a)),
        ),
        ToolDescriptor::write::<VhostNameArgs>(
            "delete-operator-policy",
            "Delete Operator Policy",
            "Delete an operator policy for a vhost.",
            |c, a| Box::pin(delete_operator_policy(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_body_requires_pattern_and_definition() {
        assert!(serde_json::from_str::<PolicyBody>("{}").is_err());
        let body: PolicyBody = serde_json::from_str(
            r#"{"pattern": "^amq\\.", "definition": {"max-length": 100}, "apply_to": "queues"}"#,
        )
        .unwrap();
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["apply_to"], "queues");
        assert!(value.get("priority").is_none());
    }

    #[test]
    fn module_exposes_ten_tools() {
        assert_eq!(tools().len(), 10);
    }
}
