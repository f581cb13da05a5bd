//! User and user-limit management tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{parse_args, text_result, JsonObject, NameArgs, NoArgs, ToolDescriptor};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct PutUserArgs {
    name: String,
    #[serde(flatten)]
    settings: UserSettings,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    /// Comma-separated tags, e.g. "administrator" or "monitoring,management".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
struct UserArgs {
    user: String,
}

#[derive(Deserialize, JsonSchema)]
struct BulkDeleteArgs {
    users: Vec<String>,
}

#[derive(Deserialize, JsonSchema)]
struct SetUserLimitArgs {
    user: String,
    /// Limit name, e.g. max-connections or max-channels.
    name: String,
    value: i64,
}

#[derive(Deserialize, JsonSchema)]
struct UserLimitArgs {
    user: String,
    name: String,
}

async fn list_users(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let users = client.get("/users").await?;
    Ok(text_result(&users))
}

async fn get_user(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let user = client
        .get(&format!("/users/{}", encode_segment(&args.name)))
        .await?;
    Ok(text_result(&user))
}

async fn put_user(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: PutUserArgs = parse_args(args)?;
    let body = serde_json::to_value(&args.settings)?;
    let result = client
        .put(
            &format!("/users/{}", encode_segment(&args.name)),
            Some(&body),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_user(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let result = client
        .delete(&format!("/users/{}", encode_segment(&args.name)))
        .await?;
    Ok(text_result(&result))
}

async fn list_user_permissions(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: UserArgs = parse_args(args)?;
    let permissions = client
        .get(&format!("/users/{}/permissions", encode_segment(&args.user)))
        .await?;
    Ok(text_result(&permissions))
}

async fn list_user_topic_permissions(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: UserArgs = parse_args(args)?;
    let permissions = client
        .get(&format!(
            "/users/{}/topic-permissions",
            encode_segment(&args.user)
        ))
        .await?;
    Ok(text_result(&permissions))
}

async fn list_users_without_permissions(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let users = client.get("/users/without-permissions").await?;
    Ok(text_result(&users))
}

async fn bulk_delete_users(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: BulkDeleteArgs = parse_args(args)?;
    let result = client
        .post("/users/bulk-delete", Some(&json!({ "users": args.users })))
        .await?;
    Ok(text_result(&result))
}

async fn list_user_limits(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let limits = client.get("/user-limits").await?;
    Ok(text_result(&limits))
}

async fn get_user_limit(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: UserArgs = parse_args(args)?;
    let limit = client
        .get(&format!("/user-limits/{}", encode_segment(&args.user)))
        .await?;
    Ok(text_result(&limit))
}

async fn set_user_limit(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: SetUserLimitArgs = parse_args(args)?;
    let result = client
        .put(
            &format!(
                "/user-limits/{}/{}",
                encode_segment(&args.user),
                encode_segment(&args.name)
            ),
            Some(&json!({ "value": args.value })),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_user_limit(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: UserLimitArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/user-limits/{}/{}",
            encode_segment(&args.user),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-users",
            "List Users",
            "List all users in the RabbitMQ cluster.",
            |c, a| Box::pin(list_users(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-user",
            "Get User Details",
            "Get details for a specific user.",
            |c, a| Box::pin(get_user(c, a)),
        ),
        ToolDescriptor::write::<PutUserArgs>(
            "put-user",
            "Create or Update User",
            "Create or update a user.",
            |c, a| Box::pin(put_user(c, a)),
        ),
        ToolDescriptor::write::<NameArgs>(
            "delete-user",
            "Delete User",
            "Delete a user.",
            |c, a| Box::pin(delete_user(c, a)),
        ),
        ToolDescriptor::read::<UserArgs>(
            "list-user-permissions",
            "List User Permissions",
            "List all permissions for a user.",
            |c, a| Box::pin(list_user_permissions(c, a)),
        ),
        ToolDescriptor::read::<UserArgs>(
            "list-user-topic-permissions",
            "List User Topic Permissions",
            "List all topic permissions for a user.",
            |c, a| Box::pin(list_user_topic_permissions(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "list-users-without-permissions",
            "List Users Without Permissions",
            "List all users without permissions.",
            |c, a| Box::pin(list_users_without_permissions(c, a)),
        ),
        ToolDescriptor::write::<BulkDeleteArgs>(
            "bulk-delete-users",
            "Bulk Delete Users",
            "Bulk delete users.",
            |c, a| Box::pin(bulk_delete_users(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "list-user-limits",
            "List User Limits",
            "List all user limits.",
            |c, a| Box::pin(list_user_limits(c, a)),
        ),
        ToolDescriptor::read::<UserArgs>(
            "get-user-limit",
            "Get User Limit",
            "Get a user limit.",
            |c, a| Box::pin(get_user_limit(c, a)),
        ),
        ToolDescriptor::write::<SetUserLimitArgs>(
            "set-user-limit",
            "Set User Limit",
            "Set a user limit.",
            |c, a| Box::pin(set_user_limit(c, a)),
        ),
        ToolDescriptor::write::<UserLimitArgs>(
            "delete-user-limit",
            "Delete User Limit",
            "Delete a user limit.",
            |c, a| Box::pin(delete_user_limit(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_twelve_tools() {
        assert_eq!(tools().len(), 12);
    }
}
