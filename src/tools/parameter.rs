//! Runtime parameter and global parameter tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, text_result, JsonObject, NameArgs, NoArgs, ToolDescriptor};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct ComponentArgs {
    component: String,
}

#[derive(Deserialize, JsonSchema)]
struct ComponentVhostArgs {
    component: String,
    vhost: String,
}

#[derive(Deserialize, JsonSchema)]
struct ParameterArgs {
    component: String,
    vhost: String,
    name: String,
}

#[derive(Deserialize, JsonSchema)]
struct PutParameterArgs {
    component: String,
    vhost: String,
    name: String,
    /// Parameter value, passed through as-is.
    value: Value,
}

#[derive(Deserialize, JsonSchema)]
struct PutGlobalParameterArgs {
    name: String,
    value: Value,
}

async fn list_parameters(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let parameters = client.get("/parameters").await?;
    Ok(text_result(&parameters))
}

async fn list_parameters_component(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: ComponentArgs = parse_args(args)?;
    let parameters = client
        .get(&format!("/parameters/{}", encode_segment(&args.component)))
        .await?;
    Ok(text_result(&parameters))
}

async fn list_parameters_component_vhost(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: ComponentVhostArgs = parse_args(args)?;
    let parameters = client
        .get(&format!(
            "/parameters/{}/{}",
            encode_segment(&args.component),
            encode_segment(&args.vhost)
        ))
        .await?;
    Ok(text_result(&parameters))
}

async fn get_parameter(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: ParameterArgs = parse_args(args)?;
    let parameter = client
        .get(&format!(
            "/parameters/{}/{}/{}",
            encode_segment(&args.component),
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&parameter))
}

async fn put_parameter(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: PutParameterArgs = parse_args(args)?;
    let result = client
        .put(
            &format!(
                "/parameters/{}/{}/{}",
                encode_segment(&args.component),
                encode_segment(&args.vhost),
                encode_segment(&args.name)
            ),
            Some(&json!({ "value": args.value })),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_parameter(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: ParameterArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/parameters/{}/{}/{}",
            encode_segment(&args.component),
            encode_segment(&args.vhost),
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn list_global_parameters(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let parameters = client.get("/global-parameters").await?;
    Ok(text_result(&parameters))
}

async fn get_global_parameter(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let parameter = client
        .get(&format!(
            "/global-parameters/{}",
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&parameter))
}

async fn put_global_parameter(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: PutGlobalParameterArgs = parse_args(args)?;
    let result = client
        .put(
            &format!("/global-parameters/{}", encode_segment(&args.name)),
            Some(&json!({ "value": args.value })),
        )
        .await?;
    Ok(text_result(&result))
}

async fn delete_global_parameter(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let result = client
        .delete(&format!(
            "/global-parameters/{}",
            encode_segment(&args.name)
        ))
        .await?;
    Ok(text_result(&result))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-parameters",
            "List Parameters",
            "List all parameters in the RabbitMQ cluster.",
            |c, a| Box::pin(list_parameters(c, a)),
        ),
        ToolDescriptor::read::<ComponentArgs>(
            "list-parameters-component",
            "List Parameters (Component)",
            "List all parameters for a given component.",
            |c, a| Box::pin(list_parameters_component(c, a)),
        ),
        ToolDescriptor::read::<ComponentVhostArgs>(
            "list-parameters-component-vhost",
            "List Parameters (Component/Vhost)",
            "List all parameters for a given component in a vhost.",
            |c, a| Box::pin(list_parameters_component_vhost(c, a)),
        ),
        ToolDescriptor::read::<ParameterArgs>(
            "get-parameter",
            "Get Parameter",
            "Get a specific parameter for a component in a vhost.",
            |c, a| Box::pin(get_parameter(c, a)),
        ),
        ToolDescriptor::write::<PutParameterArgs>(
            "put-parameter",
            "Create or Update Parameter",
            "Create or update a parameter for a component in a vhost.",
            |c, a| Box::pin(put_parameter(c, a)),
        ),
        ToolDescriptor::write::<ParameterArgs>(
            "delete-parameter",
            "Delete Parameter",
            "Delete a parameter for a component in a vhost.",
            |c, a| Box::pin(delete_parameter(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "list-global-parameters",
            "List Global Parameters",
            "List all global parameters in the RabbitMQ cluster.",
            |c, a| Box::pin(list_global_parameters(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-global-parameter",
            "Get Global Parameter",
            "Get a specific global parameter.",
            |c, a| Box::pin(get_global_parameter(c, a)),
        ),
        ToolDescriptor::write::<PutGlobalParameterArgs>(
            "put-global-parameter",
            "Create or Update Global Parameter",
            "Create or update a global parameter.",
            |c, a| Box::pin(put_global_parameter(c, a)),
        ),
        ToolDescriptor::write::<NameArgs>(
            "delete-global-parameter",
            "Delete Global Parameter",
            "Delete a global parameter.",
            |c, a| Box::pin(delete_global_parameter(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_ten_tools() {
        assert_eq!(tools().len(), 10);
    }
}
