//! Channel inspection tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;

use super::{parse_args, text_result, JsonObject, NameArgs, NoArgs, ToolDescriptor};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

async fn list_channels(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let channels = client.get("/channels").await?;
    Ok(text_result(&channels))
}

async fn get_channel(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let channel = client
        .get(&format!("/channels/{}", encode_segment(&args.name)))
        .await?;
    Ok(text_result(&channel))
}

async fn list_channels_connection(
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
            "list-channels",
            "List Channels",
            "List all channels in the RabbitMQ cluster.",
            |c, a| Box::pin(list_channels(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-channel",
            "Get Channel Details",
            "Get details for a specific channel.",
            |c, a| Box::pin(get_channel(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "list-channels-connection",
            "List Channels (Connection)",
            "List all channels for a given connection.",
            |c, a| Box::pin(list_channels_connection(c, a)),
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
