//! Cluster node inspection tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;

use super::{parse_args, text_result, JsonObject, NameArgs, NoArgs, ToolDescriptor};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

async fn list_nodes(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let nodes = client.get("/nodes").await?;
    Ok(text_result(&nodes))
}

async fn get_node(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let node = client
        .get(&format!("/nodes/{}", encode_segment(&args.name)))
        .await?;
    Ok(text_result(&node))
}

async fn get_node_memory(client: Arc<ManagementClient>, args: JsonObject) -> Result<CallToolResult> {
    let args: NameArgs = parse_args(args)?;
    let memory = client
        .get(&format!("/nodes/{}/memory", encode_segment(&args.name)))
        .await?;
    Ok(text_result(&memory))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "list-nodes",
            "List Nodes",
            "List all nodes in the RabbitMQ cluster with their metrics",
            |c, a| Box::pin(list_nodes(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-node",
            "Get Node Details",
            "Get metrics of an individual cluster node",
            |c, a| Box::pin(get_node(c, a)),
        ),
        ToolDescriptor::read::<NameArgs>(
            "get-node-memory",
            "Get Node Memory Breakdown",
            "Get memory usage breakdown of a specific cluster node",
            |c, a| Box::pin(get_node_memory(c, a)),
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
