//! MCP server over the filtered tool catalog.
//!
//! Dispatch is dynamic: the catalog decided at startup drives both
//! `tools/list` and `tools/call`. A failing tool invocation is reported as a
//! tool-level error result and never takes the process down.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool, ToolAnnotations,
    ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer};

use crate::client::ManagementClient;
use crate::tools::ToolDescriptor;

/// Serves one immutable set of tools against one management endpoint.
#[derive(Clone, Debug)]
pub struct McpToolServer {
    client: Arc<ManagementClient>,
    tools: Arc<Vec<ToolDescriptor>>,
    index: Arc<HashMap<&'static str, usize>>,
}

impl McpToolServer {
    pub fn new(client: Arc<ManagementClient>, tools: Vec<ToolDescriptor>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name, i))
            .collect();
        Self {
            client,
            tools: Arc::new(tools),
            index: Arc::new(index),
        }
    }

    /// Number of tools this server exposes.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Invoke a tool by name. Unknown names and argument-shape problems map
    /// to MCP errors; handler failures become error results so the agent sees
    /// the diagnostic text.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: crate::tools::JsonObject,
    ) -> Result<CallToolResult, McpError> {
        let Some(&slot) = self.index.get(name) else {
            return Err(McpError::invalid_params(
                format!("unknown tool: {name}"),
                None,
            ));
        };
        let tool = &self.tools[slot];

        match (tool.handler)(self.client.clone(), arguments).await {
            Ok(result) => Ok(result),
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "tool invocation failed");
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }
}

impl ServerHandler for McpToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: None,
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "rabbitmq-mcp".to_string(),
                title: Some("RabbitMQ Management".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "RabbitMQ management tools: inspect and administer queues, exchanges, \
                 bindings, vhosts, users, policies and cluster health over the HTTP \
                 management API. Use rabbitmq-custom-api for endpoints without a \
                 dedicated tool."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self
            .tools
            .iter()
            .map(|tool| Tool {
                name: tool.name.into(),
                title: Some(tool.title.to_string()),
                description: Some(tool.description.into()),
                input_schema: tool.input_schema.clone(),
                output_schema: None,
                annotations: Some(ToolAnnotations {
                    title: Some(tool.title.to_string()),
                    read_only_hint: Some(tool.read_only),
                    destructive_hint: None,
                    idempotent_hint: None,
                    open_world_hint: Some(true),
                }),
                icons: None,
                meta: None,
            })
            .collect();

        Ok(ListToolsResult {
            next_cursor: None,
            tools,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(request.name.as_ref(), request.arguments.unwrap_or_default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{catalog, filter_tools, Mode};
    use crate::types::{Protocol, RabbitConfig};
    use httpmock::prelude::*;
    use serde_json::json;

    fn server_for(mock: &MockServer, mode: Mode) -> McpToolServer {
        let client = ManagementClient::new(RabbitConfig {
            host: mock.host(),
            port: mock.port(),
            protocol: Protocol::Http,
            ..RabbitConfig::default()
        })
        .unwrap();
        let tools = filter_tools(&catalog(), mode);
        McpToolServer::new(Arc::new(client), tools)
    }

    #[tokio::test]
    async fn lite_server_exposes_the_allow_list() {
        let mock = MockServer::start_async().await;
        let server = server_for(&mock, Mode::Lite);
        assert_eq!(server.tool_count(), crate::tools::lite_tool_count());
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_is_an_mcp_error() {
        let mock = MockServer::start_async().await;
        let server = server_for(&mock, Mode::Full);
        let err = server
            .dispatch("no-such-tool", Default::default())
            .await
            .unwrap_err();
        assert!(err.message.contains("unknown tool"));
    }

    #[tokio::test]
    async fn dispatch_forwards_to_the_management_api() {
        let mock = MockServer::start_async().await;
        let endpoint = mock
            .mock_async(|when, then| {
                when.method(GET).path("/api/queues");
                then.status(200).json_body(json!([{"name": "orders"}]));
            })
            .await;

        let server = server_for(&mock, Mode::Full);
        let result = server
            .dispatch("list-queues", Default::default())
            .await
            .unwrap();

        endpoint.assert_async().await;
        assert_ne!(result.is_error, Some(true));
        let text = &result.content[0].as_text().unwrap().text;
        assert!(text.contains("orders"));
    }

    #[tokio::test]
    async fn handler_failure_becomes_an_error_result() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(GET).path("/api/queues");
            then.status(500).body("Internal Server Error");
        })
        .await;

        let server = server_for(&mock, Mode::Full);
        let result = server
            .dispatch("list-queues", Default::default())
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        let text = &result.content[0].as_text().unwrap().text;
        assert!(text.contains("HTTP 500"), "got: {text}");
    }
}
