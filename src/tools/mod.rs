//! Tool infrastructure — descriptors, catalog assembly, lite-mode filtering.
//!
//! Each RabbitMQ resource family contributes a module of declarative tool
//! descriptors; [`catalog`] concatenates them in a fixed order. Filtering and
//! validation of the catalog live in [`filter`], the lite-mode allow-list in
//! [`lite`].

pub mod filter;
pub mod lite;

mod auth;
mod binding;
mod channel;
mod connection;
mod consumer;
mod custom;
mod exchange;
mod healthcheck;
mod node;
mod parameter;
mod permission;
mod policy;
mod queue;
mod stream;
mod user;
mod vhost;

pub use filter::{check_tool_names, filter_stats, filter_tools, validate_filtered};
pub use filter::{FilterStats, FilterValidation, Mode, NameCheck};
pub use lite::{is_lite_tool, lite_tool_count, lite_tools};

use futures::future::BoxFuture;
use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::client::ManagementClient;
use crate::types::{Error, Result};

/// JSON object map, the shape of MCP tool arguments.
pub type JsonObject = serde_json::Map<String, Value>;

/// Handler signature: share the client, take ownership of the arguments,
/// produce the tool result.
pub type ToolHandler =
    fn(Arc<ManagementClient>, JsonObject) -> BoxFuture<'static, Result<CallToolResult>>;

/// One invokable capability: static metadata plus a handler that forwards to
/// a single management API endpoint.
///
/// Descriptors are immutable once constructed; the catalog is rebuilt, never
/// mutated.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub read_only: bool,
    pub input_schema: Arc<JsonObject>,
    pub handler: ToolHandler,
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("read_only", &self.read_only)
            .finish()
    }
}

impl ToolDescriptor {
    /// Read-only tool (maps to the MCP `readOnlyHint` annotation).
    pub(crate) fn read<T: JsonSchema>(
        name: &'static str,
        title: &'static str,
        description: &'static str,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name,
            title,
            description,
            read_only: true,
            input_schema: schema_for::<T>(),
            handler,
        }
    }

    /// Mutating tool.
    pub(crate) fn write<T: JsonSchema>(
        name: &'static str,
        title: &'static str,
        description: &'static str,
        handler: ToolHandler,
    ) -> Self {
        Self {
            read_only: false,
            ..Self::read::<T>(name, title, description, handler)
        }
    }
}

/// The full, unfiltered catalog: every resource family in a fixed order.
/// Relative order within and across families is stable so that filtered
/// listings stay deterministic.
pub fn catalog() -> Vec<ToolDescriptor> {
    let mut tools = Vec::new();
    tools.extend(queue::tools());
    tools.extend(exchange::tools());
    tools.extend(binding::tools());
    tools.extend(vhost::tools());
    tools.extend(user::tools());
    tools.extend(permission::tools());
    tools.extend(policy::tools());
    tools.extend(connection::tools());
    tools.extend(channel::tools());
    tools.extend(consumer::tools());
    tools.extend(node::tools());
    tools.extend(parameter::tools());
    tools.extend(stream::tools());
    tools.extend(auth::tools());
    tools.extend(healthcheck::tools());
    tools.extend(custom::tools());
    tools
}

// =============================================================================
// Shared helpers for the per-resource modules
// =============================================================================

/// JSON schema for `T`, rendered into the object form MCP expects.
fn schema_for<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(&schema) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

/// Deserialize tool arguments into a typed struct, rejecting bad shapes.
pub(crate) fn parse_args<T: DeserializeOwned>(args: JsonObject) -> Result<T> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| Error::validation(format!("invalid arguments: {e}")))
}

/// Wrap a management API response as pretty-printed text content.
pub(crate) fn text_result(value: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

// Argument shapes shared by several resource families.

#[derive(Deserialize, JsonSchema)]
pub(crate) struct NoArgs {}

#[derive(Deserialize, JsonSchema)]
pub(crate) struct VhostArgs {
    pub vhost: String,
}

#[derive(Deserialize, JsonSchema)]
pub(crate) struct NameArgs {
    pub name: String,
}

#[derive(Deserialize, JsonSchema)]
pub(crate) struct VhostNameArgs {
    pub vhost: String,
    pub name: String,
}
