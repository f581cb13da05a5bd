//! Health check and cluster status tools.

use std::sync::Arc;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{parse_args, text_result, JsonObject, NoArgs, ToolDescriptor};
use crate::client::{encode_segment, ManagementClient};
use crate::types::Result;

#[derive(Deserialize, JsonSchema)]
struct CertificateExpirationArgs {
    /// Time window, e.g. "1".
    within: String,
    /// Unit for the window: days, weeks, months or years.
    unit: String,
}

#[derive(Deserialize, JsonSchema)]
struct PortListenerArgs {
    port: String,
}

#[derive(Deserialize, JsonSchema)]
struct ProtocolListenerArgs {
    /// Protocol name, e.g. amqp, amqps, mqtt, stomp.
    protocol: String,
}

async fn get_health_alarms(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let result = client.get("/health/checks/alarms").await?;
    Ok(text_result(&result))
}

async fn get_health_local_alarms(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let result = client.get("/health/checks/local-alarms").await?;
    Ok(text_result(&result))
}

async fn get_health_certificate_expiration(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: CertificateExpirationArgs = parse_args(args)?;
    let result = client
        .get(&format!(
            "/health/checks/certificate-expiration/{}/{}",
            encode_segment(&args.within),
            encode_segment(&args.unit)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn get_health_port_listener(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: PortListenerArgs = parse_args(args)?;
    let result = client
        .get(&format!(
            "/health/checks/port-listener/{}",
            encode_segment(&args.port)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn get_health_protocol_listener(
    client: Arc<ManagementClient>,
    args: JsonObject,
) -> Result<CallToolResult> {
    let args: ProtocolListenerArgs = parse_args(args)?;
    let result = client
        .get(&format!(
            "/health/checks/protocol-listener/{}",
            encode_segment(&args.protocol)
        ))
        .await?;
    Ok(text_result(&result))
}

async fn get_health_virtual_hosts(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let result = client.get("/health/checks/virtual-hosts").await?;
    Ok(text_result(&result))
}

async fn get_health_node_is_quorum_critical(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let result = client.get("/health/checks/node-is-quorum-critical").await?;
    Ok(text_result(&result))
}

async fn get_rebalance_queues(
    client: Arc<ManagementClient>,
    _args: JsonObject,
) -> Result<CallToolResult> {
    let result = client.get("/rebalance/queues").await?;
    Ok(text_result(&result))
}

async fn get_whoami(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let result = client.get("/whoami").await?;
    Ok(text_result(&result))
}

async fn get_auth(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let result = client.get("/auth").await?;
    Ok(text_result(&result))
}

async fn get_extensions(client: Arc<ManagementClient>, _args: JsonObject) -> Result<CallToolResult> {
    let result = client.get("/extensions").await?;
    Ok(text_result(&result))
}

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read::<NoArgs>(
            "get-health-alarms",
            "Health Check: Alarms",
            "Get health check status for alarms.",
            |c, a| Box::pin(get_health_alarms(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "get-health-local-alarms",
            "Health Check: Local Alarms",
            "Get health check status for local alarms.",
            |c, a| Box::pin(get_health_local_alarms(c, a)),
        ),
        ToolDescriptor::read::<CertificateExpirationArgs>(
            "get-health-certificate-expiration",
            "Health Check: Certificate Expiration",
            "Get health check status for certificate expiration within a given time.",
            |c, a| Box::pin(get_health_certificate_expiration(c, a)),
        ),
        ToolDescriptor::read::<PortListenerArgs>(
            "get-health-port-listener",
            "Health Check: Port Listener",
            "Get health check status for a port listener.",
            |c, a| Box::pin(get_health_port_listener(c, a)),
        ),
        ToolDescriptor::read::<ProtocolListenerArgs>(
            "get-health-protocol-listener",
            "Health Check: Protocol Listener",
            "Get health check status for a protocol listener.",
            |c, a| Box::pin(get_health_protocol_listener(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "get-health-virtual-hosts",
            "Health Check: Virtual Hosts",
            "Get health check status for all virtual hosts.",
            |c, a| Box::pin(get_health_virtual_hosts(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "get-health-node-is-quorum-critical",
            "Health Check: Node Is Quorum Critical",
            "Get health check status for node quorum criticality.",
            |c, a| Box::pin(get_health_node_is_quorum_critical(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "get-rebalance-queues",
            "Rebalance Queues",
            "Get rebalance status for queues.",
            |c, a| Box::pin(get_rebalance_queues(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "get-whoami",
            "Whoami",
            "Get information about the current user.",
            |c, a| Box::pin(get_whoami(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "get-auth",
            "Auth Status",
            "Get authentication status for the current user.",
            |c, a| Box::pin(get_auth(c, a)),
        ),
        ToolDescriptor::read::<NoArgs>(
            "get-extensions",
            "Extensions",
            "Get information about enabled RabbitMQ extensions.",
            |c, a| Box::pin(get_extensions(c, a)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_eleven_tools() {
        assert_eq!(tools().len(), 11);
    }
}
