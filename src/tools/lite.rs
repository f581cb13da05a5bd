//! Lite-mode allow-list.
//!
//! In lite mode only the tools named here are registered: the day-to-day
//! development workflow plus a handful of operational checks, with the
//! custom-API escape hatch always available. The expected lite-mode tool
//! count is derived from these slices, never hard-coded elsewhere.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Development workflow: queues, exchanges, bindings, consumers.
pub const DEVELOPMENT_TOOLS: &[&str] = &[
    "list-queues",
    "put-queue",
    "get-queue-messages",
    "delete-queue",
    "purge-queue",
    "list-exchanges",
    "put-exchange",
    "delete-exchange",
    "create-binding-exchange-queue",
    "delete-binding-exchange-queue",
    "list-consumers",
];

/// Basic operations: vhosts, channels, connections, alarm health check.
pub const BASIC_OPS_TOOLS: &[&str] = &[
    "list-vhosts",
    "put-vhost",
    "list-channels",
    "get-channel",
    "get-health-alarms",
    "list-connections",
];

/// The pass-through tool, available in every mode.
pub const CUSTOM_API_TOOLS: &[&str] = &["rabbitmq-custom-api"];

/// The complete allow-list: groups concatenated in declaration order.
pub fn lite_tools() -> Vec<&'static str> {
    let mut names = Vec::with_capacity(lite_tool_count());
    names.extend_from_slice(DEVELOPMENT_TOOLS);
    names.extend_from_slice(BASIC_OPS_TOOLS);
    names.extend_from_slice(CUSTOM_API_TOOLS);
    names
}

/// Number of tools permitted in lite mode.
pub fn lite_tool_count() -> usize {
    DEVELOPMENT_TOOLS.len() + BASIC_OPS_TOOLS.len() + CUSTOM_API_TOOLS.len()
}

/// Membership test over the allow-list. O(1) after the first call.
pub fn is_lite_tool(name: &str) -> bool {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| lite_tools().into_iter().collect())
        .contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_has_eighteen_tools() {
        assert_eq!(lite_tool_count(), 18);
        assert_eq!(lite_tools().len(), lite_tool_count());
    }

    #[test]
    fn groups_concatenate_in_declaration_order() {
        let names = lite_tools();
        assert_eq!(names[0], DEVELOPMENT_TOOLS[0]);
        assert_eq!(names[DEVELOPMENT_TOOLS.len()], BASIC_OPS_TOOLS[0]);
        assert_eq!(*names.last().unwrap(), "rabbitmq-custom-api");
    }

    #[test]
    fn membership_matches_list() {
        for name in lite_tools() {
            assert!(is_lite_tool(name));
        }
        assert!(!is_lite_tool("list-nodes"));
        assert!(!is_lite_tool(""));
    }

    #[test]
    fn allow_list_has_no_duplicates() {
        let names = lite_tools();
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}
