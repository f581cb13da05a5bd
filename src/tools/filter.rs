//! Catalog filtering, statistics, and startup validation.
//!
//! The filter reduces the full catalog to the lite-mode subset; the
//! statistics feed operator-facing startup logs; validation guards the
//! agent-facing contract that lite mode serves exactly the curated set.
//! Everything here is a pure function of its inputs.

use serde::Serialize;

use super::lite::{is_lite_tool, lite_tool_count};
use super::ToolDescriptor;

/// Runtime mode, fixed at process start from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    Lite,
}

impl Mode {
    pub fn is_lite(&self) -> bool {
        matches!(self, Mode::Lite)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Full => "full",
            Mode::Lite => "lite",
        }
    }
}

/// Select the tools to register for `mode`.
///
/// Full mode returns the catalog unchanged. Lite mode keeps, in the
/// catalog's relative order, exactly the descriptors whose name is on the
/// allow-list. Allow-listed names with no catalog entry simply produce
/// nothing here; [`check_tool_names`] reports them.
pub fn filter_tools(catalog: &[ToolDescriptor], mode: Mode) -> Vec<ToolDescriptor> {
    match mode {
        Mode::Full => catalog.to_vec(),
        Mode::Lite => catalog
            .iter()
            .filter(|tool| is_lite_tool(tool.name))
            .cloned()
            .collect(),
    }
}

/// Before/after numbers for one filter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub mode: &'static str,
    pub original_count: usize,
    pub filtered_count: usize,
    pub filtered_out: usize,
    pub reduction_percentage: u32,
}

/// Compute filter statistics. The reduction percentage rounds to the nearest
/// integer (94 filtered out of 114 is an 82% reduction); an empty catalog
/// reduces by 0%.
pub fn filter_stats(original_count: usize, filtered_count: usize, mode: Mode) -> FilterStats {
    let filtered_out = original_count.saturating_sub(filtered_count);
    let reduction_percentage = if original_count > 0 {
        (filtered_out as f64 / original_count as f64 * 100.0).round() as u32
    } else {
        0
    };

    FilterStats {
        mode: mode.as_str(),
        original_count,
        filtered_count,
        filtered_out,
        reduction_percentage,
    }
}

/// Outcome of the startup sanity check on a filtered catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterValidation {
    pub is_valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_count: Option<usize>,
}

/// Validate a filtered tool set against the mode's contract.
///
/// Full mode is always valid. Lite mode fails on an empty set, on more tools
/// than the allow-list permits, and on any tool that is not allow-listed —
/// the last case means the filter and the registry have drifted apart. A
/// failure here must abort startup: serving an inconsistent curated set
/// breaks the contract promised to agents.
pub fn validate_filtered(filtered: &[ToolDescriptor], mode: Mode) -> FilterValidation {
    if !mode.is_lite() {
        return FilterValidation {
            is_valid: true,
            message: "full mode validation passed".to_string(),
            expected_count: None,
            actual_count: None,
        };
    }

    let expected = lite_tool_count();
    let actual = filtered.len();

    if actual == 0 {
        return FilterValidation {
            is_valid: false,
            message: "no tools available in lite mode, check tool name configuration".to_string(),
            expected_count: Some(expected),
            actual_count: Some(actual),
        };
    }

    if actual > expected {
        return FilterValidation {
            is_valid: false,
            message: format!(
                "lite mode tool count exceeds limit: expected {expected}, got {actual}"
            ),
            expected_count: Some(expected),
            actual_count: Some(actual),
        };
    }

    let invalid: Vec<&str> = filtered
        .iter()
        .map(|tool| tool.name)
        .filter(|name| !is_lite_tool(name))
        .collect();
    if !invalid.is_empty() {
        return FilterValidation {
            is_valid: false,
            message: format!(
                "lite mode includes tools outside the allow-list: {}",
                invalid.join(", ")
            ),
            expected_count: Some(expected),
            actual_count: Some(actual),
        };
    }

    FilterValidation {
        is_valid: true,
        message: format!("lite mode validation passed: {actual}/{expected} tools available"),
        expected_count: Some(expected),
        actual_count: Some(actual),
    }
}

/// Cross-check between an expected name list and the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCheck {
    pub is_valid: bool,
    pub message: String,
    /// Expected names with no catalog entry.
    pub missing: Vec<String>,
    /// Catalog names not present in the expected list.
    pub extra: Vec<String>,
}

/// Report which `expected` names are missing from `catalog`, and which
/// catalog entries fall outside `expected`. Missing names are not fatal by
/// themselves; the caller decides how loudly to complain.
pub fn check_tool_names(expected: &[&str], catalog: &[ToolDescriptor]) -> NameCheck {
    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !catalog.iter().any(|tool| tool.name == **name))
        .map(|name| name.to_string())
        .collect();
    let extra: Vec<String> = catalog
        .iter()
        .map(|tool| tool.name)
        .filter(|name| !expected.contains(name))
        .map(|name| name.to_string())
        .collect();

    NameCheck {
        is_valid: missing.is_empty(),
        message: if missing.is_empty() {
            "tool name check passed".to_string()
        } else {
            format!("expected tools missing from catalog: {}", missing.join(", "))
        },
        missing,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{catalog, lite_tools, JsonObject};
    use pretty_assertions::assert_eq;
    use rmcp::model::CallToolResult;
    use std::sync::Arc;

    fn stub(name: &'static str) -> ToolDescriptor {
        fn noop(
            _client: Arc<crate::client::ManagementClient>,
            _args: JsonObject,
        ) -> futures::future::BoxFuture<'static, crate::types::Result<CallToolResult>> {
            Box::pin(async { Ok(CallToolResult::success(vec![])) })
        }
        ToolDescriptor {
            name,
            title: name,
            description: name,
            read_only: true,
            input_schema: Arc::new(JsonObject::new()),
            handler: noop,
        }
    }

    fn names(tools: &[ToolDescriptor]) -> Vec<&str> {
        tools.iter().map(|t| t.name).collect()
    }

    #[test]
    fn full_mode_is_identity() {
        let catalog = catalog();
        let filtered = filter_tools(&catalog, Mode::Full);
        assert_eq!(names(&filtered), names(&catalog));
    }

    #[test]
    fn lite_mode_keeps_only_allow_listed_names_in_order() {
        let catalog = catalog();
        let filtered = filter_tools(&catalog, Mode::Lite);

        assert!(filtered.iter().all(|t| is_lite_tool(t.name)));

        // relative order must match the catalog, not the allow-list
        let expected: Vec<&str> = catalog
            .iter()
            .map(|t| t.name)
            .filter(|n| is_lite_tool(n))
            .collect();
        assert_eq!(names(&filtered), expected);
    }

    #[test]
    fn empty_catalog_filters_to_empty() {
        assert!(filter_tools(&[], Mode::Full).is_empty());
        assert!(filter_tools(&[], Mode::Lite).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let catalog = catalog();
        let once = filter_tools(&catalog, Mode::Lite);
        let twice = filter_tools(&catalog, Mode::Lite);
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn stats_for_lite_reduction() {
        let stats = filter_stats(114, 20, Mode::Lite);
        assert_eq!(
            stats,
            FilterStats {
                mode: "lite",
                original_count: 114,
                filtered_count: 20,
                filtered_out: 94,
                reduction_percentage: 82,
            }
        );
    }

    #[test]
    fn stats_for_full_mode() {
        let stats = filter_stats(114, 114, Mode::Full);
        assert_eq!(
            stats,
            FilterStats {
                mode: "full",
                original_count: 114,
                filtered_count: 114,
                filtered_out: 0,
                reduction_percentage: 0,
            }
        );
    }

    #[test]
    fn stats_guard_division_by_zero() {
        let stats = filter_stats(0, 0, Mode::Lite);
        assert_eq!(stats.reduction_percentage, 0);
    }

    #[test]
    fn full_mode_always_validates() {
        let result = validate_filtered(&[stub("anything")], Mode::Full);
        assert!(result.is_valid);
        assert_eq!(result.expected_count, None);
    }

    #[test]
    fn lite_mode_rejects_empty_set() {
        let result = validate_filtered(&[], Mode::Lite);
        assert!(!result.is_valid);
        assert!(result.message.contains("no tools available"));
        assert_eq!(result.actual_count, Some(0));
    }

    #[test]
    fn lite_mode_rejects_overflow() {
        let tools: Vec<ToolDescriptor> = (0..lite_tool_count() + 1)
            .map(|_| stub("list-queues"))
            .collect();
        let result = validate_filtered(&tools, Mode::Lite);
        assert!(!result.is_valid);
        assert!(result.message.contains("exceeds limit"));
    }

    #[test]
    fn lite_mode_rejects_non_essential_leak() {
        let tools = vec![stub("list-queues"), stub("list-nodes")];
        let result = validate_filtered(&tools, Mode::Lite);
        assert!(!result.is_valid);
        assert!(result.message.contains("list-nodes"));
    }

    #[test]
    fn lite_mode_accepts_partial_subset() {
        let tools = vec![stub("list-queues"), stub("rabbitmq-custom-api")];
        let result = validate_filtered(&tools, Mode::Lite);
        assert!(result.is_valid, "{}", result.message);
        assert_eq!(result.actual_count, Some(2));
        assert_eq!(result.expected_count, Some(lite_tool_count()));
    }

    #[test]
    fn end_to_end_filter_then_validate() {
        // a small catalog where only two names are allow-listed
        let catalog = vec![
            stub("list-queues"),
            stub("rabbitmq-custom-api"),
            stub("list-nodes"),
            stub("get-node"),
        ];
        let filtered = filter_tools(&catalog, Mode::Lite);
        assert_eq!(names(&filtered), vec!["list-queues", "rabbitmq-custom-api"]);

        let result = validate_filtered(&filtered, Mode::Lite);
        assert!(result.is_valid);
        assert_eq!(result.actual_count, Some(2));
    }

    #[test]
    fn name_check_reports_missing_and_extra() {
        let catalog = vec![stub("list-queues"), stub("list-nodes")];
        let check = check_tool_names(&["list-queues", "no-such-tool"], &catalog);
        assert!(!check.is_valid);
        assert_eq!(check.missing, vec!["no-such-tool"]);
        assert_eq!(check.extra, vec!["list-nodes"]);
    }

    #[test]
    fn name_check_passes_on_real_catalog() {
        let catalog = catalog();
        let lite = lite_tools();
        let check = check_tool_names(&lite, &catalog);
        assert!(check.is_valid, "{}", check.message);
    }
}
